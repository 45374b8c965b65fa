//! Database initialization
//!
//! Creates the database on first run and brings the schema up
//! idempotently on every start.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Initialize database connection and create tables if needed
///
/// Connection options are applied per pooled connection: foreign keys ON
/// (the producer → account relation is enforced at the storage boundary),
/// WAL journaling (catalog reads stay available while a submission
/// commits), 5 s busy timeout.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Schema creation (idempotent - safe to call multiple times)
    create_accounts_table(&pool).await?;
    create_profiles_table(&pool).await?;
    create_beats_table(&pool).await?;

    Ok(pool)
}

async fn create_accounts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            guid TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the profiles table
///
/// One row per account; the registration path inserts the account and
/// its profile together.
async fn create_profiles_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            account_guid TEXT PRIMARY KEY REFERENCES accounts(guid),
            avatar TEXT,
            bio TEXT,
            website TEXT,
            instagram TEXT,
            twitter TEXT,
            soundcloud TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the beats table and its query indexes
///
/// `id` is the store-assigned monotonic identifier. Size ceilings on the
/// audio and cover payloads are enforced by the submission validator
/// before any row is written, not by column constraints.
async fn create_beats_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS beats (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            producer_guid TEXT NOT NULL REFERENCES accounts(guid),
            title TEXT NOT NULL,
            audio_file TEXT NOT NULL,
            audio_sha256 TEXT NOT NULL,
            cover_image TEXT,
            price REAL NOT NULL DEFAULT 0,
            genre TEXT NOT NULL,
            bpm INTEGER NOT NULL,
            description TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            free_download INTEGER NOT NULL DEFAULT 0,
            plays INTEGER NOT NULL DEFAULT 0,
            is_featured INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_beats_producer ON beats(producer_guid)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_beats_genre ON beats(genre)")
        .execute(pool)
        .await?;

    Ok(())
}
