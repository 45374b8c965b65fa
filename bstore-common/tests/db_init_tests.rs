//! Unit tests for database initialization
//!
//! Covers automatic database creation, idempotent re-open, and the
//! schema/pragma state the rest of the service relies on.

use bstore_common::db::init_database;
use std::path::PathBuf;

fn scratch_db(tag: &str) -> PathBuf {
    PathBuf::from(format!("/tmp/bstore-test-db-{}-{}.db", tag, std::process::id()))
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let db_path = scratch_db("create");

    // Ensure database doesn't exist
    let _ = std::fs::remove_file(&db_path);

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());

    assert!(db_path.exists(), "Database file was not created");

    // Cleanup
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_database_opens_existing() {
    let db_path = scratch_db("existing");
    let _ = std::fs::remove_file(&db_path);

    // Create database first time
    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());

    // Open database second time (should succeed)
    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());

    drop(pool1);
    drop(pool2);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_schema_tables_created() {
    let db_path = scratch_db("schema");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    for table in ["accounts", "profiles", "beats"] {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1, "Expected table {} to exist", table);
    }

    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_foreign_keys_enforced() {
    let db_path = scratch_db("fk");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    // A beat pointing at an unregistered account must be rejected
    let result = sqlx::query(
        r#"
        INSERT INTO beats (producer_guid, title, audio_file, audio_sha256, genre, bpm, created_at)
        VALUES ('no-such-account', 'Orphan', 'audio/x.mp3', 'deadbeef', 'trap', 140, '2026-01-01T00:00:00Z')
        "#,
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "Insert with unknown producer should violate the foreign key");

    let _ = std::fs::remove_file(&db_path);
}
