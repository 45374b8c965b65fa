//! Account and profile persistence
//!
//! Registration intake: the account row and its (empty) profile are
//! created together, keeping the one-profile-per-account invariant out
//! of reach of partial failures.

use bstore_common::db::models::{format_timestamp, parse_timestamp, Profile};
use bstore_common::{Error, Result};
use chrono::Utc;
use serde::Deserialize;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Replacement values for the mutable profile fields
///
/// The edit form submits the full field set; a `None` clears the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub soundcloud: Option<String>,
}

/// Create an account and its empty profile, returning the new guid
///
/// Duplicate usernames are a conflict; nothing is written in that case.
pub async fn create_account(pool: &SqlitePool, username: &str) -> Result<Uuid> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::InvalidInput("username must not be empty".to_string()));
    }

    let guid = Uuid::new_v4();
    let now = format_timestamp(Utc::now());

    let mut tx = pool.begin().await?;

    let inserted = sqlx::query("INSERT INTO accounts (guid, username, created_at) VALUES (?, ?, ?)")
        .bind(guid.to_string())
        .bind(username)
        .bind(&now)
        .execute(&mut *tx)
        .await;

    if let Err(e) = inserted {
        if e.as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
        {
            return Err(Error::Conflict(format!("username already registered: {}", username)));
        }
        return Err(e.into());
    }

    sqlx::query("INSERT INTO profiles (account_guid, created_at, updated_at) VALUES (?, ?, ?)")
        .bind(guid.to_string())
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(guid)
}

/// Load the profile for an account
pub async fn get_profile(pool: &SqlitePool, account: Uuid) -> Result<Option<Profile>> {
    let row = sqlx::query(
        r#"
        SELECT account_guid, avatar, bio, website, instagram, twitter, soundcloud,
               created_at, updated_at
        FROM profiles
        WHERE account_guid = ?
        "#,
    )
    .bind(account.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let created_raw: String = row.get("created_at");
            let updated_raw: String = row.get("updated_at");
            Ok(Some(Profile {
                account_guid: account,
                avatar: row.get("avatar"),
                bio: row.get("bio"),
                website: row.get("website"),
                instagram: row.get("instagram"),
                twitter: row.get("twitter"),
                soundcloud: row.get("soundcloud"),
                created_at: parse_timestamp(&created_raw)?,
                updated_at: parse_timestamp(&updated_raw)?,
            }))
        }
        None => Ok(None),
    }
}

/// Replace the mutable profile fields and bump `updated_at`
pub async fn update_profile(
    pool: &SqlitePool,
    account: Uuid,
    changes: &ProfileUpdate,
) -> Result<()> {
    let updated_at = format_timestamp(Utc::now());

    let result = sqlx::query(
        r#"
        UPDATE profiles
        SET avatar = ?, bio = ?, website = ?, instagram = ?, twitter = ?, soundcloud = ?,
            updated_at = ?
        WHERE account_guid = ?
        "#,
    )
    .bind(&changes.avatar)
    .bind(&changes.bio)
    .bind(&changes.website)
    .bind(&changes.instagram)
    .bind(&changes.twitter)
    .bind(&changes.soundcloud)
    .bind(&updated_at)
    .bind(account.to_string())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("profile for account {}", account)));
    }

    Ok(())
}
