//! Beat catalog persistence
//!
//! Keyed storage for catalog entries. Identifiers are assigned by SQLite
//! (`AUTOINCREMENT`, monotonic); the producer binding and creation
//! timestamp are fixed at insert time and never updated afterwards.

use bstore_common::db::models::{format_timestamp, parse_timestamp, Beat, Genre};
use bstore_common::{Error, Result};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Insert payload for a new catalog row (media blobs already persisted,
/// paths in hand)
#[derive(Debug, Clone)]
pub struct NewBeat {
    pub title: String,
    pub audio_file: String,
    pub audio_sha256: String,
    pub cover_image: Option<String>,
    pub price: f64,
    pub genre: Genre,
    pub bpm: i64,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub free_download: bool,
}

/// Filter over catalog listings; criteria are conjunctive
#[derive(Debug, Clone, Copy, Default)]
pub struct BeatFilter {
    pub producer: Option<Uuid>,
    pub genre: Option<Genre>,
    pub featured: Option<bool>,
    /// Leave out one specific beat (a detail page excludes itself from
    /// its related picks)
    pub exclude_id: Option<i64>,
}

/// Listing order
///
/// Equal sort keys fall back to `id`: descending orders prefer the
/// newest entry, the default order is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeatOrder {
    /// Insertion order (id ascending)
    #[default]
    Default,
    /// Newest first
    CreatedDesc,
    /// Most played first
    PlaysDesc,
}

impl BeatOrder {
    fn sql(&self) -> &'static str {
        match self {
            BeatOrder::Default => " ORDER BY id ASC",
            BeatOrder::CreatedDesc => " ORDER BY created_at DESC, id DESC",
            BeatOrder::PlaysDesc => " ORDER BY plays DESC, id DESC",
        }
    }
}

const BEAT_COLUMNS: &str = "id, producer_guid, title, audio_file, audio_sha256, cover_image, \
     price, genre, bpm, description, tags, free_download, plays, is_featured, created_at";

/// Insert a beat, binding `producer` as its immutable owner
///
/// Assigns the creation timestamp and returns the store-assigned id.
/// An unregistered producer violates the foreign key and surfaces as a
/// database error.
pub async fn insert_beat(pool: &SqlitePool, beat: &NewBeat, producer: Uuid) -> Result<i64> {
    let tags = serde_json::to_string(&beat.tags)
        .map_err(|e| Error::Internal(format!("Failed to serialize tags: {}", e)))?;
    let created_at = format_timestamp(Utc::now());

    let result = sqlx::query(
        r#"
        INSERT INTO beats (
            producer_guid, title, audio_file, audio_sha256, cover_image,
            price, genre, bpm, description, tags, free_download, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(producer.to_string())
    .bind(&beat.title)
    .bind(&beat.audio_file)
    .bind(&beat.audio_sha256)
    .bind(&beat.cover_image)
    .bind(beat.price)
    .bind(beat.genre.as_str())
    .bind(beat.bpm)
    .bind(&beat.description)
    .bind(&tags)
    .bind(beat.free_download as i64)
    .bind(&created_at)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Load a beat by id
pub async fn get_beat(pool: &SqlitePool, id: i64) -> Result<Option<Beat>> {
    let sql = format!("SELECT {} FROM beats WHERE id = ?", BEAT_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    match row {
        Some(row) => Ok(Some(beat_from_row(&row)?)),
        None => Ok(None),
    }
}

/// List beats matching `filter`, in `order`, bounded by `limit`
pub async fn list_beats(
    pool: &SqlitePool,
    filter: BeatFilter,
    order: BeatOrder,
    limit: Option<u32>,
) -> Result<Vec<Beat>> {
    let mut sql = format!("SELECT {} FROM beats", BEAT_COLUMNS);

    let mut clauses: Vec<&str> = Vec::new();
    if filter.producer.is_some() {
        clauses.push("producer_guid = ?");
    }
    if filter.genre.is_some() {
        clauses.push("genre = ?");
    }
    if filter.featured.is_some() {
        clauses.push("is_featured = ?");
    }
    if filter.exclude_id.is_some() {
        clauses.push("id <> ?");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    sql.push_str(order.sql());
    if limit.is_some() {
        sql.push_str(" LIMIT ?");
    }

    let mut query = sqlx::query(&sql);
    if let Some(producer) = filter.producer {
        query = query.bind(producer.to_string());
    }
    if let Some(genre) = filter.genre {
        query = query.bind(genre.as_str());
    }
    if let Some(featured) = filter.featured {
        query = query.bind(featured as i64);
    }
    if let Some(exclude_id) = filter.exclude_id {
        query = query.bind(exclude_id);
    }
    if let Some(limit) = limit {
        query = query.bind(limit as i64);
    }

    let rows = query.fetch_all(pool).await?;
    rows.iter().map(beat_from_row).collect()
}

fn beat_from_row(row: &SqliteRow) -> Result<Beat> {
    let producer_str: String = row.get("producer_guid");
    let producer = Uuid::parse_str(&producer_str)
        .map_err(|e| Error::Internal(format!("Bad producer guid {:?}: {}", producer_str, e)))?;

    let genre_str: String = row.get("genre");
    let genre = genre_str
        .parse::<Genre>()
        .map_err(|e| Error::Internal(format!("Bad genre in catalog row: {}", e)))?;

    let tags_json: String = row.get("tags");
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| Error::Internal(format!("Bad tags in catalog row: {}", e)))?;

    let created_raw: String = row.get("created_at");

    Ok(Beat {
        id: row.get("id"),
        producer,
        title: row.get("title"),
        audio_file: row.get("audio_file"),
        audio_sha256: row.get("audio_sha256"),
        cover_image: row.get("cover_image"),
        price: row.get("price"),
        genre,
        bpm: row.get("bpm"),
        description: row.get("description"),
        tags,
        free_download: row.get::<i64, _>("free_download") != 0,
        plays: row.get("plays"),
        is_featured: row.get::<i64, _>("is_featured") != 0,
        created_at: parse_timestamp(&created_raw)?,
    })
}
