//! Shared database models

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Registered account
///
/// Identity (credentials, sessions) is owned by the external account
/// directory; this row exists for ownership binding and the
/// one-profile-per-account invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub guid: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Extended public information for one account (exactly one per account)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub account_guid: Uuid,
    /// Avatar image reference (media path or URL)
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub soundcloud: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog entry: an uploaded audio track with marketplace metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beat {
    /// Store-assigned identifier, monotonic (SQLite AUTOINCREMENT)
    pub id: i64,
    /// Owning account, immutable after insert
    pub producer: Uuid,
    pub title: String,
    /// Relative media path of the audio file
    pub audio_file: String,
    /// SHA-256 of the uploaded audio content
    pub audio_sha256: String,
    /// Relative media path of the cover image, if one was uploaded
    pub cover_image: Option<String>,
    pub price: f64,
    pub genre: Genre,
    pub bpm: i64,
    pub description: Option<String>,
    /// Order-irrelevant, deduplicated tag set
    pub tags: Vec<String>,
    pub free_download: bool,
    pub plays: i64,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Closed genre vocabulary for catalog entries
///
/// Serialized as a lowercase slug; parsing accepts common alternate
/// spellings ("lofi", "hiphop", "rnb").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "trap")]
    Trap,
    #[serde(rename = "drill")]
    Drill,
    #[serde(rename = "hip-hop")]
    HipHop,
    #[serde(rename = "rnb")]
    Rnb,
    #[serde(rename = "lo-fi")]
    LoFi,
    #[serde(rename = "house")]
    House,
    #[serde(rename = "pop")]
    Pop,
    #[serde(rename = "ambient")]
    Ambient,
    #[serde(rename = "other")]
    Other,
}

impl Genre {
    pub const ALL: [Genre; 9] = [
        Genre::Trap,
        Genre::Drill,
        Genre::HipHop,
        Genre::Rnb,
        Genre::LoFi,
        Genre::House,
        Genre::Pop,
        Genre::Ambient,
        Genre::Other,
    ];

    /// Canonical slug stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Trap => "trap",
            Genre::Drill => "drill",
            Genre::HipHop => "hip-hop",
            Genre::Rnb => "rnb",
            Genre::LoFi => "lo-fi",
            Genre::House => "house",
            Genre::Pop => "pop",
            Genre::Ambient => "ambient",
            Genre::Other => "other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trap" => Ok(Genre::Trap),
            "drill" => Ok(Genre::Drill),
            "hip-hop" | "hiphop" | "hip hop" => Ok(Genre::HipHop),
            "rnb" | "r&b" => Ok(Genre::Rnb),
            "lo-fi" | "lofi" | "lo fi" => Ok(Genre::LoFi),
            "house" => Ok(Genre::House),
            "pop" => Ok(Genre::Pop),
            "ambient" => Ok(Genre::Ambient),
            "other" => Ok(Genre::Other),
            unknown => Err(format!("unknown genre: {}", unknown)),
        }
    }
}

/// Serialize a timestamp the way the database stores it (RFC 3339, UTC,
/// microsecond precision — lexicographic order matches chronological)
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp
///
/// Accepts RFC 3339 (what the service writes) and SQLite's
/// `CURRENT_TIMESTAMP` format (what column defaults write).
pub fn parse_timestamp(raw: &str) -> crate::Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| crate::Error::Internal(format!("Unparseable timestamp {:?}: {}", raw, e)))
}
