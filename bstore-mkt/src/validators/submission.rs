//! Beat submission validation
//!
//! Turns an untrusted upload-form submission into a typed record, or
//! reports the first offending field. Pure: no database access, no side
//! effects, nothing retained between calls. Persistence is the caller's
//! responsibility.

use bstore_common::db::models::Genre;
use thiserror::Error;

/// Size ceiling for the audio payload (50 MB)
pub const MAX_AUDIO_BYTES: u64 = 50 * 1024 * 1024;

/// Size ceiling for the cover image payload (5 MB)
pub const MAX_COVER_BYTES: u64 = 5 * 1024 * 1024;

/// Validation failure, surfaced to the submitting caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or malformed
    #[error("missing or malformed field: {0}")]
    InvalidSubmission(&'static str),

    /// An uploaded payload exceeds its size ceiling
    #[error("{field} payload exceeds limit of {limit} bytes")]
    PayloadTooLarge { field: &'static str, limit: u64 },
}

/// Uploaded file payload: opaque bytes plus the client-declared filename
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedBlob {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedBlob {
    pub fn new(filename: Option<String>, bytes: Vec<u8>) -> Self {
        Self { filename, bytes }
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Sanitized lower-case extension of the declared filename, if any.
    /// Only short alphanumeric extensions are accepted; anything else is
    /// treated as having none.
    pub fn extension(&self) -> Option<String> {
        let name = self.filename.as_deref()?;
        let ext = name.rsplit_once('.')?.1;
        if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Raw submission as it arrives from the upload form
///
/// Every field is optional and unparsed; the validator decides what is
/// missing versus malformed.
#[derive(Debug, Clone, Default)]
pub struct BeatSubmission {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub bpm: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    /// Comma-separated tag list, the upload form's convention
    pub tags: Option<String>,
    pub free_download: Option<String>,
    pub audio: Option<UploadedBlob>,
    pub cover: Option<UploadedBlob>,
}

/// Submission that passed validation; ready for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub title: String,
    pub genre: Genre,
    pub bpm: i64,
    pub price: f64,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub free_download: bool,
    pub audio: UploadedBlob,
    pub cover: Option<UploadedBlob>,
}

/// Validate a candidate submission
///
/// Required scalars are checked first, then the payload ceilings; the
/// first failure wins. A present-but-empty cover field counts as no
/// cover (the form submits one either way).
pub fn validate_submission(
    submission: BeatSubmission,
) -> Result<ValidatedSubmission, ValidationError> {
    let title = submission
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ValidationError::InvalidSubmission("title"))?
        .to_string();

    let genre = submission
        .genre
        .as_deref()
        .filter(|g| !g.trim().is_empty())
        .ok_or(ValidationError::InvalidSubmission("genre"))?
        .parse::<Genre>()
        .map_err(|_| ValidationError::InvalidSubmission("genre"))?;

    let bpm = submission
        .bpm
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or(ValidationError::InvalidSubmission("bpm"))?
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidSubmission("bpm"))?;
    if bpm <= 0 {
        return Err(ValidationError::InvalidSubmission("bpm"));
    }

    // Price defaults to 0 when the field is left blank
    let price = match submission.price.as_deref().map(str::trim) {
        None | Some("") => 0.0,
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidSubmission("price"))?,
    };
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidSubmission("price"));
    }

    let description = submission
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let tags = parse_tags(submission.tags.as_deref().unwrap_or(""));

    let free_download = match submission.free_download.as_deref().map(str::trim) {
        None | Some("") => false,
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => true,
            "false" | "0" | "off" | "no" => false,
            _ => return Err(ValidationError::InvalidSubmission("free_download")),
        },
    };

    let audio = submission
        .audio
        .filter(|blob| !blob.is_empty())
        .ok_or(ValidationError::InvalidSubmission("audio"))?;
    if audio.len() > MAX_AUDIO_BYTES {
        return Err(ValidationError::PayloadTooLarge {
            field: "audio",
            limit: MAX_AUDIO_BYTES,
        });
    }

    let cover = submission.cover.filter(|blob| !blob.is_empty());
    if let Some(ref blob) = cover {
        if blob.len() > MAX_COVER_BYTES {
            return Err(ValidationError::PayloadTooLarge {
                field: "cover",
                limit: MAX_COVER_BYTES,
            });
        }
    }

    Ok(ValidatedSubmission {
        title,
        genre,
        bpm,
        price,
        description,
        tags,
        free_download,
        audio,
        cover,
    })
}

/// Normalize a comma-separated tag list: trim, drop empties, dedupe.
/// Order carries no meaning; first occurrence is kept.
fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',') {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        let tag = tag.to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
