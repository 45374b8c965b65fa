//! Error types for bstore-mkt
//!
//! Maps validation and storage failures to HTTP responses with a JSON
//! `{"error": {"code", "message"}}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::marketplace::SubmitError;
use crate::validators::ValidationError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A required submission field is missing or malformed (400)
    #[error("Missing or malformed field: {0}")]
    InvalidSubmission(String),

    /// An uploaded payload exceeds its size ceiling (413)
    #[error("{field} payload exceeds limit of {limit} bytes")]
    PayloadTooLarge { field: String, limit: u64 },

    /// Malformed request outside the submission form (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Conflict (409) - e.g., username already registered
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Catalog or profile store backend failure (500)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::InvalidSubmission(field) => (
                StatusCode::BAD_REQUEST,
                "INVALID_SUBMISSION",
                format!("missing or malformed field: {}", field),
            ),
            ApiError::PayloadTooLarge { ref field, limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                format!("{} payload exceeds limit of {} bytes", field, limit),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidSubmission(field) => {
                ApiError::InvalidSubmission(field.to_string())
            }
            ValidationError::PayloadTooLarge { field, limit } => ApiError::PayloadTooLarge {
                field: field.to_string(),
                limit,
            },
        }
    }
}

impl From<bstore_common::Error> for ApiError {
    fn from(err: bstore_common::Error) -> Self {
        match err {
            bstore_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            bstore_common::Error::Conflict(msg) => ApiError::Conflict(msg),
            bstore_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            bstore_common::Error::Database(e) => ApiError::Storage(e.to_string()),
            bstore_common::Error::Io(e) => ApiError::Storage(e.to_string()),
            bstore_common::Error::Config(msg) | bstore_common::Error::Internal(msg) => {
                ApiError::Internal(msg)
            }
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(e) => e.into(),
            SubmitError::Storage(e) => e.into(),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
