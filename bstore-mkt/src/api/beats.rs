//! Catalog API endpoints: submission intake and browse views

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::services::catalog::{DetailView, HomeView};
use crate::validators::{BeatSubmission, UploadedBlob};
use crate::AppState;

/// Response payload for a successful submission
#[derive(Debug, Serialize)]
pub struct SubmitBeatResponse {
    pub beat_id: i64,
}

/// GET /api/home
pub async fn home(State(state): State<AppState>) -> ApiResult<Json<HomeView>> {
    let view = state.marketplace.browse_home().await?;
    Ok(Json(view))
}

/// GET /api/beats/{id}
pub async fn beat_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DetailView>> {
    let view = state.marketplace.browse_detail(id).await?;
    Ok(Json(view))
}

/// POST /api/beats
///
/// Multipart submission form. `producer_id` carries the authenticated
/// principal; the remaining fields mirror the upload form (`title`,
/// `genre`, `bpm`, `price`, `description`, `tags`, `free_download`,
/// `audio`, `cover`). Field-level validation is the validator's job —
/// this handler only collects the parts.
pub async fn submit_beat(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<SubmitBeatResponse>)> {
    let mut producer: Option<Uuid> = None;
    let mut submission = BeatSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "producer_id" => {
                let raw = read_text(field).await?;
                let parsed = Uuid::parse_str(raw.trim())
                    .map_err(|_| ApiError::BadRequest("producer_id must be a UUID".to_string()))?;
                producer = Some(parsed);
            }
            "title" => submission.title = Some(read_text(field).await?),
            "genre" => submission.genre = Some(read_text(field).await?),
            "bpm" => submission.bpm = Some(read_text(field).await?),
            "price" => submission.price = Some(read_text(field).await?),
            "description" => submission.description = Some(read_text(field).await?),
            "tags" => submission.tags = Some(read_text(field).await?),
            "free_download" => submission.free_download = Some(read_text(field).await?),
            "audio" => submission.audio = Some(read_blob(field).await?),
            "cover" => submission.cover = Some(read_blob(field).await?),
            // Unknown parts are dropped, not an error
            _ => {}
        }
    }

    let producer =
        producer.ok_or_else(|| ApiError::BadRequest("producer_id is required".to_string()))?;

    let beat_id = state.marketplace.submit_beat(producer, submission).await?;

    Ok((StatusCode::CREATED, Json(SubmitBeatResponse { beat_id })))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("unreadable form field: {}", e)))
}

async fn read_blob(field: axum::extract::multipart::Field<'_>) -> ApiResult<UploadedBlob> {
    let filename = field.file_name().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("unreadable file field: {}", e)))?;
    Ok(UploadedBlob::new(filename, bytes.to_vec()))
}

/// Build catalog routes
pub fn beat_routes() -> Router<AppState> {
    Router::new()
        .route("/api/home", get(home))
        .route("/api/beats", post(submit_beat))
        .route("/api/beats/:id", get(beat_detail))
}
