//! Registration and profile endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::profiles::ProfileUpdate;
use crate::error::ApiResult;
use crate::services::catalog::ProfileView;
use crate::AppState;
use bstore_common::db::models::Profile;

/// Registration intake payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub account_id: Uuid,
}

/// POST /api/register
///
/// Creates the account and its empty profile in one step.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let account_id = state.marketplace.register(&payload.username).await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { account_id })))
}

/// GET /api/profile/{account_id}
///
/// The caller's own profile and catalog, newest first.
pub async fn profile(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> ApiResult<Json<ProfileView>> {
    let view = state.marketplace.browse_profile(account_id).await?;
    Ok(Json(view))
}

/// PUT /api/profile/{account_id}
///
/// Replaces the mutable profile fields and returns the updated profile.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
    Json(changes): Json<ProfileUpdate>,
) -> ApiResult<Json<Profile>> {
    state.marketplace.edit_profile(account_id, &changes).await?;
    let view = state.marketplace.browse_profile(account_id).await?;
    Ok(Json(view.profile))
}

/// Build registration and profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/profile/:account_id", get(profile).put(update_profile))
}
