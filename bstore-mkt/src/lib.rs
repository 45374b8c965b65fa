//! bstore-mkt library interface
//!
//! Exposes the marketplace service for the binary and integration tests.

pub mod api;
pub mod db;
pub mod error;
pub mod services;
pub mod validators;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::Marketplace;

/// Upper bound for an incoming request body: the audio and cover
/// ceilings plus slack for the form fields
pub const MAX_REQUEST_BYTES: usize = 56 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Marketplace facade over the catalog/profile stores
    pub marketplace: Marketplace,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(marketplace: Marketplace) -> Self {
        Self {
            marketplace,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// API routes plus the read-only media mount (uploaded audio and cover
/// files are served from the media root, as the upload paths stored on
/// catalog rows expect).
pub fn build_router(state: AppState) -> Router {
    let media_dir = state.marketplace.media_root().to_path_buf();

    Router::new()
        .merge(api::profile_routes())
        .merge(api::beat_routes())
        .merge(api::health_routes())
        .nest_service("/media", ServeDir::new(media_dir))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
