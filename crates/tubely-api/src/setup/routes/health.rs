//! Health check handler.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: &'static str,
    pub thumbnail_storage: String,
    pub video_storage: String,
}

/// Liveness check with the configured storage backend per asset class.
pub(super) async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthCheckResponse {
            status: "healthy",
            thumbnail_storage: state.thumbnails.storage.backend_type().to_string(),
            video_storage: state.video_files.storage.backend_type().to_string(),
        }),
    )
}
