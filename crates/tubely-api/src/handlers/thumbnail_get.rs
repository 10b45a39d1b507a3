use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tubely_storage::AssetKey;

/// GET /api/thumbnails/{key}
///
/// Serves a thumbnail straight from the thumbnail backend. This is the route
/// in-memory thumbnail URLs point at.
#[tracing::instrument(skip(state))]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, HttpAppError> {
    let asset = state.thumbnails.storage.read(&AssetKey::new(key)).await?;

    Ok((
        [
            (header::CONTENT_TYPE, asset.content_type),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        asset.data,
    )
        .into_response())
}
