use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::Video;

/// POST /api/thumbnail_upload/{video_id}
///
/// Multipart body with the image in the `thumbnail` field. Responds with the
/// updated video record.
#[tracing::instrument(
    skip(state, auth, multipart),
    fields(
        video_id = %video_id,
        user_id = %auth.user_id,
        operation = "upload_thumbnail"
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let video = state
        .uploads
        .upload(&state.thumbnails, video_id, auth.user_id, multipart)
        .await?;

    Ok(Json(video))
}
