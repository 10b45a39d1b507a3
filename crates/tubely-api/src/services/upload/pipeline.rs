//! Upload pipeline service

use std::sync::Arc;

use axum::extract::Multipart;
use tubely_core::models::Video;
use tubely_core::validation::normalize_media_type;
use tubely_core::AppError;
use tubely_db::VideoRepository;
use uuid::Uuid;

use crate::error::validation_error_to_app;
use crate::utils::upload::extract_form_file;

use super::types::AssetClass;

/// Stores an uploaded asset and points a video record at it.
#[derive(Clone)]
pub struct UploadPipeline {
    videos: Arc<dyn VideoRepository>,
}

impl UploadPipeline {
    pub fn new(videos: Arc<dyn VideoRepository>) -> Self {
        Self { videos }
    }

    /// Complete upload workflow: authorize → extract → validate → store → commit
    ///
    /// Ownership is checked before any of the body is read. The video record is
    /// only touched after the backend write succeeded. There are no retries; a
    /// failed commit leaves the written asset behind and is logged for
    /// reconciliation.
    pub async fn upload(
        &self,
        class: &AssetClass,
        video_id: Uuid,
        requester: Uuid,
        mut multipart: Multipart,
    ) -> Result<Video, AppError> {
        // 1. Authorize
        self.authorize(video_id, requester).await?;

        // 2. Extract
        let file = extract_form_file(
            &mut multipart,
            class.form_field,
            class.name,
            class.max_size_bytes(),
        )
        .await?;

        // 3. Validate
        class
            .validator
            .validate(file.data.len() as u64, &file.content_type)
            .map_err(validation_error_to_app)?;

        // 4. Derive key and write
        let media_type = normalize_media_type(&file.content_type);
        let key = class
            .key_deriver
            .derive_key(&video_id.to_string(), &media_type);
        let size_bytes = file.data.len();

        let location = class
            .storage
            .write(&key, file.data, &media_type)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    asset_class = class.name,
                    video_id = %video_id,
                    key = %key,
                    backend = %class.storage.backend_type(),
                    "Failed to write asset to storage"
                );
                AppError::StorageWrite(e.to_string())
            })?;

        tracing::info!(
            asset_class = class.name,
            video_id = %video_id,
            key = %key,
            location = %location,
            filename = %file.filename,
            size_bytes,
            "Asset stored"
        );

        // 5. Resolve URL and commit
        // Only this slot's column is written, so a concurrent upload to the
        // other slot keeps its URL.
        let url = class.storage.resolve_url(&key);

        self.videos
            .update_asset_url(video_id, class.slot, &url)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    asset_class = class.name,
                    video_id = %video_id,
                    key = %key,
                    backend = %class.storage.backend_type(),
                    "Asset written but video record not updated; orphaned asset needs reconciliation"
                );
                e
            })
    }

    async fn authorize(&self, video_id: Uuid, requester: Uuid) -> Result<(), AppError> {
        let video = self
            .videos
            .get(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

        if !video.is_owned_by(requester) {
            return Err(AppError::Forbidden(
                "You are not the owner of this video".to_string(),
            ));
        }

        Ok(())
    }
}
