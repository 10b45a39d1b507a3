//! In-memory video repository for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tubely_core::models::{AssetSlot, Video};
use tubely_core::AppError;
use uuid::Uuid;

use crate::video::VideoRepository;

/// Map-backed [`VideoRepository`].
///
/// `fail_updates(true)` makes every subsequent `update_asset_url` return a database
/// error, for exercising the path where an asset is written but the record is
/// not.
#[derive(Clone, Default)]
pub struct MemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
    fail_updates: Arc<AtomicBool>,
}

impl MemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, video: Video) {
        self.videos.write().await.insert(video.id, video);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl VideoRepository for MemoryVideoRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn update_asset_url(
        &self,
        id: Uuid,
        slot: AssetSlot,
        url: &str,
    ) -> Result<Video, AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut videos = self.videos.write().await;
        let video = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;
        video.set_asset_url(slot, url.to_string());
        Ok(video.clone())
    }
}
