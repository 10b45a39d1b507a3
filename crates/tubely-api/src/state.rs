//! Application state shared by handlers.

use std::sync::Arc;

use tubely_db::VideoRepository;

use crate::auth::JwtValidator;
use crate::services::upload::{AssetClass, UploadPipeline};

#[derive(Clone)]
pub struct AppState {
    pub uploads: UploadPipeline,
    pub thumbnails: AssetClass,
    pub video_files: AssetClass,
    pub jwt: Arc<JwtValidator>,
}

impl AppState {
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        jwt: JwtValidator,
        thumbnails: AssetClass,
        video_files: AssetClass,
    ) -> Self {
        Self {
            uploads: UploadPipeline::new(videos),
            thumbnails,
            video_files,
            jwt: Arc::new(jwt),
        }
    }
}
