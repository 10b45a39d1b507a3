//! Storage setup and initialization

use crate::services::upload::AssetClass;
use anyhow::Result;
use std::sync::Arc;
use tubely_core::{Config, StorageBackend};
use tubely_storage::{create_storage, InMemoryStorage, Storage};

/// Build the thumbnail and video asset classes from configuration.
///
/// Both classes share a single in-memory store when both select the memory
/// backend, so one `/api/thumbnails` route can serve either.
pub async fn setup_asset_classes(config: &Config) -> Result<(AssetClass, AssetClass)> {
    tracing::info!("Initializing storage backends...");
    let shared_memory = InMemoryStorage::new(config.storage().memory_base_url.clone());

    let thumbnail_storage =
        storage_for(config, config.thumbnails().backend, &shared_memory).await?;
    let video_storage = storage_for(config, config.videos().backend, &shared_memory).await?;

    tracing::info!(
        thumbnail_backend = %thumbnail_storage.backend_type(),
        thumbnail_key_strategy = %config.thumbnails().key_strategy,
        video_backend = %video_storage.backend_type(),
        video_key_strategy = %config.videos().key_strategy,
        "Storage backends initialized successfully"
    );

    Ok((
        AssetClass::thumbnail(config.thumbnails(), thumbnail_storage),
        AssetClass::video(config.videos(), video_storage),
    ))
}

async fn storage_for(
    config: &Config,
    backend: StorageBackend,
    shared_memory: &InMemoryStorage,
) -> Result<Arc<dyn Storage>> {
    match backend {
        StorageBackend::Memory => Ok(Arc::new(shared_memory.clone())),
        other => Ok(create_storage(config.storage(), other).await?),
    }
}
