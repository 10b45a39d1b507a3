//! Application setup and initialization
//!
//! This module contains all application initialization logic, kept out of
//! main.rs so tests can build the same router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::JwtValidator;
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::PgVideoRepository;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    // Setup database
    let pool = database::setup_database(&config).await?;
    let videos = Arc::new(PgVideoRepository::new(pool));

    // Setup storage
    let (thumbnails, video_files) = storage::setup_asset_classes(&config).await?;

    let state = Arc::new(AppState::new(
        videos,
        JwtValidator::new(config.jwt_secret()),
        thumbnails,
        video_files,
    ));

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
