//! Postgres pool for the video repository.
//!
//! Migrations are compiled into the binary from the workspace `migrations/`
//! directory, so a deployed binary needs nothing on disk besides its config.

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tubely_core::Config;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Idle connections are recycled after this long
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Connections are never kept longer than this
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Pool sizing and timeouts from configuration.
fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
}

/// Connect to `DATABASE_URL` and bring the `videos` schema up to date.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let pool = pool_options(config)
        .connect(config.database_url())
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        acquire_timeout_secs = config.db_timeout_seconds(),
        "Video database connected"
    );

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        migrations = MIGRATOR.iter().count(),
        "Video schema up to date"
    );

    Ok(pool)
}
