//! Configuration module
//!
//! Settings are read from the environment (optionally seeded from a `.env`
//! file) once at startup. Storage backend, size limit, allowed media types, and
//! key strategy are configured separately for thumbnails and videos.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use crate::storage_types::{KeyStrategy, StorageBackend};
use crate::validation::MediaPolicy;

// Common constants
const DEFAULT_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ASSETS_ROOT: &str = "./assets";
const MIN_JWT_SECRET_LEN: usize = 32;

const THUMBNAIL_MAX_SIZE_MB: u64 = 10;
const THUMBNAIL_CONTENT_TYPES: &str = "image/jpeg,image/png";
const VIDEO_MAX_SIZE_MB: u64 = 1024;
const VIDEO_CONTENT_TYPES: &str = "video/mp4";

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub environment: String,
}

/// Settings every storage backend variant may draw from.
#[derive(Clone, Debug)]
pub struct StorageSettings {
    /// Root directory of the local backend, also served under `/assets`.
    pub assets_root: PathBuf,
    pub local_base_url: String,
    pub memory_base_url: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, R2, ...)
    pub s3_endpoint: Option<String>,
    /// Public or CDN base URL placed in front of object keys
    pub s3_public_base_url: Option<String>,
}

impl StorageSettings {
    /// Defaults for a server listening on `port`.
    pub fn for_port(port: u16) -> Self {
        Self {
            assets_root: PathBuf::from(DEFAULT_ASSETS_ROOT),
            local_base_url: format!("http://localhost:{}/assets", port),
            memory_base_url: format!("http://localhost:{}/api/thumbnails", port),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            s3_public_base_url: None,
        }
    }
}

/// Per asset class settings (thumbnails, videos)
#[derive(Clone, Debug)]
pub struct AssetClassConfig {
    pub backend: StorageBackend,
    pub max_size_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub key_strategy: KeyStrategy,
}

impl AssetClassConfig {
    pub fn policy(&self) -> MediaPolicy {
        MediaPolicy::new(self.max_size_bytes, self.allowed_content_types.clone())
    }

    fn from_source(
        source: &impl Fn(&str) -> Option<String>,
        prefix: &str,
        default_backend: StorageBackend,
        default_max_mb: u64,
        default_content_types: &str,
    ) -> Result<Self, anyhow::Error> {
        let var = |name: &str| source(&format!("{}_{}", prefix, name));

        let backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => default_backend,
        };

        let max_size_mb = match var("MAX_SIZE_MB") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!(
                    "{}_MAX_SIZE_MB must be a whole number of megabytes, got {:?}",
                    prefix,
                    value
                )
            })?,
            None => default_max_mb,
        };

        let allowed_content_types = var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|| default_content_types.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let key_strategy = match var("KEY_STRATEGY") {
            Some(value) => value.parse::<KeyStrategy>()?,
            None => KeyStrategy::default(),
        };

        Ok(Self {
            backend,
            max_size_bytes: max_size_mb.saturating_mul(1024 * 1024),
            allowed_content_types,
            key_strategy,
        })
    }
}

/// Full application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub database_url: String,
    pub storage: StorageSettings,
    pub thumbnails: AssetClassConfig,
    pub videos: AssetClassConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_source(|name| env::var(name).ok())
    }

    /// Build from any variable source. Used by `from_env` and by tests.
    pub fn from_source(source: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let environment = source("ENVIRONMENT")
            .or_else(|| source("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = source("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let server_port: u16 = source("PORT")
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let base = BaseConfig {
            server_port,
            cors_origins,
            db_max_connections: source("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid number"))?,
            db_timeout_seconds: source("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_TIMEOUT_SECONDS must be a valid number"))?,
            jwt_secret: source("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            environment,
        };

        let database_url = source("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let defaults = StorageSettings::for_port(server_port);
        let storage = StorageSettings {
            assets_root: source("ASSETS_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_root),
            local_base_url: source("LOCAL_STORAGE_BASE_URL").unwrap_or(defaults.local_base_url),
            memory_base_url: source("MEMORY_STORAGE_BASE_URL")
                .unwrap_or(defaults.memory_base_url),
            s3_bucket: source("S3_BUCKET"),
            s3_region: source("S3_REGION").or_else(|| source("AWS_REGION")),
            s3_endpoint: source("S3_ENDPOINT"),
            s3_public_base_url: source("S3_PUBLIC_BASE_URL"),
        };

        let thumbnails = AssetClassConfig::from_source(
            &source,
            "THUMBNAIL",
            StorageBackend::Local,
            THUMBNAIL_MAX_SIZE_MB,
            THUMBNAIL_CONTENT_TYPES,
        )?;
        let videos = AssetClassConfig::from_source(
            &source,
            "VIDEO",
            StorageBackend::S3,
            VIDEO_MAX_SIZE_MB,
            VIDEO_CONTENT_TYPES,
        )?;

        Ok(Self {
            base,
            database_url,
            storage,
            thumbnails,
            videos,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        for (name, class) in [("THUMBNAIL", &self.thumbnails), ("VIDEO", &self.videos)] {
            if class.max_size_bytes == 0 {
                return Err(anyhow::anyhow!("{}_MAX_SIZE_MB must be positive", name));
            }
            if class.allowed_content_types.is_empty() {
                return Err(anyhow::anyhow!(
                    "{}_ALLOWED_CONTENT_TYPES must list at least one media type",
                    name
                ));
            }
            if class.backend == StorageBackend::S3 {
                if self.storage.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when {}_STORAGE_BACKEND is s3",
                        name
                    ));
                }
                if self.storage.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when {}_STORAGE_BACKEND is s3",
                        name
                    ));
                }
            }
        }

        Ok(())
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AppConfig>);

impl Config {
    fn inner(&self) -> &AppConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.inner().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = AppConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    /// Build from an explicit set of variables, ignoring the process environment.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, anyhow::Error> {
        let config = AppConfig::from_source(|name| vars.get(name).cloned())?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().base.jwt_secret
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn storage(&self) -> &StorageSettings {
        &self.inner().storage
    }

    pub fn assets_root(&self) -> &PathBuf {
        &self.inner().storage.assets_root
    }

    pub fn thumbnails(&self) -> &AssetClassConfig {
        &self.inner().thumbnails
    }

    pub fn videos(&self) -> &AssetClassConfig {
        &self.inner().videos
    }
}
