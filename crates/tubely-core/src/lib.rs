//! Tubely Core Library
//!
//! This crate provides the domain model, error types, configuration, and media
//! validation shared by the storage, database, and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{AppConfig, AssetClassConfig, BaseConfig, Config, StorageSettings};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{AssetSlot, Video};
pub use storage_types::{KeyStrategy, StorageBackend};
pub use validation::{MediaPolicy, MediaValidator, ValidationError};
