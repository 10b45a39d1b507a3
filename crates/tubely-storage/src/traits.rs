//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid asset key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Backend-relative identifier of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetKey(String);

impl AssetKey {
    pub fn new(key: impl Into<String>) -> Self {
        AssetKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for AssetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<String> for AssetKey {
    fn from(key: String) -> Self {
        AssetKey(key)
    }
}

impl From<&str> for AssetKey {
    fn from(key: &str) -> Self {
        AssetKey(key.to_string())
    }
}

impl AsRef<str> for AssetKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where a backend physically put an asset.
///
/// Only meaningful to the backend that produced it; callers log it and
/// otherwise pass it through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    File(PathBuf),
    Memory(AssetKey),
    Object { bucket: String, key: AssetKey },
}

impl Display for StorageLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageLocation::File(path) => write!(f, "file://{}", path.display()),
            StorageLocation::Memory(key) => write!(f, "memory://{}", key),
            StorageLocation::Object { bucket, key } => write!(f, "s3://{}/{}", bucket, key),
        }
    }
}

/// Asset bytes together with their media type, as returned by `read`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub data: Bytes,
    pub content_type: String,
}

/// Storage abstraction trait
///
/// All storage backends (local filesystem, in-process map, S3) implement this
/// trait, so the upload pipeline works with whichever backend an asset class is
/// configured for.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under `key`, replacing any existing asset with that key.
    ///
    /// On error nothing is guaranteed about partial state, but the caller must
    /// treat the asset as not written.
    async fn write(
        &self,
        key: &AssetKey,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<StorageLocation>;

    /// Client-facing URL for `key`. Pure: the same key always yields the same
    /// URL and no I/O is performed, whether or not the asset exists.
    fn resolve_url(&self, key: &AssetKey) -> String;

    /// Fetch the asset stored under `key`.
    async fn read(&self, key: &AssetKey) -> StorageResult<StoredAsset>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Reject keys that could escape a backend's namespace.
pub(crate) fn check_key(key: &AssetKey) -> StorageResult<()> {
    let key = key.as_str();
    if key.is_empty() || key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Asset key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key() {
        assert!(check_key(&AssetKey::from("abc.png")).is_ok());
        assert!(check_key(&AssetKey::from("nested/abc.png")).is_ok());
        assert!(check_key(&AssetKey::from("../etc/passwd")).is_err());
        assert!(check_key(&AssetKey::from("/etc/passwd")).is_err());
        assert!(check_key(&AssetKey::from("")).is_err());
    }

    #[test]
    fn test_location_display() {
        let location = StorageLocation::Object {
            bucket: "tubely".to_string(),
            key: AssetKey::from("v1.mp4"),
        };
        assert_eq!(location.to_string(), "s3://tubely/v1.mp4");
    }
}
