//! Tubely Storage Library
//!
//! This crate provides the asset storage abstraction and its backends: local
//! filesystem, an in-process map, and S3-compatible object storage.
//!
//! # Asset keys
//!
//! Keys are flat, backend-relative names built from an owner identifier (or a
//! random token) and an extension derived from the media type, e.g.
//! `3f0c...e1.png`. Key derivation lives in the `keys` module so every backend
//! sees the same layout.
//!
//! Keys must not contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{key_deriver_for, media_type_extension, DeterministicKeys, KeyDeriver, RandomKeys};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::InMemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{AssetKey, Storage, StorageError, StorageLocation, StorageResult, StoredAsset};
pub use tubely_core::{KeyStrategy, StorageBackend};
