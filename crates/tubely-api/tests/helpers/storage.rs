//! Storage test doubles.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use tubely_core::StorageBackend;
use tubely_storage::{AssetKey, Storage, StorageError, StorageLocation, StorageResult, StoredAsset};

/// Storage whose writes always fail. Counts attempts.
#[derive(Default)]
pub struct FailingStorage {
    pub write_attempts: AtomicUsize,
}

impl FailingStorage {
    pub fn attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn write(
        &self,
        key: &AssetKey,
        _data: Bytes,
        _content_type: &str,
    ) -> StorageResult<StorageLocation> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::WriteFailed(format!("disk full writing {}", key)))
    }

    fn resolve_url(&self, key: &AssetKey) -> String {
        format!("http://failing.invalid/{}", key)
    }

    async fn read(&self, key: &AssetKey) -> StorageResult<StoredAsset> {
        Err(StorageError::NotFound(key.to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
