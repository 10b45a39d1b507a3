use crate::traits::{check_key, AssetKey, Storage, StorageError, StorageLocation, StorageResult, StoredAsset};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process storage.
///
/// Assets live in one map behind a single `RwLock` for the lifetime of the
/// process; only a restart clears it. Clones share the same map, so setup
/// creates one instance and hands it to every asset class that uses it.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    assets: Arc<RwLock<HashMap<AssetKey, StoredAsset>>>,
    base_url: String,
}

impl InMemoryStorage {
    /// # Arguments
    /// * `base_url` - Base URL of the route serving this store (e.g., "http://localhost:8091/api/thumbnails")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            assets: Arc::new(RwLock::new(HashMap::new())),
            base_url: base_url.into(),
        }
    }

    pub async fn len(&self) -> usize {
        self.assets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.assets.read().await.is_empty()
    }

    pub async fn contains(&self, key: &AssetKey) -> bool {
        self.assets.read().await.contains_key(key)
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn write(
        &self,
        key: &AssetKey,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<StorageLocation> {
        check_key(key)?;
        let size = data.len();

        let replaced = {
            let mut assets = self.assets.write().await;
            assets
                .insert(
                    key.clone(),
                    StoredAsset {
                        data,
                        content_type: content_type.to_string(),
                    },
                )
                .is_some()
        };

        tracing::info!(key = %key, size_bytes = size, replaced, "In-memory write successful");

        Ok(StorageLocation::Memory(key.clone()))
    }

    fn resolve_url(&self, key: &AssetKey) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn read(&self, key: &AssetKey) -> StorageResult<StoredAsset> {
        let assets = self.assets.read().await;
        assets
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> InMemoryStorage {
        InMemoryStorage::new("http://localhost:8091/api/thumbnails")
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let storage = storage();
        let key = AssetKey::from("v1.png");

        let location = storage
            .write(&key, Bytes::from_static(b"png-bytes"), "image/png")
            .await
            .unwrap();
        assert_eq!(location, StorageLocation::Memory(key.clone()));

        let asset = storage.read(&key).await.unwrap();
        assert_eq!(asset.data, Bytes::from_static(b"png-bytes"));
        assert_eq!(asset.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let err = storage().read(&AssetKey::from("nope.png")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_overwrite_replaces_data_and_type() {
        let storage = storage();
        let key = AssetKey::from("v1.bin");

        storage
            .write(&key, Bytes::from_static(b"one"), "image/png")
            .await
            .unwrap();
        storage
            .write(&key, Bytes::from_static(b"two"), "image/jpeg")
            .await
            .unwrap();

        let asset = storage.read(&key).await.unwrap();
        assert_eq!(asset.data, Bytes::from_static(b"two"));
        assert_eq!(asset.content_type, "image/jpeg");
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_the_map() {
        let storage = storage();
        let other = storage.clone();
        let key = AssetKey::from("shared.png");

        storage
            .write(&key, Bytes::from_static(b"x"), "image/png")
            .await
            .unwrap();

        assert!(other.contains(&key).await);
    }

    #[tokio::test]
    async fn test_resolve_url() {
        assert_eq!(
            storage().resolve_url(&AssetKey::from("v1.png")),
            "http://localhost:8091/api/thumbnails/v1.png"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_distinct_keys_all_persist() {
        let storage = storage();

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let storage = storage.clone();
                tokio::spawn(async move {
                    let key = AssetKey::new(format!("video-{}.png", i));
                    storage
                        .write(&key, Bytes::from(vec![i as u8; 16]), "image/png")
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(storage.len().await, 64);
        for i in 0..64 {
            let asset = storage
                .read(&AssetKey::new(format!("video-{}.png", i)))
                .await
                .unwrap();
            assert_eq!(asset.data, Bytes::from(vec![i as u8; 16]));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_key_leaves_one_complete_value() {
        let storage = storage();
        let key = AssetKey::from("race.png");

        let handles: Vec<_> = (0..32u8)
            .map(|i| {
                let storage = storage.clone();
                let key = key.clone();
                tokio::spawn(async move {
                    storage
                        .write(&key, Bytes::from(vec![i; 1024]), "image/png")
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let asset = storage.read(&key).await.unwrap();
        assert_eq!(asset.data.len(), 1024);
        let first = asset.data[0];
        assert!(asset.data.iter().all(|b| *b == first));
        assert_eq!(storage.len().await, 1);
    }
}
