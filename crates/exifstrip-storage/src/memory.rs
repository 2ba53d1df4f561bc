use crate::keys::{validate_bucket, validate_key};
use crate::object::{get_object, object_content_type, object_exists, put_object};
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::memory::InMemory;
use object_store::ObjectStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage implementation
///
/// One `InMemory` store per bucket. Buckets spring into existence on first write;
/// reading from a bucket that was never written yields `NotFound`. Used for local
/// development and tests.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    buckets: Arc<RwLock<HashMap<String, Arc<InMemory>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    async fn existing_bucket(&self, bucket: &str) -> Option<Arc<InMemory>> {
        self.buckets.read().await.get(bucket).cloned()
    }

    async fn bucket_or_create(&self, bucket: &str) -> Arc<InMemory> {
        let mut buckets = self.buckets.write().await;
        buckets
            .entry(bucket.to_string())
            .or_insert_with(|| Arc::new(InMemory::new()))
            .clone()
    }

    /// Keys currently stored in `bucket`, sorted.
    pub async fn keys(&self, bucket: &str) -> StorageResult<Vec<String>> {
        let Some(store) = self.existing_bucket(bucket).await else {
            return Ok(Vec::new());
        };

        let mut keys: Vec<String> = store
            .list(None)
            .map_ok(|meta| meta.location.to_string())
            .try_collect()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        keys.sort();
        Ok(keys)
    }

    /// Content type recorded when the object was written.
    pub async fn content_type(&self, bucket: &str, key: &str) -> StorageResult<Option<String>> {
        let store = self
            .existing_bucket(bucket)
            .await
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", bucket, key)))?;
        object_content_type(store.as_ref(), bucket, key).await
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        let store = self
            .existing_bucket(bucket)
            .await
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", bucket, key)))?;
        get_object(store.as_ref(), "memory", bucket, key).await
    }

    async fn put(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> StorageResult<()> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        let store = self.bucket_or_create(bucket).await;
        put_object(store.as_ref(), "memory", bucket, key, data, content_type).await
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        match self.existing_bucket(bucket).await {
            Some(store) => object_exists(store.as_ref(), key).await,
            None => Ok(false),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
