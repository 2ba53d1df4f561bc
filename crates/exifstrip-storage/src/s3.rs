use crate::keys::{validate_bucket, validate_key};
use crate::object::{get_object, object_exists, put_object};
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// S3 storage implementation
///
/// `object_store` clients are bound to a single bucket, so one client is built per
/// bucket on first use and cached for the life of the process.
pub struct S3Storage {
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    stores: RwLock<HashMap<String, Arc<AmazonS3>>>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    ///
    /// Credentials come from the standard AWS environment variables.
    pub fn new(region: String, endpoint_url: Option<String>) -> Self {
        S3Storage {
            region,
            endpoint_url,
            stores: RwLock::new(HashMap::new()),
        }
    }

    fn build_store(&self, bucket: &str) -> StorageResult<AmazonS3> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(self.region.clone())
            .with_bucket_name(bucket.to_string());

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }

    async fn store_for(&self, bucket: &str) -> StorageResult<Arc<AmazonS3>> {
        validate_bucket(bucket)?;

        if let Some(store) = self.stores.read().await.get(bucket) {
            return Ok(store.clone());
        }

        let mut stores = self.stores.write().await;
        if let Some(store) = stores.get(bucket) {
            return Ok(store.clone());
        }

        let store = Arc::new(self.build_store(bucket)?);
        tracing::debug!(
            bucket = %bucket,
            region = %self.region,
            endpoint = ?self.endpoint_url,
            "Created S3 client for bucket"
        );
        stores.insert(bucket.to_string(), store.clone());
        Ok(store)
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        validate_key(key)?;
        let store = self.store_for(bucket).await?;
        get_object(store.as_ref(), "s3", bucket, key).await
    }

    async fn put(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> StorageResult<()> {
        validate_key(key)?;
        let store = self.store_for(bucket).await?;
        put_object(store.as_ref(), "s3", bucket, key, data, content_type).await
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        let store = self.store_for(bucket).await?;
        object_exists(store.as_ref(), key).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
