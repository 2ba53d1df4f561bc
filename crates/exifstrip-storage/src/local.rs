use crate::keys::{validate_bucket, validate_key};
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Objects live at `{base_path}/{bucket}/{key}`. Content types are not persisted.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding one sub-directory per bucket
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert bucket and key to a filesystem path inside the base directory
    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        Ok(self.base_path.join(bucket).join(key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    fn temp_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!(".{}.partial", name))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        let path = self.object_path(bucket, key)?;
        let start = std::time::Instant::now();

        let data = fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(format!("{}/{}", bucket, key)),
            ErrorKind::PermissionDenied => StorageError::AccessDenied(format!("{}/{}", bucket, key)),
            _ => StorageError::DownloadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            )),
        })?;

        tracing::info!(
            path = %path.display(),
            bucket = %bucket,
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(Bytes::from(data))
    }

    async fn put(&self, bucket: &str, key: &str, data: Bytes, _content_type: &str) -> StorageResult<()> {
        let path = self.object_path(bucket, key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        // Write beside the target and rename so readers never see a partial object.
        let temp_path = Self::temp_path(&path);
        let write = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&data).await?;
            file.sync_all().await?;
            fs::rename(&temp_path, &path).await?;
            Ok::<(), std::io::Error>(())
        };

        if let Err(e) = write.await {
            let _ = fs::remove_file(&temp_path).await;
            tracing::error!(
                error = %e,
                path = %path.display(),
                bucket = %bucket,
                key = %key,
                "Local storage upload failed"
            );
            return Err(match e.kind() {
                ErrorKind::PermissionDenied => {
                    StorageError::AccessDenied(format!("{}/{}", bucket, key))
                }
                _ => StorageError::UploadFailed(format!(
                    "Failed to write file {}: {}",
                    path.display(),
                    e
                )),
            });
        }

        tracing::info!(
            path = %path.display(),
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        let path = self.object_path(bucket, key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage
            .put("clean", "2024/a.jpg", Bytes::from_static(b"jpeg"), "image/jpeg")
            .await
            .unwrap();

        assert!(dir.path().join("clean/2024/a.jpg").exists());
        assert!(!dir.path().join("clean/2024/.a.jpg.partial").exists());
        assert_eq!(storage.get("clean", "2024/a.jpg").await.unwrap(), &b"jpeg"[..]);
        assert!(storage.exists("clean", "2024/a.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        assert!(matches!(
            storage.get("uploads", "nope.jpg").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(!storage.exists("uploads", "nope.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        assert!(matches!(
            storage.get("uploads", "../../etc/passwd").await,
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            storage
                .put("..", "a.jpg", Bytes::from_static(b"x"), "image/jpeg")
                .await,
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            storage.get("uploads", "/abs.jpg").await,
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_buckets_are_separate_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage
            .put("uploads", "a.jpg", Bytes::from_static(b"raw"), "image/jpeg")
            .await
            .unwrap();

        assert!(matches!(
            storage.get("clean", "a.jpg").await,
            Err(StorageError::NotFound(_))
        ));
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }
}
