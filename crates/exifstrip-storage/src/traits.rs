//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// Whether a later attempt could plausibly succeed.
    ///
    /// Missing objects, permissions, bad keys and configuration do not change
    /// between attempts; network and backend failures might.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StorageError::DownloadFailed(_)
                | StorageError::UploadFailed(_)
                | StorageError::BackendError(_)
                | StorageError::IoError(_)
        )
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem, memory) implement this trait so the
/// handler can read from a source bucket and write to a destination bucket without
/// knowing which backend is behind them.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the full contents of an object.
    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Bytes>;

    /// Write an object in a single request, replacing any existing object.
    ///
    /// Either the whole object is stored or the call fails; no partial object is
    /// left behind by a failed call.
    async fn put(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(StorageError::BackendError("timeout".into()).is_transient());
        assert!(StorageError::UploadFailed("503".into()).is_transient());
        assert!(!StorageError::NotFound("a.jpg".into()).is_transient());
        assert!(!StorageError::AccessDenied("a.jpg".into()).is_transient());
        assert!(!StorageError::InvalidKey("../x".into()).is_transient());
    }
}
