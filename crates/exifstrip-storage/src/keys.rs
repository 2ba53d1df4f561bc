//! Shared key and bucket validation for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Reject keys that are empty, absolute, or contain a `..` path segment.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.starts_with('/') || key.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid path segments: {}",
            key
        )));
    }
    Ok(())
}

/// Reject bucket names that could escape a backend's namespace.
pub fn validate_bucket(bucket: &str) -> StorageResult<()> {
    if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
        return Err(StorageError::InvalidKey(format!(
            "Invalid bucket name: '{}'",
            bucket
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("a.jpg").is_ok());
        assert!(validate_key("photos/2024/a..b.jpg").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("photos/../../secret.jpg").is_err());
        assert!(validate_key("..").is_err());
    }

    #[test]
    fn test_validate_bucket() {
        assert!(validate_bucket("uploads").is_ok());
        assert!(validate_bucket("").is_err());
        assert!(validate_bucket("a/b").is_err());
        assert!(validate_bucket("..").is_err());
    }
}
