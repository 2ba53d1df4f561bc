//! Shared `object_store` plumbing for the S3 and in-memory backends.

use crate::traits::{StorageError, StorageResult};
use bytes::Bytes;
use object_store::path::Path;
use object_store::{
    Attribute, AttributeValue, Attributes, Error as ObjectStoreError, ObjectStore, ObjectStoreExt,
    PutOptions, PutPayload, Result as ObjectResult,
};

fn object_name(bucket: &str, key: &str) -> String {
    format!("{}/{}", bucket, key)
}

/// Object location for `key`, taken verbatim.
///
/// `Path::from` percent-encodes characters such as `%`, `#` and `~` and drops
/// empty segments, which would store the object under a different key.
/// `Path::parse` keeps the key as given and rejects what it cannot represent.
pub(crate) fn object_path(key: &str) -> StorageResult<Path> {
    if key.ends_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key ends with a delimiter: {}",
            key
        )));
    }
    Path::parse(key)
        .map_err(|e| StorageError::InvalidKey(format!("Invalid storage key '{}': {}", key, e)))
}

pub(crate) async fn get_object<S: ObjectStore>(
    store: &S,
    backend: &'static str,
    bucket: &str,
    key: &str,
) -> StorageResult<Bytes> {
    let start = std::time::Instant::now();
    let location = object_path(key)?;

    let result: ObjectResult<_> = store.get(&location).await;

    let result = result.map_err(|e| match e {
        ObjectStoreError::NotFound { .. } => StorageError::NotFound(object_name(bucket, key)),
        ObjectStoreError::PermissionDenied { .. } | ObjectStoreError::Unauthenticated { .. } => {
            StorageError::AccessDenied(object_name(bucket, key))
        }
        other => {
            tracing::error!(
                error = %other,
                backend,
                bucket = %bucket,
                key = %key,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Object download failed"
            );
            StorageError::DownloadFailed(other.to_string())
        }
    })?;

    let bytes = result
        .bytes()
        .await
        .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

    tracing::info!(
        backend,
        bucket = %bucket,
        key = %key,
        size_bytes = bytes.len() as u64,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Object download successful"
    );

    Ok(bytes)
}

pub(crate) async fn put_object<S: ObjectStore>(
    store: &S,
    backend: &'static str,
    bucket: &str,
    key: &str,
    data: Bytes,
    content_type: &str,
) -> StorageResult<()> {
    let start = std::time::Instant::now();
    let size = data.len() as u64;
    let location = object_path(key)?;

    let mut attributes = Attributes::new();
    attributes.insert(
        Attribute::ContentType,
        AttributeValue::from(content_type.to_string()),
    );
    let options = PutOptions {
        attributes,
        ..Default::default()
    };

    let result: ObjectResult<_> = store
        .put_opts(&location, PutPayload::from(data), options)
        .await;

    result.map_err(|e| {
        tracing::error!(
            error = %e,
            backend,
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object upload failed"
        );
        match e {
            ObjectStoreError::PermissionDenied { .. } | ObjectStoreError::Unauthenticated { .. } => {
                StorageError::AccessDenied(object_name(bucket, key))
            }
            other => StorageError::UploadFailed(other.to_string()),
        }
    })?;

    tracing::info!(
        backend,
        bucket = %bucket,
        key = %key,
        size_bytes = size,
        content_type = %content_type,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Object upload successful"
    );

    Ok(())
}

pub(crate) async fn object_exists<S: ObjectStore>(store: &S, key: &str) -> StorageResult<bool> {
    let location = object_path(key)?;
    match store.head(&location).await {
        Ok(_) => Ok(true),
        Err(ObjectStoreError::NotFound { .. }) => Ok(false),
        Err(e) => Err(StorageError::BackendError(e.to_string())),
    }
}

/// Content type recorded for an object, if the backend kept one.
#[cfg(feature = "storage-memory")]
pub(crate) async fn object_content_type<S: ObjectStore>(
    store: &S,
    bucket: &str,
    key: &str,
) -> StorageResult<Option<String>> {
    let location = object_path(key)?;
    let result = store.get(&location).await.map_err(|e| match e {
        ObjectStoreError::NotFound { .. } => StorageError::NotFound(object_name(bucket, key)),
        other => StorageError::BackendError(other.to_string()),
    })?;

    Ok(result.attributes.get(&Attribute::ContentType).map(|value| {
        let value: &str = value.as_ref();
        value.to_string()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_keeps_key_verbatim() {
        for key in ["100%.jpg", "a#b.jpg", "x~1.jpg", "photos/2024/My Photo (1).JPG"] {
            assert_eq!(object_path(key).unwrap().as_ref(), key);
        }
    }

    #[test]
    fn test_object_path_rejects_unrepresentable_keys() {
        for key in ["dir//a.jpg", "dir/", "a/./b.jpg", "bell\u{7}.jpg"] {
            assert!(matches!(object_path(key), Err(StorageError::InvalidKey(_))));
        }
    }
}
