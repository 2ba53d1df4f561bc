//! Image objects as they move through a single invocation.

use bytes::Bytes;
use serde::Serialize;

use crate::constants::JPEG_CONTENT_TYPE;

/// Raw object contents fetched from the source bucket. Immutable once fetched.
#[derive(Debug, Clone)]
pub struct ImageObject {
    pub bucket: String,
    pub key: String,
    pub data: Bytes,
}

impl ImageObject {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>, data: Bytes) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            data,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Sanitized contents ready for the destination bucket.
///
/// Keeps the source key; the content type is always `image/jpeg`.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedImageObject {
    pub key: String,
    #[serde(skip)]
    pub data: Bytes,
    pub content_type: &'static str,
    pub exif_segments_removed: usize,
}

impl SanitizedImageObject {
    pub fn from_source(source: &ImageObject, data: Vec<u8>, exif_segments_removed: usize) -> Self {
        Self {
            key: source.key.clone(),
            data: Bytes::from(data),
            content_type: JPEG_CONTENT_TYPE,
            exif_segments_removed,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
