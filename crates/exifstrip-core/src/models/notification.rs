//! S3 event notification payload.
//!
//! Object-created notifications from S3 and S3-compatible stores share this
//! shape. Only the fields the handler needs are modelled; everything else in the
//! document is ignored.

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Notification contains no records")]
    NoRecords,

    #[error("Record {index} has an empty bucket name")]
    MissingBucket { index: usize },

    #[error("Invalid object key '{raw}': {reason}")]
    InvalidKey { raw: String, reason: String },
}

impl NotificationError {
    /// The key as it appeared in the notification, when the error concerns one.
    pub fn raw_key(&self) -> Option<&str> {
        match self {
            NotificationError::InvalidKey { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3EventNotification {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3EventRecord {
    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(rename = "eventTime", default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<DateTime<Utc>>,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Object {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// A (source bucket, object key) pair with the key already decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
    /// Object size as announced by the notification, if it carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            size: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// One notification record after decoding. A bad record does not spoil the batch.
pub type NotificationItem = Result<ObjectRef, NotificationError>;

/// Decode an object key as it appears in S3 notifications (form-encoded: `+` is a space).
pub fn decode_object_key(raw: &str) -> Result<String, NotificationError> {
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).map_err(|e| NotificationError::InvalidKey {
        raw: raw.to_string(),
        reason: e.to_string(),
    })?;

    if decoded.is_empty() {
        return Err(NotificationError::InvalidKey {
            raw: raw.to_string(),
            reason: "key is empty".to_string(),
        });
    }

    Ok(decoded.into_owned())
}

impl S3EventNotification {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Decode every record in order.
    ///
    /// Fails as a whole only when there is nothing to process; individual records
    /// that cannot be decoded come back as `Err` items.
    pub fn into_items(self) -> Result<Vec<NotificationItem>, NotificationError> {
        if self.records.is_empty() {
            return Err(NotificationError::NoRecords);
        }

        Ok(self
            .records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let bucket = record.s3.bucket.name.trim().to_string();
                if bucket.is_empty() {
                    return Err(NotificationError::MissingBucket { index });
                }
                let key = decode_object_key(&record.s3.object.key)?;
                Ok(ObjectRef {
                    bucket,
                    key,
                    size: record.s3.object.size,
                })
            })
            .collect())
    }
}
