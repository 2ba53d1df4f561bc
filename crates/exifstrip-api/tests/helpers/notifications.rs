use serde_json::{json, Value};

use super::SOURCE_BUCKET;

/// One object-created record as S3 emits it. `raw_key` is used verbatim, so
/// callers pass keys already URL-encoded.
pub fn record(bucket: &str, raw_key: &str) -> Value {
    record_with_size(bucket, raw_key, 1024)
}

pub fn record_with_size(bucket: &str, raw_key: &str, size: u64) -> Value {
    json!({
        "eventVersion": "2.1",
        "eventSource": "aws:s3",
        "awsRegion": "us-east-1",
        "eventTime": "2024-05-01T10:00:00.000Z",
        "eventName": "ObjectCreated:Put",
        "s3": {
            "s3SchemaVersion": "1.0",
            "bucket": { "name": bucket, "arn": format!("arn:aws:s3:::{}", bucket) },
            "object": { "key": raw_key, "size": size, "eTag": "d41d8cd98f00b204e9800998ecf8427e" }
        }
    })
}

/// Notification for the given keys in the source bucket.
pub fn notification(raw_keys: &[&str]) -> Value {
    let records: Vec<Value> = raw_keys.iter().map(|k| record(SOURCE_BUCKET, k)).collect();
    json!({ "Records": records })
}
