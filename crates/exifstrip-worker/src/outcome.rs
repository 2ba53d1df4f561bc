//! Per-object outcomes and the batch report.

use exifstrip_core::{NotificationError, ObjectRef};
use exifstrip_processing::ParseError;
use exifstrip_storage::StorageError;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Where in the pipeline an object failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The notification record itself could not be decoded.
    Decode,
    Fetch,
    Sanitize,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotJpeg,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid notification record: {0}")]
    Notification(#[from] NotificationError),

    #[error("failed to fetch object: {0}")]
    Fetch(#[source] StorageError),

    #[error("object is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: usize },

    #[error("failed to strip EXIF: {0}")]
    Sanitize(#[from] ParseError),

    #[error("failed to write sanitized object: {0}")]
    Write(#[source] StorageError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Notification(_) => Stage::Decode,
            PipelineError::Fetch(_) | PipelineError::TooLarge { .. } => Stage::Fetch,
            PipelineError::Sanitize(_) => Stage::Sanitize,
            PipelineError::Write(_) => Stage::Write,
        }
    }

    /// Storage backend and IO failures may succeed on a later delivery.
    pub fn is_transient(&self) -> bool {
        match self {
            PipelineError::Fetch(e) | PipelineError::Write(e) => e.is_transient(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    Written {
        bucket: String,
        key: String,
        destination_bucket: String,
        input_bytes: usize,
        output_bytes: usize,
        exif_segments_removed: usize,
    },
    Skipped {
        bucket: String,
        key: String,
        reason: SkipReason,
    },
    Failed {
        #[serde(skip_serializing_if = "Option::is_none")]
        bucket: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        stage: Stage,
        error: String,
        transient: bool,
    },
}

impl RecordOutcome {
    pub fn failed(object: Option<&ObjectRef>, error: &PipelineError) -> Self {
        let raw_key = match error {
            PipelineError::Notification(e) => e.raw_key().map(str::to_string),
            _ => None,
        };
        RecordOutcome::Failed {
            bucket: object.map(|o| o.bucket.clone()),
            key: object.map(|o| o.key.clone()).or(raw_key),
            stage: error.stage(),
            error: error.to_string(),
            transient: error.is_transient(),
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            RecordOutcome::Written { key, .. } | RecordOutcome::Skipped { key, .. } => Some(key),
            RecordOutcome::Failed { key, .. } => key.as_deref(),
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, RecordOutcome::Written { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RecordOutcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RecordOutcome::Failed { .. })
    }
}

/// Outcome of one notification, in record order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    pub fn from_outcomes(outcomes: Vec<RecordOutcome>) -> Self {
        let written = outcomes.iter().filter(|o| o.is_written()).count();
        let skipped = outcomes.iter().filter(|o| o.is_skipped()).count();
        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        Self {
            batch_id: Uuid::new_v4(),
            written,
            skipped,
            failed,
            outcomes,
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_and_transience() {
        let not_found = PipelineError::Fetch(StorageError::NotFound("a.jpg".into()));
        assert_eq!(not_found.stage(), Stage::Fetch);
        assert!(!not_found.is_transient());

        let upload = PipelineError::Write(StorageError::UploadFailed("timeout".into()));
        assert_eq!(upload.stage(), Stage::Write);
        assert!(upload.is_transient());

        let too_large = PipelineError::TooLarge { size: 10, limit: 5 };
        assert_eq!(too_large.stage(), Stage::Fetch);
        assert!(!too_large.is_transient());

        let parse: PipelineError = ParseError::MissingSoi.into();
        assert_eq!(parse.stage(), Stage::Sanitize);
        assert!(!parse.is_transient());
    }

    #[test]
    fn test_failed_outcome_keeps_raw_key_for_bad_record() {
        let error: PipelineError = NotificationError::InvalidKey {
            raw: "%FF.jpg".into(),
            reason: "invalid utf-8".into(),
        }
        .into();
        let outcome = RecordOutcome::failed(None, &error);

        assert_eq!(outcome.key(), Some("%FF.jpg"));
        match outcome {
            RecordOutcome::Failed { bucket, stage, .. } => {
                assert!(bucket.is_none());
                assert_eq!(stage, Stage::Decode);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_report_counts_and_serialization() {
        let object = ObjectRef::new("uploads", "x.jpg");
        let outcomes = vec![
            RecordOutcome::Skipped {
                bucket: "uploads".into(),
                key: "b.txt".into(),
                reason: SkipReason::NotJpeg,
            },
            RecordOutcome::failed(
                Some(&object),
                &PipelineError::Fetch(StorageError::NotFound("x.jpg".into())),
            ),
        ];
        let report = BatchReport::from_outcomes(outcomes);
        assert_eq!((report.written, report.skipped, report.failed), (0, 1, 1));
        assert_eq!(report.len(), 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["status"], "skipped");
        assert_eq!(json["outcomes"][0]["reason"], "not_jpeg");
        assert_eq!(json["outcomes"][1]["status"], "failed");
        assert_eq!(json["outcomes"][1]["stage"], "fetch");
        assert_eq!(json["outcomes"][1]["transient"], false);
    }
}
