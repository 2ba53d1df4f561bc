//! Notification handler
//!
//! Objects are handled one after another in notification order. Every object
//! ends in exactly one `RecordOutcome`; nothing that happens to one object
//! prevents the next from being attempted.

use std::time::Instant;

use exifstrip_core::{ImageObject, NotificationItem, ObjectRef, SanitizedImageObject};
use exifstrip_processing::{is_jpeg_key, sanitize_with_report};
use tracing::Instrument;

use crate::context::HandlerContext;
use crate::outcome::{BatchReport, PipelineError, RecordOutcome, SkipReason};

/// Handle every decoded record of one notification.
pub async fn process_notification(
    ctx: &HandlerContext,
    items: Vec<NotificationItem>,
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(items.len());

    for item in items {
        let outcome = match item {
            Ok(object) => {
                let span = tracing::info_span!(
                    "process_object",
                    bucket = %object.bucket,
                    key = %object.key
                );
                process_object(ctx, &object).instrument(span).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping undecodable notification record");
                RecordOutcome::failed(None, &PipelineError::from(e))
            }
        };
        outcomes.push(outcome);
    }

    let report = BatchReport::from_outcomes(outcomes);
    tracing::info!(
        batch_id = %report.batch_id,
        records = report.len(),
        written = report.written,
        skipped = report.skipped,
        failed = report.failed,
        "Notification processed"
    );
    report
}

/// Handle a single object: filter, fetch, sanitize, write.
pub async fn process_object(ctx: &HandlerContext, object: &ObjectRef) -> RecordOutcome {
    if !is_jpeg_key(&object.key) {
        tracing::info!(bucket = %object.bucket, key = %object.key, "Skipping non-JPEG object");
        return RecordOutcome::Skipped {
            bucket: object.bucket.clone(),
            key: object.key.clone(),
            reason: SkipReason::NotJpeg,
        };
    }

    match strip_and_forward(ctx, object).await {
        Ok(outcome) => outcome,
        Err(e) => {
            match &e {
                PipelineError::Sanitize(parse_error) => tracing::warn!(
                    bucket = %object.bucket,
                    key = %object.key,
                    error = %parse_error,
                    "Failed to strip EXIF"
                ),
                other => tracing::error!(
                    bucket = %object.bucket,
                    key = %object.key,
                    stage = ?other.stage(),
                    transient = other.is_transient(),
                    error = %other,
                    "Failed to process object"
                ),
            }
            RecordOutcome::failed(Some(object), &e)
        }
    }
}

async fn strip_and_forward(
    ctx: &HandlerContext,
    object: &ObjectRef,
) -> Result<RecordOutcome, PipelineError> {
    let started = Instant::now();

    // Reject on the announced size so oversized objects are never downloaded.
    if let Some(size) = object.size {
        check_size(ctx, size)?;
    }

    let data = ctx
        .storage()
        .get(&object.bucket, &object.key)
        .await
        .map_err(PipelineError::Fetch)?;
    let image = ImageObject::new(object.bucket.as_str(), object.key.as_str(), data);

    // The announced size may be missing or stale.
    check_size(ctx, image.size_bytes() as u64)?;

    let report = sanitize_with_report(&image.data)?;
    tracing::debug!(
        exif_segments_removed = report.exif_segments_removed,
        bytes_removed = report.bytes_removed,
        "Sanitized object"
    );
    let cleaned = SanitizedImageObject::from_source(&image, report.data, report.exif_segments_removed);

    ctx.storage()
        .put(
            ctx.destination_bucket(),
            &cleaned.key,
            cleaned.data.clone(),
            cleaned.content_type,
        )
        .await
        .map_err(PipelineError::Write)?;

    tracing::info!(
        bucket = %image.bucket,
        key = %cleaned.key,
        destination_bucket = %ctx.destination_bucket(),
        input_bytes = image.size_bytes(),
        output_bytes = cleaned.size_bytes(),
        exif_segments_removed = cleaned.exif_segments_removed,
        duration_ms = started.elapsed().as_millis() as u64,
        "Cleaned object written"
    );

    Ok(RecordOutcome::Written {
        bucket: image.bucket,
        key: cleaned.key,
        destination_bucket: ctx.destination_bucket().to_string(),
        input_bytes: image.data.len(),
        output_bytes: cleaned.data.len(),
        exif_segments_removed: cleaned.exif_segments_removed,
    })
}

fn check_size(ctx: &HandlerContext, size: u64) -> Result<(), PipelineError> {
    let limit = ctx.max_object_bytes();
    if size > limit as u64 {
        return Err(PipelineError::TooLarge { size, limit });
    }
    Ok(())
}
