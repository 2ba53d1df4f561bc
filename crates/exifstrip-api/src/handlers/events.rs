//! Notification receiver.

use axum::{extract::State, Extension, Json};
use bytes::Bytes;
use exifstrip_core::S3EventNotification;
use exifstrip_infra::RequestId;
use exifstrip_worker::{process_notification, BatchReport};
use tracing::Instrument;

use std::sync::Arc;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Accept an S3 object-created notification and process every record in it.
///
/// The body is rejected with 400 only when it is not a notification or carries
/// no records. Once records are accepted the response is 200 and per-object
/// failures are reported in the `BatchReport`.
pub async fn receive_events(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<BatchReport>, HttpAppError> {
    let notification = S3EventNotification::from_slice(&body)?;
    let items = notification.into_items()?;

    tracing::debug!(records = items.len(), "Notification accepted");

    let span = tracing::info_span!("notification", request_id = %request_id.0);
    let report = process_notification(&state.handler, items).instrument(span).await;

    Ok(Json(report))
}
