//! Health check handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::constants::{READINESS_PROBE_KEY, READINESS_TIMEOUT_SECS};
use crate::state::AppState;

#[derive(Serialize)]
pub(super) struct ReadinessResponse {
    pub status: &'static str,
    pub storage_backend: String,
    pub destination_bucket: String,
    pub storage: String,
}

/// Liveness probe - process is running.
pub(super) async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - the destination bucket is reachable.
pub(super) async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let destination = state.handler.destination_bucket();
    let probe = state.storage().exists(destination, READINESS_PROBE_KEY);

    let storage = match tokio::time::timeout(Duration::from_secs(READINESS_TIMEOUT_SECS), probe).await
    {
        Ok(Ok(_)) => "ready".to_string(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Storage readiness check failed");
            format!("not_ready: {}", e)
        }
        Err(_) => {
            tracing::error!("Storage readiness check timed out");
            "timeout".to_string()
        }
    };

    let ready = storage == "ready";
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" },
            storage_backend: state.storage().backend_type().to_string(),
            destination_bucket: destination.to_string(),
            storage,
        }),
    )
}
