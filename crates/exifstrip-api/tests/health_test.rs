//! Health endpoint integration tests.

mod helpers;

use axum::http::StatusCode;
use helpers::{setup_test_app, DEST_BUCKET};
use serde_json::Value;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app();

    let response = app.client().get("/health/live").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "alive");
    assert!(!response.header("X-Request-ID").is_empty());
}

#[tokio::test]
async fn test_readiness_reports_backend_and_destination() {
    let app = setup_test_app();

    let response = app.client().get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["storage_backend"], "memory");
    assert_eq!(body["destination_bucket"], DEST_BUCKET);
}
