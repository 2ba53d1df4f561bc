//! Notification endpoint integration tests.
//!
//! Run with: `cargo test -p exifstrip-api --test events_test`

mod helpers;

use axum::http::StatusCode;
use exifstrip_processing::fixtures;
use exifstrip_storage::Storage;
use helpers::notifications::{notification, record, record_with_size};
use helpers::{setup_test_app, setup_test_app_with, DEST_BUCKET};
use serde_json::{json, Value};

#[tokio::test]
async fn test_jpeg_is_cleaned_and_text_is_skipped() {
    let app = setup_test_app();
    app.upload("a.jpg", fixtures::jpeg_with_exif()).await;
    app.upload("b.txt", b"plain text".to_vec()).await;

    let response = app
        .client()
        .post("/events")
        .json(&notification(&["a.jpg", "b.txt"]))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let report: Value = response.json();
    assert_eq!(report["written"], 1);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["outcomes"][0]["status"], "written");
    assert_eq!(report["outcomes"][0]["exif_segments_removed"], 1);
    assert_eq!(report["outcomes"][1]["status"], "skipped");

    assert_eq!(app.destination_keys().await, vec!["a.jpg".to_string()]);
    let cleaned = app.storage.get(DEST_BUCKET, "a.jpg").await.unwrap();
    assert_eq!(cleaned.as_ref(), fixtures::minimal_jpeg().as_slice());
    assert!(!cleaned.windows(6).any(|w| w == b"Exif\0\0"));
}

#[tokio::test]
async fn test_url_encoded_key_is_decoded() {
    let app = setup_test_app();
    app.upload("holiday/beach photo (1).JPG", fixtures::jpeg_with_exif())
        .await;

    let response = app
        .client()
        .post("/events")
        .json(&notification(&["holiday/beach+photo+%281%29.JPG"]))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        app.destination_keys().await,
        vec!["holiday/beach photo (1).JPG".to_string()]
    );
}

#[tokio::test]
async fn test_partial_failure_still_returns_ok() {
    let app = setup_test_app();
    app.upload("broken.jpg", b"GIF89a not really a jpeg".to_vec())
        .await;
    app.upload("good.jpeg", fixtures::jpeg_with_exif_and_xmp())
        .await;

    let response = app
        .client()
        .post("/events")
        .json(&notification(&["missing.jpg", "broken.jpg", "good.jpeg"]))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let report: Value = response.json();
    assert_eq!(report["written"], 1);
    assert_eq!(report["failed"], 2);
    assert_eq!(report["outcomes"][0]["stage"], "fetch");
    assert_eq!(report["outcomes"][1]["stage"], "sanitize");
    assert_eq!(report["outcomes"][2]["exif_segments_removed"], 2);

    assert_eq!(app.destination_keys().await, vec!["good.jpeg".to_string()]);
}

#[tokio::test]
async fn test_undecodable_record_is_reported_per_item() {
    let app = setup_test_app();
    app.upload("ok.jpg", fixtures::minimal_jpeg()).await;

    let body = json!({
        "Records": [
            record("uploads", "%FF%FE.jpg"),
            record("uploads", "ok.jpg")
        ]
    });
    let response = app.client().post("/events").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let report: Value = response.json();
    assert_eq!(report["failed"], 1);
    assert_eq!(report["written"], 1);
    assert_eq!(report["outcomes"][0]["stage"], "decode");
    assert_eq!(report["outcomes"][0]["key"], "%FF%FE.jpg");
}

#[tokio::test]
async fn test_empty_records_rejected() {
    let app = setup_test_app();

    let response = app
        .client()
        .post("/events")
        .json(&json!({ "Records": [] }))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(body["recoverable"], false);
}

#[tokio::test]
async fn test_invalid_json_rejected() {
    let app = setup_test_app();

    let response = app
        .client()
        .post("/events")
        .text("this is not json")
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .client()
        .post("/events")
        .json(&json!({ "Records": [{ "s3": "wrong shape" }] }))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.destination_keys().await.is_empty());
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let app = setup_test_app();

    let response = app
        .client()
        .post("/events")
        .bytes(vec![b' '; 2 * 1024 * 1024].into())
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_object_over_size_limit_is_not_written() {
    let app = setup_test_app_with(&[("MAX_FILE_SIZE_MB", "1")]);
    let mut huge = fixtures::jpeg_with_exif();
    huge.extend(std::iter::repeat(0u8).take(1024 * 1024));
    app.upload("huge.jpg", huge).await;

    let response = app
        .client()
        .post("/events")
        .json(&notification(&["huge.jpg"]))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let report: Value = response.json();
    assert_eq!(report["failed"], 1);
    assert_eq!(report["outcomes"][0]["stage"], "fetch");
    assert!(app.destination_keys().await.is_empty());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = setup_test_app();
    app.upload("a.jpg", fixtures::minimal_jpeg()).await;

    let response = app
        .client()
        .post("/events")
        .add_header("X-Request-ID", "evt-42")
        .json(&notification(&["a.jpg"]))
        .await;

    assert_eq!(response.header("X-Request-ID"), "evt-42");
}

#[tokio::test]
async fn test_announced_oversize_fails_before_download() {
    let app = setup_test_app_with(&[("MAX_FILE_SIZE_MB", "1")]);
    // Never uploaded: a download attempt would fail as not found instead.
    let body = json!({ "Records": [record_with_size("uploads", "raw.jpg", 200 * 1024 * 1024)] });

    let response = app.client().post("/events").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let report: Value = response.json();
    assert_eq!(report["failed"], 1);
    assert_eq!(report["outcomes"][0]["stage"], "fetch");
    assert!(report["outcomes"][0]["error"]
        .as_str()
        .unwrap()
        .contains("limit"));
}

#[tokio::test]
async fn test_key_with_reserved_characters_keeps_its_name() {
    let app = setup_test_app();
    app.upload("100% real #1 ~final.jpg", fixtures::jpeg_with_exif())
        .await;

    let response = app
        .client()
        .post("/events")
        .json(&notification(&["100%25+real+%231+~final.jpg"]))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        app.destination_keys().await,
        vec!["100% real #1 ~final.jpg".to_string()]
    );
}
