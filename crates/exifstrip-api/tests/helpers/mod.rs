//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p exifstrip-api`. Everything runs
//! against the in-memory storage backend; no network or containers needed.

#![allow(dead_code)]

pub mod notifications;

use axum_test::TestServer;
use bytes::Bytes;
use exifstrip_api::setup::routes;
use exifstrip_api::state::AppState;
use exifstrip_core::Config;
use exifstrip_storage::{MemoryStorage, Storage};
use std::sync::Arc;

pub const SOURCE_BUCKET: &str = "uploads";
pub const DEST_BUCKET: &str = "clean-images";

/// Test application: server plus a handle on the shared in-memory storage.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MemoryStorage,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Seed an object into the source bucket.
    pub async fn upload(&self, key: &str, data: Vec<u8>) {
        self.storage
            .put(SOURCE_BUCKET, key, Bytes::from(data), "application/octet-stream")
            .await
            .expect("Failed to seed source object");
    }

    pub async fn destination_keys(&self) -> Vec<String> {
        self.storage
            .keys(DEST_BUCKET)
            .await
            .expect("Failed to list destination bucket")
    }
}

pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut vars = vec![
        ("DEST_BUCKET".to_string(), DEST_BUCKET.to_string()),
        ("STORAGE_BACKEND".to_string(), "memory".to_string()),
    ];
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    Config::from_lookup(|name| {
        vars.iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    })
    .expect("Failed to build test config")
}

/// Setup test app with an isolated in-memory store.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[])
}

pub fn setup_test_app_with(extra: &[(&str, &str)]) -> TestApp {
    let storage = MemoryStorage::new();
    let state = Arc::new(AppState::new(&test_config(extra), Arc::new(storage.clone())));
    let router = routes::setup_routes(state);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, storage }
}
