//! Storage setup and initialization

use anyhow::{Context, Result};
use exifstrip_core::Config;
use exifstrip_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage backend...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(
        backend = ?storage.backend_type(),
        region = config.s3_region().or(config.aws_region()).unwrap_or("-"),
        endpoint = config.s3_endpoint().unwrap_or("default"),
        "Storage backend initialized"
    );
    Ok(storage)
}
