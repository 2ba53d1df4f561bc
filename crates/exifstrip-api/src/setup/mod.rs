//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::constants::SERVICE_NAME;
use crate::state::AppState;
use anyhow::Result;
use exifstrip_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    exifstrip_infra::init_telemetry(SERVICE_NAME, config.environment(), config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        destination_bucket = %config.destination_bucket(),
        backend = %config.storage_backend(),
        environment = %config.environment(),
        production = config.is_production(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;
    let state = Arc::new(AppState::new(&config, storage));

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
