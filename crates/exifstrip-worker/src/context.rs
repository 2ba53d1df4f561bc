//! Handler context
//!
//! Built once at process start and shared by every invocation. Holding the
//! storage handle and destination here keeps the handler free of global state.

use std::sync::Arc;

use exifstrip_core::Config;
use exifstrip_storage::Storage;

#[derive(Clone)]
pub struct HandlerContext {
    storage: Arc<dyn Storage>,
    destination_bucket: String,
    max_object_bytes: usize,
}

impl HandlerContext {
    pub fn new(
        storage: Arc<dyn Storage>,
        destination_bucket: impl Into<String>,
        max_object_bytes: usize,
    ) -> Self {
        Self {
            storage,
            destination_bucket: destination_bucket.into(),
            max_object_bytes,
        }
    }

    pub fn from_config(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self::new(
            storage,
            config.destination_bucket(),
            config.max_file_size_bytes(),
        )
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn destination_bucket(&self) -> &str {
        &self.destination_bucket
    }

    pub fn max_object_bytes(&self) -> usize {
        self.max_object_bytes
    }
}

impl std::fmt::Debug for HandlerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerContext")
            .field("backend", &self.storage.backend_type())
            .field("destination_bucket", &self.destination_bucket)
            .field("max_object_bytes", &self.max_object_bytes)
            .finish()
    }
}
