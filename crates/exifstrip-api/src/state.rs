//! Shared application state.

use std::sync::Arc;

use exifstrip_core::Config;
use exifstrip_storage::Storage;
use exifstrip_worker::HandlerContext;

pub struct AppState {
    pub handler: HandlerContext,
}

impl AppState {
    pub fn new(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self {
            handler: HandlerContext::from_config(config, storage),
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        self.handler.storage()
    }
}

#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
