//! Telemetry initialization

mod init_basic;

pub use init_basic::{build_filter, init_telemetry, shutdown_telemetry};
