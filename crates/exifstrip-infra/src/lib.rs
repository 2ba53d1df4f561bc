//! exifstrip Infrastructure Library
//!
//! Shared infrastructure for the event receiver:
//! - Telemetry initialization (tracing subscriber)
//! - Request ID middleware

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{request_id_middleware, RequestId};

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry};
