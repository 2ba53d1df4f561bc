//! HTTP surface constants.

/// Service name reported by telemetry.
pub const SERVICE_NAME: &str = "exifstrip";

/// Upper bound on a notification request body.
pub const MAX_EVENT_BODY_BYTES: usize = 1024 * 1024;

/// Key probed in the destination bucket by the readiness check.
pub const READINESS_PROBE_KEY: &str = ".exifstrip-readiness";

/// Timeout applied to the readiness storage probe, in seconds.
pub const READINESS_TIMEOUT_SECS: u64 = 5;
