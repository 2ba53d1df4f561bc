//! Shared constants.

/// Content type attached to every sanitized object written to the destination bucket.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Key suffixes (compared case-insensitively) that mark an object as a JPEG.
pub const JPEG_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

/// Default per-object size limit in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: usize = 50;

/// Default HTTP listen port for the event receiver.
pub const DEFAULT_PORT: u16 = 4000;

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "exifstrip=info,tower_http=info";
