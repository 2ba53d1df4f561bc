//! exifstrip Processing Library
//!
//! The sanitizer: locates EXIF APP1 segments in a JPEG byte stream and removes
//! them, leaving every other byte untouched. Also home to the key filter that
//! decides whether an object is a JPEG at all.

pub mod filter;
pub mod jpeg;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use filter::is_jpeg_key;
pub use jpeg::{sanitize, sanitize_with_report, ParseError, SanitizeReport};
