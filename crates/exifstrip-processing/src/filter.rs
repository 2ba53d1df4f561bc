//! Extension-based JPEG detection.

use exifstrip_core::constants::JPEG_EXTENSIONS;

/// True when `key` ends in `.jpg` or `.jpeg`, ignoring ASCII case.
///
/// Only the name is inspected; content is validated by the sanitizer.
pub fn is_jpeg_key(key: &str) -> bool {
    let key = key.as_bytes();
    JPEG_EXTENSIONS.iter().any(|ext| {
        let ext = ext.as_bytes();
        key.len() >= ext.len() && key[key.len() - ext.len()..].eq_ignore_ascii_case(ext)
    })
}
