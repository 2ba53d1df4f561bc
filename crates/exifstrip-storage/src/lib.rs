//! exifstrip Storage Library
//!
//! Storage Reader/Writer abstraction and its backends. Unlike a single-bucket
//! store, every operation names its bucket: objects are read from the bucket the
//! notification names and written to the configured destination bucket.
//!
//! Keys must be non-empty and must not contain `..` segments or a leading `/`.
//! Validation is centralized in the `keys` module so all backends agree.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(any(feature = "storage-s3", feature = "storage-memory"))]
pub(crate) mod object;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use exifstrip_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
