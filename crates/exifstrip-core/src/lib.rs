//! exifstrip Core Library
//!
//! This crate provides the domain models, error types, configuration and constants
//! shared by the sanitizer, the storage backends, the worker and the event receiver.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    ImageObject, NotificationError, NotificationItem, ObjectRef, S3EventNotification,
    SanitizedImageObject,
};
pub use storage_types::StorageBackend;
