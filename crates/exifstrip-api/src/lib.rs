//! exifstrip API Library
//!
//! This crate provides the event receiver: the HTTP routes, error rendering and
//! application setup around the notification handler.

pub mod constants;
pub mod error;
mod handlers;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
