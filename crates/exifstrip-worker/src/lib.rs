//! exifstrip Worker Library
//!
//! Turns one notification into a batch of independent per-object outcomes. Each
//! object is fetched, sanitized and written on its own; a failure is recorded in
//! the batch report and the next object is attempted.

pub mod context;
pub mod handler;
pub mod outcome;

pub use context::HandlerContext;
pub use handler::{process_notification, process_object};
pub use outcome::{BatchReport, PipelineError, RecordOutcome, SkipReason, Stage};
