//! Recoverable failure collection for batch runs.
//!
//! Library functions return [`crate::core::Error`] for fatal conditions;
//! per-file and per-record problems that must not abort a batch are gathered
//! as [`ProcessingFailure`]s and returned alongside normal results.

pub mod collection;
pub mod reporting;
pub mod summary;

pub use collection::{BatchResults, OperationType, ProcessingFailure};
pub use reporting::{report_brief_summary, report_completion_summary};
pub use summary::ErrorSummary;
