//! Error collection data structures for batch operations.
//!
//! Inventory files are processed independently: instead of stopping at the
//! first bad file we collect ALL failures and return them next to the results.

use crate::core::Error;
use crate::inventory::RecordIssue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Results from batch operations: both successes and failures.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    pub successes: Vec<T>,
    pub failures: Vec<ProcessingFailure>,
}

impl<T> Default for BatchResults<T> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResults<T> {
    pub fn new(successes: Vec<T>, failures: Vec<ProcessingFailure>) -> Self {
        Self {
            successes,
            failures,
        }
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn total_count(&self) -> usize {
        self.success_count() + self.failure_count()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_count() == 0 {
            return 1.0;
        }
        self.success_count() as f64 / self.total_count() as f64
    }
}

/// Information about a failed operation on one file or one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingFailure {
    pub path: PathBuf,
    pub operation: OperationType,
    pub error: String,
}

impl ProcessingFailure {
    pub fn new(path: impl Into<PathBuf>, operation: OperationType, error: impl ToString) -> Self {
        Self {
            path: path.into(),
            operation,
            error: error.to_string(),
        }
    }

    /// Classify a library error raised while reading `path`.
    pub fn from_error(path: impl Into<PathBuf>, error: &Error) -> Self {
        let operation = match error {
            Error::Io { .. } => OperationType::FileRead,
            Error::Write { .. } => OperationType::FileWrite,
            _ => OperationType::FileParse,
        };
        Self::new(path, operation, error)
    }

    pub fn file_read(path: impl Into<PathBuf>, error: impl ToString) -> Self {
        Self::new(path, OperationType::FileRead, error)
    }

    pub fn file_parse(path: impl Into<PathBuf>, error: impl ToString) -> Self {
        Self::new(path, OperationType::FileParse, error)
    }

    pub fn record(path: impl Into<PathBuf>, issue: &RecordIssue) -> Self {
        Self::new(
            path,
            OperationType::RecordParse,
            format!("item #{}: {}", issue.position, issue.message),
        )
    }

    pub fn file_write(path: impl Into<PathBuf>, error: impl ToString) -> Self {
        Self::new(path, OperationType::FileWrite, error)
    }
}

/// Type of operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationType {
    FileRead,
    FileParse,
    RecordParse,
    FileWrite,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileRead => "File read",
            Self::FileParse => "File parse",
            Self::RecordParse => "Record parse",
            Self::FileWrite => "File write",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_results_success_count() {
        let results = BatchResults {
            successes: vec![1, 2, 3],
            failures: vec![],
        };

        assert_eq!(results.success_count(), 3);
        assert_eq!(results.failure_count(), 0);
        assert_eq!(results.total_count(), 3);
        assert!(results.is_complete_success());
        assert_eq!(results.success_rate(), 1.0);
    }

    #[test]
    fn test_batch_results_with_failures() {
        let results = BatchResults {
            successes: vec![1, 2, 3],
            failures: vec![
                ProcessingFailure::file_read("a.xml", "Permission denied"),
                ProcessingFailure::file_parse("b.xml", "mismatched end tag"),
            ],
        };

        assert_eq!(results.failure_count(), 2);
        assert_eq!(results.total_count(), 5);
        assert!(!results.is_complete_success());
        assert_eq!(results.success_rate(), 0.6);
    }

    #[test]
    fn test_failure_from_error_classification() {
        let parse = ProcessingFailure::from_error("a.xml", &Error::parse("a.xml", "bad"));
        assert_eq!(parse.operation, OperationType::FileParse);

        let io = ProcessingFailure::from_error(
            "b.xml",
            &Error::io("b.xml", std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
        );
        assert_eq!(io.operation, OperationType::FileRead);
        assert!(io.error.contains("gone"));
    }

    #[test]
    fn test_record_failure_mentions_position() {
        let issue = RecordIssue {
            position: 7,
            message: "MINQTY value 99999999999999999999 is out of range".into(),
        };
        let failure = ProcessingFailure::record("c.xml", &issue);
        assert_eq!(failure.operation, OperationType::RecordParse);
        assert!(failure.error.starts_with("item #7"));
    }

    #[test]
    fn test_operation_type_as_str() {
        assert_eq!(OperationType::FileRead.as_str(), "File read");
        assert_eq!(OperationType::RecordParse.as_str(), "Record parse");
        assert_eq!(OperationType::FileWrite.as_str(), "File write");
    }
}
