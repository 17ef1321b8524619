//! Shared error types for the application

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for brickledger operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structurally malformed inventory document
    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Unsupported input format
    #[error("Unsupported inventory format: {}", .0.display())]
    Unsupported(PathBuf),

    /// Configuration errors (missing input folder, missing color table, bad config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output document could not be produced or written
    #[error("Failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// CSV errors
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error with path context
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a write error with path context
    pub fn write(path: impl AsRef<Path>, message: impl std::fmt::Display) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Whether the error only affects a single input file and the batch can continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Parse { .. } | Self::Unsupported(_) | Self::Csv(_) | Self::Json(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_mentions_path() {
        let err = Error::parse("sets/10333.xml", "unexpected end of document");
        let message = err.to_string();
        assert!(message.contains("sets/10333.xml"));
        assert!(message.contains("unexpected end of document"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::parse("a.xml", "bad").is_recoverable());
        assert!(Error::io(
            "a.xml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone")
        )
        .is_recoverable());
        assert!(!Error::config("input folder missing").is_recoverable());
        assert!(!Error::write("wanted_list.xml", "read-only").is_recoverable());
    }
}
