//! Output destination abstractions for documents and reports.
//!
//! # Example
//!
//! ```rust,ignore
//! use brickledger::io::destinations::{FileDestination, OutputDestination};
//!
//! let file_dest = FileDestination::new("Filtered/wanted_list.xml".into());
//! file_dest.write_str("<INVENTORY></INVENTORY>")?;
//! ```

use crate::core::{Error, Result};
use std::io::{self, Write};
use std::path::PathBuf;

/// Trait for destinations that receive rendered output.
pub trait OutputDestination: Send + Sync {
    /// Write string content to the destination.
    fn write_str(&self, content: &str) -> Result<()>;

    /// Flush any buffered content.
    fn flush(&self) -> Result<()>;

    /// Get a description of the destination for error messages.
    fn description(&self) -> String;
}

/// File system output destination.
///
/// Content is written to a sibling temporary file and renamed into place, so
/// a reader never observes a half-written document and the last complete
/// writer wins.
#[derive(Debug, Clone)]
pub struct FileDestination {
    path: PathBuf,
}

impl FileDestination {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

impl OutputDestination for FileDestination {
    fn write_str(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            super::ensure_dir(parent).map_err(|e| Error::write(&self.path, e))?;
        }
        let staging = self.staging_path();
        std::fs::write(&staging, content).map_err(|e| Error::write(&self.path, e))?;
        std::fs::rename(&staging, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            Error::write(&self.path, e)
        })
    }

    fn flush(&self) -> Result<()> {
        // File writes are already flushed
        Ok(())
    }

    fn description(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Standard output destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutDestination;

impl StdoutDestination {
    pub fn new() -> Self {
        Self
    }
}

impl OutputDestination for StdoutDestination {
    fn write_str(&self, content: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .map_err(|e| Error::io("<stdout>", e))
    }

    fn flush(&self) -> Result<()> {
        io::stdout().lock().flush().map_err(|e| Error::io("<stdout>", e))
    }

    fn description(&self) -> String {
        "stdout".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_destination_write_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Filtered").join("wanted_list.xml");

        let dest = FileDestination::new(path.clone());
        dest.write_str("<INVENTORY></INVENTORY>").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<INVENTORY></INVENTORY>"
        );
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_file_destination_unwritable_parent() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let dest = FileDestination::new(blocker.join("out.xml"));
        assert!(matches!(dest.write_str("x"), Err(Error::Write { .. })));
    }

    #[test]
    fn test_file_destination_description() {
        let dest = FileDestination::new(PathBuf::from("/tmp/wanted_list.xml"));
        assert!(dest.description().contains("wanted_list.xml"));
    }

    #[test]
    fn test_stdout_destination_description() {
        assert_eq!(StdoutDestination::new().description(), "stdout");
    }
}
