//! Error summary generation for batch operations.

use super::collection::{OperationType, ProcessingFailure};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Summary of errors from batch operations.
#[derive(Debug)]
pub struct ErrorSummary {
    pub total: usize,
    pub by_operation: BTreeMap<OperationType, usize>,
    pub by_error_kind: BTreeMap<String, Vec<PathBuf>>,
    pub sample_errors: Vec<ProcessingFailure>,
}

impl ErrorSummary {
    pub fn from_failures(failures: &[ProcessingFailure]) -> Self {
        let total = failures.len();

        let mut by_operation: BTreeMap<OperationType, usize> = BTreeMap::new();
        for failure in failures {
            *by_operation.entry(failure.operation).or_insert(0) += 1;
        }

        let mut by_error_kind: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for failure in failures {
            by_error_kind
                .entry(extract_error_kind(&failure.error))
                .or_default()
                .push(failure.path.clone());
        }

        let sample_errors = failures.iter().take(10).cloned().collect();

        Self {
            total,
            by_operation,
            by_error_kind,
            sample_errors,
        }
    }

    pub fn report(&self) -> String {
        let mut report = String::new();

        report.push_str("\nFailure breakdown:\n");
        for (op_type, count) in &self.by_operation {
            report.push_str(&format!("  {}: {}\n", op_type.as_str(), count));
        }

        report.push_str("\nError categories:\n");
        for (error_kind, paths) in &self.by_error_kind {
            report.push_str(&format!("  {}: {} occurrence(s)\n", error_kind, paths.len()));

            for path in paths.iter().take(3) {
                report.push_str(&format!("    - {}\n", path.display()));
            }

            if paths.len() > 3 {
                report.push_str(&format!("    ... and {} more\n", paths.len() - 3));
            }
        }

        report
    }
}

/// Extracts error kind from error message (first line or error type).
fn extract_error_kind(error: &str) -> String {
    if error.contains("Permission denied") {
        "Permission denied".to_string()
    } else if error.contains("No such file") || error.contains("not found") {
        "File not found".to_string()
    } else if error.contains("out of range") {
        "Quantity out of range".to_string()
    } else if error.contains("Unsupported") {
        "Unsupported format".to_string()
    } else if error.contains("Parse error") || error.contains("malformed") {
        "Malformed document".to_string()
    } else {
        error.lines().next().unwrap_or("Unknown error").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_summary_groups_by_operation() {
        let failures = vec![
            ProcessingFailure::file_read("a.xml", "Error 1"),
            ProcessingFailure::file_read("b.xml", "Error 2"),
            ProcessingFailure::file_parse("c.xml", "Error 3"),
        ];

        let summary = ErrorSummary::from_failures(&failures);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_operation[&OperationType::FileRead], 2);
        assert_eq!(summary.by_operation[&OperationType::FileParse], 1);
    }

    #[test]
    fn test_error_summary_groups_by_kind() {
        let failures = vec![
            ProcessingFailure::file_read("a.xml", "Permission denied (os error 13)"),
            ProcessingFailure::file_read("b.xml", "Permission denied (os error 13)"),
            ProcessingFailure::file_parse("c.xml", "Parse error in c.xml: malformed XML at byte 12"),
        ];

        let summary = ErrorSummary::from_failures(&failures);

        assert_eq!(
            summary.by_error_kind.get("Permission denied").map(|v| v.len()),
            Some(2)
        );
        assert_eq!(
            summary.by_error_kind.get("Malformed document").map(|v| v.len()),
            Some(1)
        );
    }

    #[test]
    fn test_error_summary_report_format() {
        let failures = vec![
            ProcessingFailure::file_read("a.xml", "Permission denied (os error 13)"),
            ProcessingFailure::file_parse("c.xml", "Parse error in c.xml: junk after document element"),
        ];

        let report = ErrorSummary::from_failures(&failures).report();

        assert!(report.contains("Failure breakdown:"));
        assert!(report.contains("Error categories:"));
        assert!(report.contains("Permission denied"));
        assert!(report.contains("Malformed document"));
    }
}
