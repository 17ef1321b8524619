//! Completion reporting for batch operations.

use super::collection::BatchResults;
use super::summary::ErrorSummary;

/// Reports completion summary for a batch to stderr.
pub fn report_completion_summary<T>(results: &BatchResults<T>) {
    eprintln!("\nProcessing Summary:");
    eprintln!("  Total files: {}", results.total_count());
    eprintln!("  Successfully read: {}", results.success_count());
    eprintln!("  Failed: {}", results.failure_count());
    eprintln!("  Success rate: {:.1}%", results.success_rate() * 100.0);

    if !results.failures.is_empty() {
        let summary = ErrorSummary::from_failures(&results.failures);
        eprintln!("{}", summary.report());
    }
}

/// Reports brief summary (just counts).
pub fn report_brief_summary<T>(results: &BatchResults<T>) {
    if results.is_complete_success() {
        eprintln!("✓ Read {} inventory files", results.success_count());
    } else {
        eprintln!(
            "⚠ Read {} inventory files ({} problems)",
            results.success_count(),
            results.failure_count()
        );
    }
}
