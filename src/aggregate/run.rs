use super::aggregator::Aggregator;
use super::model::CollectionReport;
use crate::colors::ColorLookup;
use crate::errors::ProcessingFailure;
use crate::inventory::{read_all, ParseOptions};
use std::path::PathBuf;

/// Aggregate a batch of inventory files.
///
/// Files that cannot be read or parsed are skipped and listed in
/// [`CollectionReport::failures`], as are individual rejected records.
pub fn aggregate_paths(
    paths: &[PathBuf],
    lookup: &ColorLookup,
    options: ParseOptions,
) -> CollectionReport {
    let mut aggregator = Aggregator::new(lookup);
    let mut failures = Vec::new();

    for (path, parsed) in read_all(paths, options) {
        let _span = tracing::debug_span!("aggregate", file = %path.display()).entered();
        match parsed {
            Ok(document) => {
                for issue in &document.rejected {
                    failures.push(ProcessingFailure::record(&path, issue));
                }
                aggregator.fold_document(&document);
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                failures.push(ProcessingFailure::from_error(&path, &e));
            }
        }
    }

    let mut report = aggregator.finalize();
    report.failures = failures;
    log::info!(
        "Aggregated {} records from {} files ({} problems)",
        report.records_folded,
        report.sets.len(),
        report.failures.len()
    );
    report
}
