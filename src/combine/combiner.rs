use super::document::WantedDocument;
use crate::errors::ProcessingFailure;
use crate::inventory::{file_name_of, read_all, InventoryDocument, ParseOptions, INVENTORY_TAG};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

/// Counters exposed by a combine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CombineStats {
    pub files_processed: usize,
    /// Records seen in processed files, including rejected ones.
    pub records_scanned: usize,
    /// Wanted records copied into filtered documents.
    pub records_added: usize,
    /// Records merged into an existing wanted-list entry.
    pub items_combined: usize,
}

/// Filtered copy of one processed input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredDocument {
    pub file_name: String,
    pub document: WantedDocument,
}

#[derive(Debug, Clone, Default)]
pub struct CombineOutput {
    pub merged: WantedDocument,
    /// One entry per processed file, in processing order.
    pub filtered: Vec<FilteredDocument>,
    pub stats: CombineStats,
    pub failures: Vec<ProcessingFailure>,
}

impl CombineOutput {
    pub fn filtered_for(&self, file_name: &str) -> Option<&WantedDocument> {
        self.filtered
            .iter()
            .find(|f| f.file_name == file_name)
            .map(|f| &f.document)
    }
}

/// Builds the merged wanted list and per-file filtered documents.
///
/// Entries are keyed by `(item_id, color_code)`. The first file to introduce
/// a key is recorded in the entry's remarks; later files only add to its
/// needed quantity.
#[derive(Debug)]
pub struct Combiner {
    merged: WantedDocument,
    index: HashMap<(String, String), usize>,
    filtered: Vec<FilteredDocument>,
    stats: CombineStats,
    failures: Vec<ProcessingFailure>,
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new()
    }
}

impl Combiner {
    pub fn new() -> Self {
        Self::with_root_tag(INVENTORY_TAG)
    }

    /// Combiner whose merged document uses `root_tag` as its container.
    pub fn with_root_tag(root_tag: &str) -> Self {
        Self {
            merged: WantedDocument::new(root_tag),
            index: HashMap::new(),
            filtered: Vec::new(),
            stats: CombineStats::default(),
            failures: Vec::new(),
        }
    }

    /// Fold one parsed file into the merged list and produce its filtered copy.
    pub fn add_document(&mut self, document: &InventoryDocument) {
        let file_name = document.file_name();
        let mut filtered = WantedDocument::new(document.root_tag.clone());

        self.stats.files_processed += 1;
        self.stats.records_scanned += document.records.len() + document.rejected.len();

        for issue in &document.rejected {
            self.failures
                .push(ProcessingFailure::record(&document.source, issue));
        }

        for record in document.records.iter().filter(|r| r.is_wanted()) {
            let copy = record.wanted_copy();
            filtered.items.push(copy.clone());
            self.stats.records_added += 1;

            let key = record.merge_key();
            match self.index.get(&key).copied() {
                Some(slot) => {
                    let entry = &mut self.merged.items[slot];
                    entry.needed_qty = entry.needed_qty.saturating_add(record.needed_qty);
                    self.stats.items_combined += 1;
                }
                None => {
                    self.index.insert(key, self.merged.items.len());
                    self.merged.items.push(copy.with_remarks(file_name.as_str()));
                }
            }
        }

        log::debug!(
            "{}: {} of {} records wanted",
            file_name,
            filtered.len(),
            document.records.len()
        );
        self.filtered.push(FilteredDocument {
            file_name,
            document: filtered,
        });
    }

    /// Record a file that could not be read; it contributes nothing.
    pub fn skip_file(&mut self, failure: ProcessingFailure) {
        log::warn!("Skipping {}: {}", failure.path.display(), failure.error);
        self.failures.push(failure);
    }

    pub fn stats(&self) -> &CombineStats {
        &self.stats
    }

    pub fn finish(self) -> CombineOutput {
        log::info!(
            "Combined {} files: {} wanted records, {} merged entries, {} combined",
            self.stats.files_processed,
            self.stats.records_added,
            self.merged.len(),
            self.stats.items_combined
        );
        CombineOutput {
            merged: self.merged,
            filtered: self.filtered,
            stats: self.stats,
            failures: self.failures,
        }
    }

    /// Read and fold `paths` in order. Files whose name is in `excluded` are
    /// dropped before anything is opened.
    pub fn combine_paths(
        mut self,
        paths: &[PathBuf],
        excluded: &[String],
        options: ParseOptions,
    ) -> CombineOutput {
        let excluded: BTreeSet<&str> = excluded.iter().map(String::as_str).collect();
        let selected: Vec<PathBuf> = paths
            .iter()
            .filter(|path| {
                let keep = !excluded.contains(file_name_of(path).as_str());
                if !keep {
                    log::debug!("Excluding {}", path.display());
                }
                keep
            })
            .cloned()
            .collect();

        for (path, parsed) in read_all(&selected, options) {
            let _span = tracing::debug_span!("combine", file = %path.display()).entered();
            match parsed {
                Ok(document) => self.add_document(&document),
                Err(e) => self.skip_file(ProcessingFailure::from_error(&path, &e)),
            }
        }
        self.finish()
    }
}

/// Combine `paths` with the default container tag and parse options.
pub fn combine(paths: &[PathBuf], excluded: &[String]) -> CombineOutput {
    Combiner::new().combine_paths(paths, excluded, ParseOptions::default())
}
