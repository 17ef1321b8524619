use super::model::{completion_ratio, CollectionReport, ColorAggregate, ItemAggregate, SetSummary};
use super::tally::{TallyTable, Totals};
use super::warnings::WarningLog;
use crate::colors::ColorLookup;
use crate::core::InventoryRecord;
use crate::inventory::InventoryDocument;

/// Set name used when records are folded without [`Aggregator::begin_file`].
pub const UNNAMED_SET: &str = "(unnamed)";

/// Accumulator for the file currently being folded.
#[derive(Debug)]
struct OpenSet {
    name: String,
    totals: Totals,
    record_count: usize,
    colors: TallyTable<ColorAggregate>,
    unmapped: Vec<String>,
}

impl OpenSet {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            totals: Totals::default(),
            record_count: 0,
            colors: TallyTable::new(),
            unmapped: Vec::new(),
        }
    }
}

/// Folds inventory records into per-color, per-item and per-file totals.
///
/// All state lives in the aggregator itself, so independent runs never share
/// warnings or counters. Color and item keys persist across files.
pub struct Aggregator<'a> {
    lookup: &'a ColorLookup,
    colors: TallyTable<ColorAggregate>,
    items: TallyTable<ItemAggregate>,
    sets: Vec<SetSummary>,
    warnings: WarningLog,
    current: Option<OpenSet>,
    records_folded: usize,
}

impl<'a> Aggregator<'a> {
    pub fn new(lookup: &'a ColorLookup) -> Self {
        Self {
            lookup,
            colors: TallyTable::new(),
            items: TallyTable::new(),
            sets: Vec::new(),
            warnings: WarningLog::new(),
            current: None,
            records_folded: 0,
        }
    }

    /// Start a fresh per-file summary, closing any file still open.
    pub fn begin_file(&mut self, name: &str) {
        self.end_file();
        self.current = Some(OpenSet::new(name));
    }

    pub fn fold(&mut self, record: &InventoryRecord) {
        if self.current.is_none() {
            self.current = Some(OpenSet::new(UNNAMED_SET));
        }
        let Some(set) = self.current.as_mut() else {
            return;
        };

        let color_key = record.color_key();
        let name = self.lookup.resolve(color_key);
        if !name.is_mapped() && !set.unmapped.iter().any(|c| c == color_key) {
            set.unmapped.push(color_key.to_string());
        }

        let (needed, filled) = (record.needed_qty, record.filled_qty);
        set.totals.add(needed, filled);
        set.record_count += 1;
        set.colors
            .get_or_insert_zeroed(color_key, || ColorAggregate::zeroed(color_key, name.label()))
            .add(needed, filled);

        self.colors
            .get_or_insert_zeroed(color_key, || ColorAggregate::zeroed(color_key, name.label()))
            .add(needed, filled);

        let item_key = record.item_key();
        self.items
            .get_or_insert_zeroed(item_key, || ItemAggregate::zeroed(item_key, &record.item_type))
            .add(needed, filled, color_key, &set.name);

        self.records_folded += 1;
    }

    /// Close the current file: store its summary and emit its unmapped-color warnings.
    pub fn end_file(&mut self) -> Option<&SetSummary> {
        let set = self.current.take()?;

        for code in &set.unmapped {
            if self.warnings.unmapped_color(code, &set.name) {
                log::warn!(
                    "Color code {} not found in color mapping ({})",
                    code,
                    set.name
                );
            }
        }

        log::debug!(
            "Folded {} records from {} ({} pieces)",
            set.record_count,
            set.name,
            set.totals.total_qty()
        );

        self.sets.push(SetSummary {
            completion_ratio: completion_ratio(&set.totals),
            name: set.name,
            totals: set.totals,
            record_count: set.record_count,
            colors: set.colors.into_ranked(),
        });
        self.sets.last()
    }

    /// Fold every usable record of a parsed document as one file.
    pub fn fold_document(&mut self, document: &InventoryDocument) {
        self.begin_file(&document.file_name());
        for record in &document.records {
            self.fold(record);
        }
        self.end_file();
    }

    pub fn warnings(&self) -> &WarningLog {
        &self.warnings
    }

    pub fn color(&self, code: &str) -> Option<&ColorAggregate> {
        self.colors.get(code)
    }

    pub fn item(&self, item_id: &str) -> Option<&ItemAggregate> {
        self.items.get(item_id)
    }

    pub fn sets(&self) -> &[SetSummary] {
        &self.sets
    }

    pub fn finalize(mut self) -> CollectionReport {
        self.end_file();

        let mut totals = Totals::default();
        for set in &self.sets {
            totals.absorb(&set.totals);
        }

        CollectionReport {
            sets: self.sets,
            colors: self.colors.into_ranked(),
            items: self.items.into_ranked(),
            completion_pct: totals.completion_pct(),
            totals,
            records_folded: self.records_folded,
            warnings: self.warnings.into_sorted(),
            failures: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Accumulator;

    fn lookup() -> ColorLookup {
        [("5", "Red"), ("11", "Black")].into_iter().collect()
    }

    #[test]
    fn test_zero_needed_still_counts_filled() {
        let colors = lookup();
        let mut agg = Aggregator::new(&colors);
        agg.begin_file("A.xml");
        agg.fold(&InventoryRecord::new("3002", "5", 0, 5));
        let report = agg.finalize();

        let red = report.color("5").unwrap();
        assert_eq!(red.totals.filled_total(), 5);
        assert_eq!(red.totals.needed_total(), 0);
        assert_eq!(red.display_name, "Red");
    }

    #[test]
    fn test_missing_color_warns_once_per_file() {
        let colors = lookup();
        let mut agg = Aggregator::new(&colors);
        agg.begin_file("A.xml");
        for _ in 0..3 {
            agg.fold(&InventoryRecord::new("3001", "", 1, 0));
        }
        agg.end_file();
        assert_eq!(agg.warnings().len(), 1);

        let report = agg.finalize();
        assert_eq!(report.colors[0].color_code, "0");
        assert_eq!(report.colors[0].display_name, "0");
        assert_eq!(
            report.warnings,
            vec!["Color code 0 not found in color mapping. Using color code as label. File: A.xml"]
        );
    }

    #[test]
    fn test_keys_accumulate_across_files() {
        let colors = lookup();
        let mut agg = Aggregator::new(&colors);
        agg.begin_file("A.xml");
        agg.fold(&InventoryRecord::new("3001", "5", 4, 1));
        agg.begin_file("B.xml");
        agg.fold(&InventoryRecord::new("3001", "11", 2, 0));
        let report = agg.finalize();

        assert_eq!(report.sets.len(), 2);
        let item = report.item("3001").unwrap();
        assert_eq!(item.total_qty(), 7);
        assert_eq!(item.distinct_colors.len(), 2);
        assert_eq!(item.source_files.len(), 2);
        assert_eq!(report.totals.total_qty(), 7);
    }

    #[test]
    fn test_ranking_ties_follow_first_seen() {
        let colors = lookup();
        let mut agg = Aggregator::new(&colors);
        agg.begin_file("A.xml");
        agg.fold(&InventoryRecord::new("1", "11", 2, 0));
        agg.fold(&InventoryRecord::new("2", "5", 2, 0));
        agg.fold(&InventoryRecord::new("3", "7", 3, 0));
        let report = agg.finalize();

        let order: Vec<&str> = report.colors.iter().map(|c| c.color_code.as_str()).collect();
        assert_eq!(order, vec!["7", "11", "5"]);
    }

    #[test]
    fn test_empty_set_completion_is_zero() {
        let colors = lookup();
        let mut agg = Aggregator::new(&colors);
        agg.begin_file("empty.xml");
        let summary = agg.end_file().unwrap();
        assert_eq!(summary.completion_ratio, 0.0);
        assert_eq!(summary.record_count, 0);
    }

    #[test]
    fn test_fold_without_begin_uses_unnamed_set() {
        let colors = lookup();
        let mut agg = Aggregator::new(&colors);
        agg.fold(&InventoryRecord::new("", "5", 1, 1));
        let report = agg.finalize();
        assert_eq!(report.sets[0].name, UNNAMED_SET);
        assert!(report.item("Unknown").is_some());
        assert_eq!(report.sets[0].completion_ratio, 0.5);
    }
}
