use super::tally::{Accumulator, Totals};
use crate::errors::ProcessingFailure;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Running totals for one color code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAggregate {
    pub color_code: String,
    /// Name from the color table, or the code itself when unmapped.
    pub display_name: String,
    #[serde(flatten)]
    pub totals: Totals,
}

impl ColorAggregate {
    pub fn zeroed(color_code: &str, display_name: &str) -> Self {
        Self {
            color_code: color_code.to_string(),
            display_name: display_name.to_string(),
            totals: Totals::default(),
        }
    }

    pub fn add(&mut self, needed: u64, filled: u64) {
        self.totals.add(needed, filled);
    }
}

impl Accumulator for ColorAggregate {
    fn key(&self) -> &str {
        &self.color_code
    }

    fn totals(&self) -> &Totals {
        &self.totals
    }
}

/// Running totals for one item id across the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAggregate {
    pub item_id: String,
    /// Item type of the first record seen for this id.
    pub item_type: String,
    #[serde(flatten)]
    pub totals: Totals,
    pub distinct_colors: BTreeSet<String>,
    pub source_files: BTreeSet<String>,
}

impl ItemAggregate {
    pub fn zeroed(item_id: &str, item_type: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            item_type: item_type.to_string(),
            totals: Totals::default(),
            distinct_colors: BTreeSet::new(),
            source_files: BTreeSet::new(),
        }
    }

    pub fn add(&mut self, needed: u64, filled: u64, color_key: &str, file_name: &str) {
        self.totals.add(needed, filled);
        if !self.distinct_colors.contains(color_key) {
            self.distinct_colors.insert(color_key.to_string());
        }
        if !self.source_files.contains(file_name) {
            self.source_files.insert(file_name.to_string());
        }
    }
}

impl Accumulator for ItemAggregate {
    fn key(&self) -> &str {
        &self.item_id
    }

    fn totals(&self) -> &Totals {
        &self.totals
    }
}

/// Totals for one inventory file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSummary {
    pub name: String,
    #[serde(flatten)]
    pub totals: Totals,
    /// `filled_total / total_qty`, or 0 for an empty set.
    pub completion_ratio: f64,
    pub record_count: usize,
    /// Per-color breakdown, largest total first.
    pub colors: Vec<ColorAggregate>,
}

impl SetSummary {
    pub fn completion_pct(&self) -> f64 {
        self.completion_ratio * 100.0
    }
}

pub fn completion_ratio(totals: &Totals) -> f64 {
    if totals.total_qty() == 0 {
        0.0
    } else {
        totals.filled_total() as f64 / totals.total_qty() as f64
    }
}

/// Final, read-only result of an aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    /// One entry per folded file, in processing order.
    pub sets: Vec<SetSummary>,
    /// Largest total first; ties in first-seen order.
    pub colors: Vec<ColorAggregate>,
    pub items: Vec<ItemAggregate>,
    #[serde(flatten)]
    pub totals: Totals,
    pub completion_pct: f64,
    pub records_folded: usize,
    pub warnings: Vec<String>,
    #[serde(default)]
    pub failures: Vec<ProcessingFailure>,
}

impl CollectionReport {
    pub fn distinct_colors(&self) -> usize {
        self.colors.len()
    }

    pub fn distinct_items(&self) -> usize {
        self.items.len()
    }

    pub fn color(&self, code: &str) -> Option<&ColorAggregate> {
        self.colors.iter().find(|c| c.color_code == code)
    }

    pub fn item(&self, item_id: &str) -> Option<&ItemAggregate> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    pub fn set(&self, name: &str) -> Option<&SetSummary> {
        self.sets.iter().find(|s| s.name == name)
    }
}
