//! Keyed running totals that remember insertion order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Needed / filled / total counters. Only [`Totals::add`] mutates them, so
/// `total_qty == needed_total + filled_total` holds in every state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    needed_total: u64,
    filled_total: u64,
    total_qty: u64,
}

impl Totals {
    pub fn add(&mut self, needed: u64, filled: u64) {
        self.needed_total = self.needed_total.saturating_add(needed);
        self.filled_total = self.filled_total.saturating_add(filled);
        self.total_qty = self.needed_total.saturating_add(self.filled_total);
    }

    pub fn absorb(&mut self, other: &Totals) {
        self.add(other.needed_total, other.filled_total);
    }

    pub fn needed_total(&self) -> u64 {
        self.needed_total
    }

    pub fn filled_total(&self) -> u64 {
        self.filled_total
    }

    pub fn total_qty(&self) -> u64 {
        self.total_qty
    }

    /// Percentage of pieces already acquired.
    pub fn completion_pct(&self) -> f64 {
        crate::stats::completion(self.needed_total, self.filled_total)
    }
}

/// Anything that can be ranked by its total quantity.
pub trait Accumulator {
    fn key(&self) -> &str;
    fn totals(&self) -> &Totals;

    fn total_qty(&self) -> u64 {
        self.totals().total_qty()
    }
}

/// Map from key to accumulator that iterates in first-insertion order.
#[derive(Debug, Clone)]
pub struct TallyTable<V> {
    index: HashMap<String, usize>,
    entries: Vec<V>,
}

impl<V> Default for TallyTable<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> TallyTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `key`, created by `zeroed` the first time the key is seen.
    pub fn get_or_insert_zeroed(&mut self, key: &str, zeroed: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(zeroed());
                self.index.insert(key.to_string(), slot);
                slot
            }
        };
        &mut self.entries[slot]
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.entries.iter()
    }
}

impl<V: Accumulator> TallyTable<V> {
    /// Entries by total quantity, largest first; equal totals keep insertion order.
    pub fn ranked(&self) -> Vec<&V> {
        let mut ranked: Vec<&V> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.total_qty().cmp(&a.total_qty()));
        ranked
    }

    pub fn into_ranked(self) -> Vec<V> {
        let mut ranked = self.entries;
        ranked.sort_by(|a, b| b.total_qty().cmp(&a.total_qty()));
        ranked
    }
}
