//! Completion percentages and rarity buckets.

use crate::aggregate::Accumulator;
use serde::Serialize;

/// Percentage of `filled` in `needed + filled`; 0 for an empty total.
pub fn completion(needed: u64, filled: u64) -> f64 {
    let total = needed as f64 + filled as f64;
    if total == 0.0 {
        0.0
    } else {
        filled as f64 / total * 100.0
    }
}

/// End indices of the ultra-rare, rare and uncommon slices for `n` items:
/// floor of 5%, 15% and 50% of `n`.
pub fn cut_points(n: usize) -> (usize, usize, usize) {
    (n * 5 / 100, n * 15 / 100, n * 50 / 100)
}

/// Partition of items by ascending total quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RarityBuckets<T> {
    pub ultra_rare: Vec<T>,
    pub rare: Vec<T>,
    pub uncommon: Vec<T>,
    pub common: Vec<T>,
}

impl<T> RarityBuckets<T> {
    pub fn len(&self) -> usize {
        self.ultra_rare.len() + self.rare.len() + self.uncommon.len() + self.common.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<'s, U>(&'s self, f: impl Fn(&'s T) -> U) -> RarityBuckets<U> {
        RarityBuckets {
            ultra_rare: self.ultra_rare.iter().map(&f).collect(),
            rare: self.rare.iter().map(&f).collect(),
            uncommon: self.uncommon.iter().map(&f).collect(),
            common: self.common.iter().map(&f).collect(),
        }
    }

    /// Buckets with their labels, rarest first.
    pub fn labeled(&self) -> [(&'static str, &[T]); 4] {
        [
            ("Ultra rare", self.ultra_rare.as_slice()),
            ("Rare", self.rare.as_slice()),
            ("Uncommon", self.uncommon.as_slice()),
            ("Common", self.common.as_slice()),
        ]
    }
}

/// Split items into rarity buckets. Items are sorted ascending by total
/// (stable, so equal totals keep their input order) and sliced `[lo, hi)`.
pub fn rarity_buckets<T: Accumulator + Clone>(items: &[T]) -> RarityBuckets<T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.total_qty());

    let (ultra, rare, uncommon) = cut_points(sorted.len());
    let slice = |lo: usize, hi: usize| -> Vec<T> {
        sorted[lo..hi].iter().map(|&item| item.clone()).collect()
    };

    RarityBuckets {
        ultra_rare: slice(0, ultra),
        rare: slice(ultra, rare),
        uncommon: slice(rare, uncommon),
        common: slice(uncommon, sorted.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{ItemAggregate, Totals};

    fn item(id: &str, qty: u64) -> ItemAggregate {
        let mut item = ItemAggregate::zeroed(id, "P");
        item.add(qty, 0, "0", "set.xml");
        item
    }

    fn ids(bucket: &[ItemAggregate]) -> Vec<&str> {
        bucket.iter().map(|i| i.item_id.as_str()).collect()
    }

    #[test]
    fn test_completion() {
        assert_eq!(completion(0, 0), 0.0);
        assert_eq!(completion(3, 1), 25.0);
        assert_eq!(completion(0, 5), 100.0);
        assert_eq!(completion(5, 0), 0.0);
    }

    #[test]
    fn test_ten_items_cut_points() {
        let items: Vec<ItemAggregate> = (1..=10).rev().map(|q| item(&q.to_string(), q)).collect();
        let buckets = rarity_buckets(&items);

        assert!(buckets.ultra_rare.is_empty());
        assert_eq!(ids(&buckets.rare), vec!["1"]);
        assert_eq!(ids(&buckets.uncommon), vec!["2", "3", "4", "5"]);
        assert_eq!(ids(&buckets.common), vec!["6", "7", "8", "9", "10"]);
    }

    #[test]
    fn test_twenty_items_fill_every_bucket() {
        let items: Vec<ItemAggregate> = (1..=20).map(|q| item(&q.to_string(), q)).collect();
        let buckets = rarity_buckets(&items);
        assert_eq!(
            [
                buckets.ultra_rare.len(),
                buckets.rare.len(),
                buckets.uncommon.len(),
                buckets.common.len()
            ],
            [1, 2, 7, 10]
        );
    }

    #[test]
    fn test_boundary_ties_keep_input_order() {
        let items = vec![item("b", 1), item("a", 1), item("c", 2), item("d", 3)];
        let buckets = rarity_buckets(&items);
        assert_eq!(ids(&buckets.uncommon), vec!["b", "a"]);
        assert_eq!(ids(&buckets.common), vec!["c", "d"]);
    }

    #[test]
    fn test_empty_input() {
        let buckets = rarity_buckets::<ItemAggregate>(&[]);
        assert!(buckets.is_empty());
        assert_eq!(Totals::default().completion_pct(), 0.0);
    }
}
