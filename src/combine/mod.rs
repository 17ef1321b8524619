//! Wanted-list combination.
//!
//! Merges the wanted records of many inventory files into one deduplicated
//! purchase list and produces a filtered, needed-only copy of each file.

pub mod combiner;
pub mod document;
pub mod write;

pub use combiner::{combine, CombineOutput, CombineStats, Combiner, FilteredDocument};
pub use document::{written_fields, WantedDocument};
pub use write::{write_outputs, OutputLayout, WriteSummary};
