// Export modules for library usage
pub mod aggregate;
pub mod cli;
pub mod colors;
pub mod combine;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod inventory;
pub mod io;
pub mod output;
pub mod stats;

// Re-export commonly used types
pub use crate::core::{Error, FieldSlot, FieldTag, InventoryRecord, Result};

pub use crate::inventory::{read_all, read_inventory, InputFormat, InventoryDocument, ParseOptions};

pub use crate::colors::{ColorLookup, ColorName};

pub use crate::aggregate::{
    aggregate_paths, Aggregator, CollectionReport, ColorAggregate, ItemAggregate, SetSummary,
};

pub use crate::combine::{combine, CombineOutput, CombineStats, Combiner, WantedDocument};

pub use crate::stats::{completion, rarity_buckets, RarityBuckets};
