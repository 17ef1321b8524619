//! Collection-wide aggregation of inventory records.
//!
//! The [`Aggregator`] folds records file by file into per-color, per-item and
//! per-file totals and collects unmapped-color warnings; [`aggregate_paths`]
//! drives it over a batch of files.

pub mod aggregator;
pub mod model;
pub mod run;
pub mod tally;
pub mod warnings;

pub use aggregator::{Aggregator, UNNAMED_SET};
pub use model::{CollectionReport, ColorAggregate, ItemAggregate, SetSummary};
pub use run::aggregate_paths;
pub use tally::{Accumulator, TallyTable, Totals};
pub use warnings::{unmapped_color_message, WarningLog};
