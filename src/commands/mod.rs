//! CLI command implementations for brickledger operations.
//!
//! Available commands:
//! - **report**: Aggregate inventory files into collection statistics
//! - **combine**: Merge wanted records into a single wanted list
//! - **init**: Initialize a new brickledger configuration file

pub mod combine;
pub mod init;
pub mod report;

pub use combine::{run_combine, CombineCommand, CombineRun};
pub use init::{init_config, init_config_in};
pub use report::{run_report, ReportCommand};
