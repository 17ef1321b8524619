use crate::config::ReportFormat;
use crate::inventory::ParseOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "brickledger")]
#[command(about = "LEGO inventory statistics and wanted-list combiner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .brickledger.toml)
    #[arg(short, long, global = true, env = "BRICKLEDGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Disable colors and unicode symbols
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate inventory files into collection statistics
    Report {
        /// Folder containing inventory files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// JSON color table (code to name)
        #[arg(long = "colors")]
        colors: Option<PathBuf>,

        /// File names to skip (comma-separated)
        #[arg(long = "exclude", value_delimiter = ',')]
        exclude: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows shown per ranking table
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Number of parser threads (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0")]
        jobs: usize,

        /// Parse files one at a time
        #[arg(long = "no-parallel")]
        no_parallel: bool,
    },

    /// Merge wanted records of all inventory files into one wanted list
    Combine {
        /// Folder containing inventory files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// File names to skip (comma-separated)
        #[arg(long = "exclude", value_delimiter = ',')]
        exclude: Vec<String>,

        /// Merged wanted list path
        #[arg(long = "wanted-list")]
        wanted_list: Option<PathBuf>,

        /// Folder for per-file filtered documents
        #[arg(long = "filtered-folder")]
        filtered_folder: Option<PathBuf>,

        /// Do not write per-file filtered documents
        #[arg(long = "no-filtered")]
        no_filtered: bool,

        /// Number of parser threads (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0")]
        jobs: usize,

        /// Parse files one at a time
        #[arg(long = "no-parallel")]
        no_parallel: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse options from the shared `--jobs` / `--no-parallel` flags.
pub fn parse_options(jobs: usize, no_parallel: bool) -> ParseOptions {
    ParseOptions {
        parallel: !no_parallel && jobs != 1,
        jobs,
    }
}

/// Default log filter for a `-v` count.
pub fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
