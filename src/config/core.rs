use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure, read from `.brickledger.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Where inventory files are read from
    #[serde(default)]
    pub input: InputConfig,

    /// Color table location
    #[serde(default)]
    pub colors: ColorsConfig,

    /// Combine output locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Report rendering
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Folder holding the inventory files
    #[serde(default)]
    pub folder: Option<PathBuf>,

    /// File names to skip entirely
    #[serde(default)]
    pub excluded: Vec<String>,

    /// Enabled file extensions
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            folder: None,
            excluded: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorsConfig {
    /// JSON object mapping color codes to names
    #[serde(default)]
    pub mapping: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_filtered_folder")]
    pub filtered_folder: PathBuf,

    #[serde(default = "default_wanted_list")]
    pub wanted_list: PathBuf,

    #[serde(default = "default_filtered_prefix")]
    pub filtered_prefix: String,

    /// Container tag of the merged wanted list
    #[serde(default = "default_root_tag")]
    pub root_tag: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filtered_folder: default_filtered_folder(),
            wanted_list: default_wanted_list(),
            filtered_prefix: default_filtered_prefix(),
            root_tag: default_root_tag(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,

    /// Rows shown in each ranking table
    #[serde(default = "default_top")]
    pub top: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            top: default_top(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Terminal,
    Markdown,
    Json,
}

pub fn default_extensions() -> Vec<String> {
    vec!["xml".to_string(), "csv".to_string(), "json".to_string()]
}

pub fn default_filtered_folder() -> PathBuf {
    PathBuf::from("Filtered")
}

pub fn default_wanted_list() -> PathBuf {
    PathBuf::from("wanted_list.xml")
}

pub fn default_filtered_prefix() -> String {
    "filtered_".to_string()
}

pub fn default_root_tag() -> String {
    crate::inventory::INVENTORY_TAG.to_string()
}

pub fn default_top() -> usize {
    15
}
