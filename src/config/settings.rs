//! Effective settings for one invocation: config file values with command
//! line overrides applied and paths resolved.

use super::core::ReportFormat;
use super::loader::{resolve_path, LoadedConfig};
use super::validation::validate_settings;
use crate::combine::OutputLayout;
use crate::core::Result;
use crate::inventory::InputFormat;
use std::path::PathBuf;

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub folder: Option<PathBuf>,
    /// Added to the configured exclusions.
    pub excluded: Vec<String>,
    pub color_mapping: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub top: Option<usize>,
    pub wanted_list: Option<PathBuf>,
    pub filtered_folder: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input_folder: PathBuf,
    pub excluded: Vec<String>,
    pub formats: Vec<InputFormat>,
    pub color_mapping: Option<PathBuf>,
    pub layout: OutputLayout,
    pub root_tag: String,
    pub report_format: ReportFormat,
    pub top: usize,
}

impl Settings {
    /// Merge config and overrides, then validate. Every problem is reported
    /// at once as a single configuration error.
    pub fn resolve(loaded: &LoadedConfig, overrides: Overrides) -> Result<Self> {
        let config = &loaded.config;
        let base = loaded.base_dir();

        let input_folder = match overrides.folder {
            Some(folder) => folder,
            None => config
                .input
                .folder
                .as_deref()
                .map(|folder| resolve_path(base, folder))
                .unwrap_or_default(),
        };

        let mut excluded = config.input.excluded.clone();
        for name in overrides.excluded {
            if !excluded.contains(&name) {
                excluded.push(name);
            }
        }

        let color_mapping = overrides.color_mapping.or_else(|| {
            config
                .colors
                .mapping
                .as_deref()
                .map(|path| resolve_path(base, path))
        });

        let output = &config.output;
        let layout = OutputLayout {
            filtered_folder: overrides
                .filtered_folder
                .unwrap_or_else(|| resolve_path(base, &output.filtered_folder)),
            filtered_prefix: output.filtered_prefix.clone(),
            wanted_list: overrides
                .wanted_list
                .unwrap_or_else(|| resolve_path(base, &output.wanted_list)),
        };

        let settings = Self {
            input_folder,
            excluded,
            formats: config
                .input
                .extensions
                .iter()
                .filter_map(|ext| InputFormat::from_extension(ext))
                .collect(),
            color_mapping,
            layout,
            root_tag: output.root_tag.clone(),
            report_format: overrides.format.unwrap_or(config.report.format),
            top: overrides.top.unwrap_or(config.report.top),
        };

        validate_settings(&settings, config)?;
        Ok(settings)
    }

    /// Files this run reads or writes besides the inventories. They are
    /// skipped if they live in the input folder.
    pub fn own_files(&self) -> Vec<PathBuf> {
        std::iter::once(self.layout.wanted_list.clone())
            .chain(self.color_mapping.clone())
            .collect()
    }
}
