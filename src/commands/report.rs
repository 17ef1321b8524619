use crate::aggregate::{aggregate_paths, CollectionReport};
use crate::colors::ColorLookup;
use crate::config::{load_config, Overrides, Settings};
use crate::core::Error;
use crate::errors::{report_brief_summary, BatchResults};
use crate::formatting::FormattingConfig;
use crate::inventory::ParseOptions;
use crate::io::InventoryWalker;
use crate::output::{effective_formatting, emit, render_report, ReportView};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct ReportCommand {
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
    pub output: Option<PathBuf>,
    pub parse: ParseOptions,
    pub formatting: FormattingConfig,
}

/// Configuration problems surface before any inventory file is opened.
pub fn run_report(command: ReportCommand) -> Result<CollectionReport> {
    let loaded = load_config(command.config.as_deref())?;
    let settings = Settings::resolve(&loaded, command.overrides)?;

    let mapping = settings.color_mapping.as_deref().ok_or_else(|| {
        Error::config("no color mapping given; pass --colors or set [colors] mapping")
    })?;
    let lookup = ColorLookup::load(mapping)?;

    let listing = InventoryWalker::new(settings.input_folder.clone())
        .with_formats(settings.formats.clone())
        .with_excluded(settings.excluded.iter().cloned())
        .with_own_files(settings.own_files())
        .walk()?;
    log::info!(
        "Aggregating {} inventory files from {}",
        listing.files.len(),
        settings.input_folder.display()
    );

    let report = aggregate_paths(&listing.files, &lookup, command.parse);

    let view = ReportView::new(&report, settings.top);
    let formatting = effective_formatting(command.formatting, command.output.as_ref());
    let rendered = render_report(&view, settings.report_format, formatting)
        .context("Failed to render report")?;
    emit(&rendered, command.output.clone()).context("Failed to write report")?;

    let sets: Vec<&str> = report.sets.iter().map(|set| set.name.as_str()).collect();
    report_brief_summary(&BatchResults::new(sets, report.failures.clone()));

    Ok(report)
}
