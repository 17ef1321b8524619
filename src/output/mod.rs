pub mod json;
pub mod markdown;
pub mod terminal;

use crate::aggregate::{CollectionReport, ItemAggregate};
use crate::config::ReportFormat;
use crate::formatting::FormattingConfig;
use crate::io::{FileDestination, OutputDestination, StdoutDestination};
use crate::stats::{rarity_buckets, RarityBuckets};
use anyhow::Result;
use std::path::PathBuf;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

/// Everything a report renderer needs.
pub struct ReportView<'a> {
    pub report: &'a CollectionReport,
    pub rarity: RarityBuckets<ItemAggregate>,
    /// Rows shown in each ranking table.
    pub top: usize,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a CollectionReport, top: usize) -> Self {
        Self {
            report,
            rarity: rarity_buckets(&report.items),
            top,
        }
    }
}

pub trait ReportWriter {
    fn write_report(&mut self, view: &ReportView<'_>) -> Result<()>;
}

/// Render a report in the requested format.
pub fn render_report(
    view: &ReportView<'_>,
    format: ReportFormat,
    formatting: FormattingConfig,
) -> Result<String> {
    let mut buffer = Vec::new();
    match format {
        ReportFormat::Json => JsonWriter::new(&mut buffer).write_report(view)?,
        ReportFormat::Markdown => MarkdownWriter::new(&mut buffer).write_report(view)?,
        ReportFormat::Terminal => {
            TerminalWriter::new(&mut buffer, formatting).write_report(view)?
        }
    }
    Ok(String::from_utf8(buffer)?)
}

/// Send rendered output to a file (parents created) or stdout.
pub fn emit(content: &str, output_file: Option<PathBuf>) -> Result<()> {
    let destination: Box<dyn OutputDestination> = match output_file {
        Some(path) => Box::new(FileDestination::new(path)),
        None => Box::new(StdoutDestination::new()),
    };
    destination.write_str(content)?;
    destination.flush()?;
    log::debug!("Report written to {}", destination.description());
    Ok(())
}

/// Terminal output for a file target is written without colors.
pub fn effective_formatting(
    formatting: FormattingConfig,
    output_file: Option<&PathBuf>,
) -> FormattingConfig {
    if output_file.is_some() {
        FormattingConfig {
            color: crate::formatting::ColorMode::Never,
            ..formatting
        }
    } else {
        formatting
    }
}

/// Percentage with one decimal place.
pub(crate) fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::aggregate::{Aggregator, CollectionReport};
    use crate::colors::ColorLookup;
    use crate::core::InventoryRecord;
    use crate::errors::ProcessingFailure;

    pub fn sample_report() -> CollectionReport {
        let lookup: ColorLookup = [("5", "Red"), ("11", "Black")].into_iter().collect();
        let mut agg = Aggregator::new(&lookup);
        agg.begin_file("castle.xml");
        agg.fold(&InventoryRecord::new("3001", "5", 4, 1));
        agg.fold(&InventoryRecord::new("3003", "11", 0, 6));
        agg.begin_file("ship.xml");
        agg.fold(&InventoryRecord::new("3001", "5", 2, 0));
        agg.fold(&InventoryRecord::new("2780", "99", 10, 0));
        let mut report = agg.finalize();
        report.failures.push(ProcessingFailure::file_parse(
            "broken.xml",
            "Parse error in broken.xml: malformed XML",
        ));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_every_format() {
        let report = fixtures::sample_report();
        let view = ReportView::new(&report, 5);

        for format in [ReportFormat::Terminal, ReportFormat::Markdown, ReportFormat::Json] {
            let rendered = render_report(&view, format, FormattingConfig::plain()).unwrap();
            assert!(rendered.contains("3001"), "{:?} output lacks item id", format);
        }
    }

    #[test]
    fn test_emit_to_nested_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("collection.md");
        emit("# Collection", Some(path.clone())).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Collection");
    }
}
