use super::{pct, ReportView, ReportWriter};
use crate::aggregate::Accumulator;
use crate::core::item_type_label;
use crate::errors::ErrorSummary;
use anyhow::Result;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, view: &ReportView<'_>) -> Result<()> {
        writeln!(self.writer, "# Collection Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer)?;

        let report = view.report;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_summary_row("Sets", &report.sets.len().to_string())?;
        self.write_summary_row("Records", &report.records_folded.to_string())?;
        self.write_summary_row("Distinct colors", &report.distinct_colors().to_string())?;
        self.write_summary_row("Distinct items", &report.distinct_items().to_string())?;
        self.write_summary_row("Pieces needed", &report.totals.needed_total().to_string())?;
        self.write_summary_row("Pieces filled", &report.totals.filled_total().to_string())?;
        self.write_summary_row("Pieces total", &report.totals.total_qty().to_string())?;
        self.write_summary_row("Completion", &pct(report.completion_pct))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary_row(&mut self, metric: &str, value: &str) -> Result<()> {
        writeln!(self.writer, "| {metric} | {value} |")?;
        Ok(())
    }

    fn write_sets(&mut self, view: &ReportView<'_>) -> Result<()> {
        if view.report.sets.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Sets")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Set | Records | Needed | Filled | Total | Completion |")?;
        writeln!(self.writer, "|-----|--------:|-------:|-------:|------:|-----------:|")?;
        for set in &view.report.sets {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} |",
                escape_cell(&set.name),
                set.record_count,
                set.totals.needed_total(),
                set.totals.filled_total(),
                set.totals.total_qty(),
                pct(set.completion_pct())
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_colors(&mut self, view: &ReportView<'_>) -> Result<()> {
        if view.report.colors.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Top Colors")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Code | Color | Needed | Filled | Total |")?;
        writeln!(self.writer, "|------|-------|-------:|-------:|------:|")?;
        for color in view.report.colors.iter().take(view.top) {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} |",
                color.color_code,
                escape_cell(&color.display_name),
                color.totals.needed_total(),
                color.totals.filled_total(),
                color.total_qty()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_items(&mut self, view: &ReportView<'_>) -> Result<()> {
        if view.report.items.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Top Items")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Item | Type | Colors | Sets | Needed | Filled | Total |")?;
        writeln!(self.writer, "|------|------|-------:|-----:|-------:|-------:|------:|")?;
        for item in view.report.items.iter().take(view.top) {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} | {} |",
                escape_cell(&item.item_id),
                item_type_label(&item.item_type),
                item.distinct_colors.len(),
                item.source_files.len(),
                item.totals.needed_total(),
                item.totals.filled_total(),
                item.total_qty()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_rarity(&mut self, view: &ReportView<'_>) -> Result<()> {
        if view.rarity.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Rarity")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Bucket | Items | Examples |")?;
        writeln!(self.writer, "|--------|------:|----------|")?;
        for (label, bucket) in view.rarity.labeled() {
            let samples: Vec<String> = bucket
                .iter()
                .take(5)
                .map(|item| format!("`{}`", item.item_id))
                .collect();
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                label,
                bucket.len(),
                samples.join(", ")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_problems(&mut self, view: &ReportView<'_>) -> Result<()> {
        let report = view.report;
        if !report.warnings.is_empty() {
            writeln!(self.writer, "## Warnings")?;
            writeln!(self.writer)?;
            for warning in &report.warnings {
                writeln!(self.writer, "- {warning}")?;
            }
            writeln!(self.writer)?;
        }

        if !report.failures.is_empty() {
            writeln!(self.writer, "## Problems")?;
            writeln!(self.writer)?;
            for failure in &report.failures {
                writeln!(
                    self.writer,
                    "- **{}** `{}`: {}",
                    failure.operation.as_str(),
                    failure.path.display(),
                    failure.error
                )?;
            }
            writeln!(self.writer)?;
            writeln!(self.writer, "```")?;
            write!(
                self.writer,
                "{}",
                ErrorSummary::from_failures(&report.failures).report().trim_start()
            )?;
            writeln!(self.writer, "```")?;
        }
        Ok(())
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, view: &ReportView<'_>) -> Result<()> {
        self.write_header(view)?;
        self.write_sets(view)?;
        self.write_colors(view)?;
        self.write_items(view)?;
        self.write_rarity(view)?;
        self.write_problems(view)?;
        Ok(())
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
