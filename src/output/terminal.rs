use super::{pct, ReportView, ReportWriter};
use crate::aggregate::Accumulator;
use crate::core::item_type_label;
use crate::errors::ErrorSummary;
use crate::formatting::{completion_bar, FormattingConfig, OutputFormatter};
use anyhow::Result;
use comfy_table::{CellAlignment, Table};
use std::io::Write;

const BAR_WIDTH: usize = 20;
const RARITY_SAMPLES: usize = 5;

pub struct TerminalWriter<W: Write> {
    writer: W,
    config: FormattingConfig,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, config: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: config.formatter(),
            config,
        }
    }

    fn table(&self, header: Vec<&str>, numeric_from: usize) -> Table {
        let mut table = Table::new();
        table.load_preset(self.config.table_preset());
        table.set_header(header.clone());
        for index in numeric_from..header.len() {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
        table
    }

    fn section(&mut self, title: &str) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", self.formatter.header(title))?;
        Ok(())
    }

    fn write_summary(&mut self, view: &ReportView<'_>) -> Result<()> {
        let report = view.report;
        let title = format!(
            "{} Collection Report",
            self.formatter.symbol("📦", "==")
        );
        writeln!(self.writer, "{}", self.formatter.header(&title))?;
        writeln!(
            self.writer,
            "  Sets: {}   Records: {}   Colors: {}   Items: {}",
            report.sets.len(),
            report.records_folded,
            report.distinct_colors(),
            report.distinct_items()
        )?;
        writeln!(
            self.writer,
            "  Pieces: {} needed, {} filled, {} total",
            report.totals.needed_total(),
            report.totals.filled_total(),
            report.totals.total_qty()
        )?;
        writeln!(
            self.writer,
            "  Completion: {} {}",
            completion_bar(report.completion_pct, BAR_WIDTH, self.config.unicode),
            pct(report.completion_pct)
        )?;
        Ok(())
    }

    fn write_sets(&mut self, view: &ReportView<'_>) -> Result<()> {
        if view.report.sets.is_empty() {
            return Ok(());
        }
        self.section("Sets")?;
        let mut table = self.table(
            vec!["Set", "Records", "Needed", "Filled", "Total", "Completion"],
            1,
        );
        for set in &view.report.sets {
            table.add_row(vec![
                set.name.clone(),
                set.record_count.to_string(),
                set.totals.needed_total().to_string(),
                set.totals.filled_total().to_string(),
                set.totals.total_qty().to_string(),
                pct(set.completion_pct()),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_colors(&mut self, view: &ReportView<'_>) -> Result<()> {
        if view.report.colors.is_empty() {
            return Ok(());
        }
        self.section(&format!("Top {} colors", view.top.min(view.report.colors.len())))?;
        let mut table = self.table(vec!["Code", "Color", "Needed", "Filled", "Total"], 2);
        for color in view.report.colors.iter().take(view.top) {
            table.add_row(vec![
                color.color_code.clone(),
                color.display_name.clone(),
                color.totals.needed_total().to_string(),
                color.totals.filled_total().to_string(),
                color.total_qty().to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_items(&mut self, view: &ReportView<'_>) -> Result<()> {
        if view.report.items.is_empty() {
            return Ok(());
        }
        self.section(&format!("Top {} items", view.top.min(view.report.items.len())))?;
        let mut table = self.table(
            vec!["Item", "Type", "Colors", "Sets", "Needed", "Filled", "Total"],
            2,
        );
        for item in view.report.items.iter().take(view.top) {
            table.add_row(vec![
                item.item_id.clone(),
                item_type_label(&item.item_type).to_string(),
                item.distinct_colors.len().to_string(),
                item.source_files.len().to_string(),
                item.totals.needed_total().to_string(),
                item.totals.filled_total().to_string(),
                item.total_qty().to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_rarity(&mut self, view: &ReportView<'_>) -> Result<()> {
        if view.rarity.is_empty() {
            return Ok(());
        }
        self.section("Rarity")?;
        let mut table = self.table(vec!["Bucket", "Items", "Examples"], 1);
        for (label, bucket) in view.rarity.labeled() {
            let samples: Vec<&str> = bucket
                .iter()
                .take(RARITY_SAMPLES)
                .map(|item| item.item_id.as_str())
                .collect();
            table.add_row(vec![
                label.to_string(),
                bucket.len().to_string(),
                samples.join(", "),
            ]);
        }
        if let Some(column) = table.column_mut(2) {
            column.set_cell_alignment(CellAlignment::Left);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_warnings(&mut self, view: &ReportView<'_>) -> Result<()> {
        if view.report.warnings.is_empty() {
            return Ok(());
        }
        let title = format!("Warnings ({})", view.report.warnings.len());
        self.section(&title)?;
        let marker = self.formatter.symbol("⚠", "!");
        for warning in &view.report.warnings {
            writeln!(
                self.writer,
                "  {} {}",
                self.formatter.warning(&marker),
                warning
            )?;
        }
        Ok(())
    }

    fn write_failures(&mut self, view: &ReportView<'_>) -> Result<()> {
        let failures = &view.report.failures;
        if failures.is_empty() {
            return Ok(());
        }
        let title = format!("Problems ({})", failures.len());
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", self.formatter.error(&title))?;
        for failure in failures {
            writeln!(
                self.writer,
                "  {} {}",
                self.formatter.dim(failure.operation.as_str()),
                failure.error
            )?;
        }
        write!(self.writer, "{}", ErrorSummary::from_failures(failures).report())?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, view: &ReportView<'_>) -> Result<()> {
        self.write_summary(view)?;
        self.write_sets(view)?;
        self.write_colors(view)?;
        self.write_items(view)?;
        self.write_rarity(view)?;
        self.write_warnings(view)?;
        self.write_failures(view)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_report;

    fn render(top: usize) -> String {
        let report = sample_report();
        let view = ReportView::new(&report, top);
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer, FormattingConfig::plain())
            .write_report(&view)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_terminal_report_sections() {
        let output = render(10);
        assert!(output.contains("Collection Report"));
        assert!(output.contains("castle.xml"));
        assert!(output.contains("Red"));
        assert!(output.contains("Rarity"));
        assert!(output.contains("Color code 99 not found"));
        assert!(output.contains("Problems (1)"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_top_limits_rankings() {
        let output = render(1);
        assert!(output.contains("Top 1 colors"));
        assert!(output.contains("Top 1 items"));
    }
}
