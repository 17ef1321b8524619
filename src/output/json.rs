use super::{ReportView, ReportWriter};
use crate::aggregate::CollectionReport;
use crate::stats::RarityBuckets;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a CollectionReport,
    /// Item ids per bucket.
    rarity: RarityBuckets<&'a str>,
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, view: &ReportView<'_>) -> Result<()> {
        let document = JsonReport {
            generated_at: Utc::now(),
            report: view.report,
            rarity: view.rarity.map(|item| item.item_id.as_str()),
        };
        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_report;

    #[test]
    fn test_json_report_structure() {
        let report = sample_report();
        let view = ReportView::new(&report, 10);
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&view).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["sets"].as_array().unwrap().len(), 2);
        assert_eq!(value["total_qty"], 23);
        assert_eq!(value["colors"][0]["color_code"], "99");
        assert_eq!(value["colors"][0]["needed_total"], 10);
        assert!(value["rarity"]["common"].is_array());
        assert_eq!(value["failures"][0]["operation"], "FileParse");
        assert!(value["generated_at"].is_string());
    }
}
