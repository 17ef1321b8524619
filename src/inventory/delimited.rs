//! CSV inventory exports (Rebrickable, BrickOwl, or generic headers).

use super::fields::RawItem;
use super::{InventoryDocument, InventoryFormat, RecordIssue};
use crate::core::{Error, FieldTag, Result};
use std::path::Path;

pub struct CsvFormat;

impl InventoryFormat for CsvFormat {
    fn name(&self) -> &'static str {
        "CSV (Rebrickable/BrickOwl)"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    fn parse(&self, path: &Path, bytes: &[u8]) -> Result<InventoryDocument> {
        parse_inventory_csv(path, bytes)
    }
}

/// Column index for each known field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: Vec<(FieldTag, usize)>,
}

impl ColumnMapping {
    pub fn column(&self, tag: FieldTag) -> Option<usize> {
        self.columns
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, idx)| *idx)
    }

    fn assign(&mut self, tag: FieldTag, idx: usize) {
        if self.column(tag).is_none() {
            self.columns.push((tag, idx));
        }
    }

    fn assign_named(&mut self, headers: &[String], tag: FieldTag, name: &str) {
        if let Some(idx) = headers.iter().position(|h| h == name) {
            self.assign(tag, idx);
        }
    }

    /// Detect the export flavor from its header row.
    pub fn detect(headers: &[String]) -> Self {
        let lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let mut mapping = Self::default();

        if lower.iter().any(|h| h == "part_num") {
            mapping.assign_named(&lower, FieldTag::ItemId, "part_num");
            mapping.assign_named(&lower, FieldTag::Color, "color_id");
            mapping.assign_named(&lower, FieldTag::MinQty, "quantity");
            mapping.assign_named(&lower, FieldTag::ItemType, "part_cat_id");
        } else if lower.iter().any(|h| h == "boid") {
            mapping.assign_named(&lower, FieldTag::ItemId, "boid");
            mapping.assign_named(&lower, FieldTag::Color, "color_name");
            mapping.assign_named(&lower, FieldTag::MinQty, "wanted_qty");
            mapping.assign_named(&lower, FieldTag::QtyFilled, "owned_qty");
        } else {
            for (idx, header) in lower.iter().enumerate() {
                if let Some(tag) = generic_column_tag(header) {
                    mapping.assign(tag, idx);
                }
            }
        }

        mapping
    }
}

/// Keyword match for generic exports. Filled and type keywords are checked
/// first because their names usually also contain "qty" or "item".
fn generic_column_tag(header: &str) -> Option<FieldTag> {
    const RULES: &[(&[&str], FieldTag)] = &[
        (&["owned", "have", "filled"], FieldTag::QtyFilled),
        (&["type", "category"], FieldTag::ItemType),
        (&["remark", "note"], FieldTag::Remarks),
        (&["part", "item", "element"], FieldTag::ItemId),
        (&["color", "colour"], FieldTag::Color),
        (&["quantity", "qty", "needed", "want"], FieldTag::MinQty),
    ];

    RULES
        .iter()
        .find(|(terms, _)| terms.iter().any(|term| header.contains(term)))
        .map(|(_, tag)| *tag)
}

pub fn parse_inventory_csv(path: &Path, bytes: &[u8]) -> Result<InventoryDocument> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::parse(path, format!("unreadable CSV header: {e}")))?
        .iter()
        .map(String::from)
        .collect();
    let mapping = ColumnMapping::detect(&headers);
    if mapping.column(FieldTag::ItemId).is_none() {
        log::warn!("{}: no item id column detected", path.display());
    }

    let mut doc = InventoryDocument::empty(path);
    for (idx, row) in reader.records().enumerate() {
        let position = idx + 1;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                log::warn!("Skipping row #{} in {}: {}", position, path.display(), e);
                doc.rejected.push(RecordIssue {
                    position,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let mut raw = RawItem::new();
        for tag in FieldTag::CANONICAL {
            if let Some(value) = mapping.column(tag).and_then(|col| row.get(col)) {
                raw.push_tagged(tag, value);
            }
        }

        match raw.into_record() {
            Ok(record) => doc.records.push(record),
            Err(e) => doc.rejected.push(RecordIssue {
                position,
                message: e.to_string(),
            }),
        }
    }

    Ok(doc)
}
