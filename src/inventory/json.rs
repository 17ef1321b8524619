//! JSON inventory lists.
//!
//! Accepts a top-level array of items, an object with an `items` array, or a
//! single item object.

use super::fields::RawItem;
use super::{InventoryDocument, InventoryFormat, RecordIssue};
use crate::core::{Error, FieldTag, Result};
use serde_json::{Map, Value};
use std::path::Path;

pub struct JsonFormat;

impl InventoryFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn parse(&self, path: &Path, bytes: &[u8]) -> Result<InventoryDocument> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::parse(path, format!("malformed JSON: {e}")))?;
        Ok(parse_inventory_json(path, value))
    }
}

const KEY_ALIASES: &[(FieldTag, &[&str])] = &[
    (FieldTag::ItemType, &["item_type", "type"]),
    (FieldTag::ItemId, &["item_id", "part_num", "id"]),
    (FieldTag::Color, &["color", "color_id"]),
    (FieldTag::MinQty, &["min_qty", "quantity", "needed"]),
    (FieldTag::QtyFilled, &["qty_filled", "owned", "have"]),
    (FieldTag::Remarks, &["remarks", "notes"]),
];

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn raw_item(object: &Map<String, Value>) -> RawItem {
    let mut raw = RawItem::new();
    for (tag, aliases) in KEY_ALIASES {
        let text = aliases
            .iter()
            .find_map(|key| object.get(*key))
            .and_then(value_text);
        if let Some(text) = text {
            raw.push_tagged(*tag, text);
        }
    }
    raw
}

pub fn parse_inventory_json(path: &Path, value: Value) -> InventoryDocument {
    let entries = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("items") {
            Some(Value::Array(items)) => items,
            Some(other) => vec![other],
            None => vec![Value::Object(object)],
        },
        other => vec![other],
    };

    let mut doc = InventoryDocument::empty(path);
    for (idx, entry) in entries.iter().enumerate() {
        let position = idx + 1;
        let outcome = match entry {
            Value::Object(object) => raw_item(object).into_record().map_err(|e| e.to_string()),
            other => Err(format!("expected an item object, found {}", kind(other))),
        };
        match outcome {
            Ok(record) => doc.records.push(record),
            Err(message) => {
                log::warn!("Skipping item #{} in {}: {}", position, path.display(), message);
                doc.rejected.push(RecordIssue { position, message });
            }
        }
    }
    doc
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_of_items() {
        let doc = parse_inventory_json(
            Path::new("list.json"),
            json!([
                {"item_id": "3001", "color": "5", "min_qty": 4, "qty_filled": "1"},
                {"part_num": "3002", "color_id": 11, "quantity": 2}
            ]),
        );
        assert_eq!(doc.records.len(), 2);
        assert_eq!(doc.records[0].filled_qty, 1);
        assert_eq!(doc.records[1].item_id, "3002");
        assert_eq!(doc.records[1].color_code, "11");
        assert_eq!(doc.records[1].needed_qty, 2);
    }

    #[test]
    fn test_items_wrapper_and_single_object() {
        let wrapped = parse_inventory_json(
            Path::new("a.json"),
            json!({"items": [{"id": "3001", "needed": 1}]}),
        );
        assert_eq!(wrapped.records.len(), 1);

        let single = parse_inventory_json(Path::new("b.json"), json!({"id": "3001", "have": 3}));
        assert_eq!(single.records.len(), 1);
        assert_eq!(single.records[0].filled_qty, 3);
    }

    #[test]
    fn test_non_numeric_quantities_are_zero() {
        let doc = parse_inventory_json(
            Path::new("c.json"),
            json!([{"item_id": "3001", "min_qty": 2.5, "qty_filled": true}]),
        );
        assert_eq!(doc.records[0].needed_qty, 0);
        assert_eq!(doc.records[0].filled_qty, 0);
    }

    #[test]
    fn test_non_object_entries_are_rejected() {
        let doc = parse_inventory_json(Path::new("d.json"), json!([{"item_id": "3001"}, 7]));
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.rejected.len(), 1);
        assert!(doc.rejected[0].message.contains("a number"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = JsonFormat.parse(Path::new("e.json"), b"[{\"item_id\": ");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }
}
