//! Lenient field access for raw inventory items.
//!
//! Every source format first collects an item's fields as text into a
//! [`RawItem`]; the accessors here turn that text into typed values with
//! explicit defaults. Bad data never fails: a missing or non-numeric quantity
//! is 0. The only field-level rejection is a digit run too large to count.

use crate::core::{FieldSlot, FieldTag, InventoryRecord, DEFAULT_ITEM_TYPE};
use std::fmt;

/// A field value that cannot be represented even leniently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    QuantityOverflow { field: &'static str, value: String },
    NestedMarkup { field: String },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuantityOverflow { field, value } => {
                write!(f, "{field} value {value} is out of range")
            }
            Self::NestedMarkup { field } => write!(f, "field {field} contains nested elements"),
        }
    }
}

impl std::error::Error for FieldError {}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RawField {
    tag: Option<FieldTag>,
    name: String,
    text: String,
}

/// Text-valued fields of one source item, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    fields: Vec<RawField>,
    nested: Option<String>,
}

impl RawItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field by its XML element name; unknown names are kept verbatim.
    pub fn push(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        self.fields.push(RawField {
            tag: FieldTag::from_xml_name(&name),
            name,
            text: text.into(),
        });
    }

    /// Add a field already mapped to a known tag (CSV columns, JSON keys).
    pub fn push_tagged(&mut self, tag: FieldTag, text: impl Into<String>) {
        self.fields.push(RawField {
            tag: Some(tag),
            name: tag.xml_name().to_string(),
            text: text.into(),
        });
    }

    /// Flag that a field carried child elements instead of text.
    pub fn mark_nested(&mut self, field: impl Into<String>) {
        if self.nested.is_none() {
            self.nested = Some(field.into());
        }
    }

    /// First occurrence of a known field.
    pub fn get(&self, tag: FieldTag) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.tag == Some(tag))
            .map(|field| field.text.as_str())
    }

    /// Field text, or `default` when the field is absent or empty.
    pub fn text_or(&self, tag: FieldTag, default: &str) -> String {
        match self.get(tag) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => default.to_string(),
        }
    }

    pub fn quantity(&self, tag: FieldTag) -> Result<u64, FieldError> {
        parse_quantity(tag.xml_name(), self.get(tag))
    }

    /// Normalize into a record. The layout keeps source order; repeated
    /// known fields after the first are dropped.
    pub fn into_record(self) -> Result<InventoryRecord, FieldError> {
        if let Some(field) = self.nested.clone() {
            return Err(FieldError::NestedMarkup { field });
        }

        let record = InventoryRecord {
            item_id: self.text_or(FieldTag::ItemId, ""),
            item_type: self.text_or(FieldTag::ItemType, DEFAULT_ITEM_TYPE),
            color_code: self.text_or(FieldTag::Color, ""),
            needed_qty: self.quantity(FieldTag::MinQty)?,
            filled_qty: self.quantity(FieldTag::QtyFilled)?,
            remarks: self.get(FieldTag::Remarks).filter(|r| !r.is_empty()).map(String::from),
            layout: Vec::new(),
        };

        let mut layout: Vec<FieldSlot> = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            let slot = match field.tag {
                Some(tag) => FieldSlot::Known(tag),
                None => FieldSlot::Extra {
                    name: field.name,
                    value: field.text,
                },
            };
            if matches!(slot, FieldSlot::Known(_)) && layout.contains(&slot) {
                continue;
            }
            layout.push(slot);
        }

        Ok(InventoryRecord { layout, ..record })
    }
}

/// Quantity text to a count: trimmed ASCII digits, anything else is 0.
pub fn parse_quantity(field: &'static str, raw: Option<&str>) -> Result<u64, FieldError> {
    let Some(text) = raw.map(str::trim) else {
        return Ok(0);
    };
    if !is_digits(text) {
        return Ok(0);
    }
    text.parse::<u64>()
        .map_err(|_| FieldError::QuantityOverflow {
            field,
            value: text.to_string(),
        })
}

pub fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
