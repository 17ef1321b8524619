//! Normalized inventory line items.
//!
//! An [`InventoryRecord`] carries the six fields the aggregation and combine
//! stages understand, plus a field layout that remembers the order and any
//! unrecognized fields of the source item so that derived documents keep the
//! same shape as their input.

use serde::{Deserialize, Serialize};

/// Item type written by marketplaces when the field is absent (a plain part).
pub const DEFAULT_ITEM_TYPE: &str = "P";

/// Color key used for records without a usable color code.
pub const UNCOLORED: &str = "0";

/// Item key used by aggregation for records without an item id.
pub const UNKNOWN_ITEM: &str = "Unknown";

/// The fields of an inventory item the engine interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldTag {
    ItemType,
    ItemId,
    Color,
    MinQty,
    QtyFilled,
    Remarks,
}

impl FieldTag {
    /// Canonical order used when a source format has no layout of its own.
    pub const CANONICAL: [FieldTag; 6] = [
        FieldTag::ItemType,
        FieldTag::ItemId,
        FieldTag::Color,
        FieldTag::MinQty,
        FieldTag::QtyFilled,
        FieldTag::Remarks,
    ];

    pub fn xml_name(&self) -> &'static str {
        match self {
            Self::ItemType => "ITEMTYPE",
            Self::ItemId => "ITEMID",
            Self::Color => "COLOR",
            Self::MinQty => "MINQTY",
            Self::QtyFilled => "QTYFILLED",
            Self::Remarks => "REMARKS",
        }
    }

    pub fn from_xml_name(name: &str) -> Option<Self> {
        match name {
            "ITEMTYPE" => Some(Self::ItemType),
            "ITEMID" => Some(Self::ItemId),
            "COLOR" => Some(Self::Color),
            "MINQTY" => Some(Self::MinQty),
            "QTYFILLED" => Some(Self::QtyFilled),
            "REMARKS" => Some(Self::Remarks),
            _ => None,
        }
    }
}

/// One position in an item's field layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldSlot {
    Known(FieldTag),
    Extra { name: String, value: String },
}

/// One line item from an inventory file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub item_id: String,
    pub item_type: String,
    /// Raw color code as found in the source; may be empty.
    pub color_code: String,
    pub needed_qty: u64,
    pub filled_qty: u64,
    pub remarks: Option<String>,
    #[serde(skip)]
    pub layout: Vec<FieldSlot>,
}

impl Default for InventoryRecord {
    fn default() -> Self {
        Self {
            item_id: String::new(),
            item_type: DEFAULT_ITEM_TYPE.to_string(),
            color_code: String::new(),
            needed_qty: 0,
            filled_qty: 0,
            remarks: None,
            layout: Vec::new(),
        }
    }
}

impl InventoryRecord {
    /// Convenience constructor with the canonical field layout.
    pub fn new(
        item_id: impl Into<String>,
        color_code: impl Into<String>,
        needed_qty: u64,
        filled_qty: u64,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            color_code: color_code.into(),
            needed_qty,
            filled_qty,
            layout: FieldTag::CANONICAL[..5]
                .iter()
                .copied()
                .map(FieldSlot::Known)
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        if !self.has_field(FieldTag::Remarks) {
            self.layout.push(FieldSlot::Known(FieldTag::Remarks));
        }
        self
    }

    pub fn total_qty(&self) -> u64 {
        self.needed_qty + self.filled_qty
    }

    /// Whether the record belongs on a wanted list: it has an id and still needs pieces.
    pub fn is_wanted(&self) -> bool {
        !self.item_id.is_empty() && self.needed_qty > 0
    }

    /// Color key for aggregation: numeric codes as-is, everything else folds into `"0"`.
    pub fn color_key(&self) -> &str {
        let code = self.color_code.as_str();
        if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) {
            code
        } else {
            UNCOLORED
        }
    }

    /// Item key for aggregation.
    pub fn item_key(&self) -> &str {
        if self.item_id.is_empty() {
            UNKNOWN_ITEM
        } else {
            &self.item_id
        }
    }

    /// Key of the merged wanted list. Missing colors are the empty string.
    pub fn merge_key(&self) -> (String, String) {
        (self.item_id.clone(), self.color_code.clone())
    }

    pub fn has_field(&self, tag: FieldTag) -> bool {
        self.layout.contains(&FieldSlot::Known(tag))
    }

    /// Text value of a known field as it should be written out.
    pub fn field_text(&self, tag: FieldTag) -> String {
        match tag {
            FieldTag::ItemType => self.item_type.clone(),
            FieldTag::ItemId => self.item_id.clone(),
            FieldTag::Color => self.color_code.clone(),
            FieldTag::MinQty => self.needed_qty.to_string(),
            FieldTag::QtyFilled => self.filled_qty.to_string(),
            FieldTag::Remarks => self.remarks.clone().unwrap_or_default(),
        }
    }

    /// Copy for a purchase list: filled quantity zeroed and always present.
    pub fn wanted_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.filled_qty = 0;
        if !copy.has_field(FieldTag::QtyFilled) {
            copy.layout.push(FieldSlot::Known(FieldTag::QtyFilled));
        }
        copy
    }
}

/// Human-readable label for a marketplace item type code.
pub fn item_type_label(code: &str) -> &str {
    match code {
        "P" => "Part",
        "S" => "Set",
        "M" => "Minifigure",
        "B" => "Book",
        "G" => "Gear",
        "C" => "Catalog",
        "I" => "Instruction",
        "O" => "Original Box",
        "U" => "Unsorted Lot",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_needed_plus_filled() {
        let record = InventoryRecord::new("3001", "5", 4, 1);
        assert_eq!(record.total_qty(), 5);
    }

    #[test]
    fn test_color_key_folds_missing_and_non_numeric() {
        assert_eq!(InventoryRecord::new("3001", "", 1, 0).color_key(), "0");
        assert_eq!(InventoryRecord::new("3001", "red", 1, 0).color_key(), "0");
        assert_eq!(InventoryRecord::new("3001", "11", 1, 0).color_key(), "11");
    }

    #[test]
    fn test_is_wanted_requires_id_and_needed() {
        assert!(InventoryRecord::new("3001", "5", 1, 0).is_wanted());
        assert!(!InventoryRecord::new("", "5", 1, 0).is_wanted());
        assert!(!InventoryRecord::new("3002", "5", 0, 5).is_wanted());
    }

    #[test]
    fn test_wanted_copy_zeroes_filled_and_adds_field() {
        let mut record = InventoryRecord::new("3001", "5", 4, 3);
        record.layout.retain(|slot| slot != &FieldSlot::Known(FieldTag::QtyFilled));

        let copy = record.wanted_copy();
        assert_eq!(copy.filled_qty, 0);
        assert_eq!(copy.needed_qty, 4);
        assert!(copy.has_field(FieldTag::QtyFilled));
    }

    #[test]
    fn test_item_key_defaults_to_unknown() {
        assert_eq!(InventoryRecord::new("", "1", 0, 1).item_key(), UNKNOWN_ITEM);
    }

    #[test]
    fn test_field_tag_names_round_trip() {
        for tag in FieldTag::CANONICAL {
            assert_eq!(FieldTag::from_xml_name(tag.xml_name()), Some(tag));
        }
        assert_eq!(FieldTag::from_xml_name("CONDITION"), None);
    }
}
