use crate::core::{Error, FieldSlot, InventoryRecord, Result};
use crate::inventory::{INVENTORY_TAG, ITEM_TAG};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::path::Path;

/// An inventory-shaped output document: a container of item records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WantedDocument {
    pub root_tag: String,
    pub items: Vec<InventoryRecord>,
}

impl Default for WantedDocument {
    fn default() -> Self {
        Self::new(INVENTORY_TAG)
    }
}

impl WantedDocument {
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            root_tag: root_tag.into(),
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn needed_total(&self) -> u64 {
        self.items.iter().map(|item| item.needed_qty).sum()
    }

    /// Serialize as XML. `target` only names the destination in errors.
    pub fn to_xml(&self, target: &Path) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        let fail = |e: std::io::Error| Error::write(target, e);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(fail)?;
        writer
            .write_event(Event::Start(BytesStart::new(self.root_tag.as_str())))
            .map_err(fail)?;

        for item in &self.items {
            writer
                .write_event(Event::Start(BytesStart::new(ITEM_TAG)))
                .map_err(fail)?;
            for slot in &item.layout {
                let (name, text) = match slot {
                    FieldSlot::Known(tag) => (tag.xml_name(), item.field_text(*tag)),
                    FieldSlot::Extra { name, value } => (name.as_str(), value.clone()),
                };
                write_field(&mut writer, name, &text).map_err(fail)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(ITEM_TAG)))
                .map_err(fail)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.root_tag.as_str())))
            .map_err(fail)?;

        let mut xml = String::from_utf8(writer.into_inner()).map_err(|e| Error::write(target, e))?;
        xml.push('\n');
        Ok(xml)
    }
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> std::io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}

/// Known fields of a record as written, for comparisons in tests and reports.
pub fn written_fields(record: &InventoryRecord) -> Vec<(String, String)> {
    record
        .layout
        .iter()
        .map(|slot| match slot {
            FieldSlot::Known(tag) => (tag.xml_name().to_string(), record.field_text(*tag)),
            FieldSlot::Extra { name, value } => (name.clone(), value.clone()),
        })
        .collect()
}
