//! Marketplace XML inventory format.
//!
//! ```xml
//! <INVENTORY>
//!   <ITEM>
//!     <ITEMTYPE>P</ITEMTYPE>
//!     <ITEMID>3001</ITEMID>
//!     <COLOR>5</COLOR>
//!     <MINQTY>4</MINQTY>
//!     <QTYFILLED>1</QTYFILLED>
//!   </ITEM>
//! </INVENTORY>
//! ```

use super::fields::RawItem;
use super::{InventoryDocument, InventoryFormat, RecordIssue};
use crate::core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// Root tag marketplaces export and accept.
pub const INVENTORY_TAG: &str = "INVENTORY";
pub const ITEM_TAG: &str = "ITEM";

const ROOT_DEPTH: usize = 1;
const ITEM_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

pub struct XmlFormat;

impl InventoryFormat for XmlFormat {
    fn name(&self) -> &'static str {
        "BrickLink XML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xml"]
    }

    fn parse(&self, path: &Path, bytes: &[u8]) -> Result<InventoryDocument> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| Error::parse(path, format!("document is not valid UTF-8: {e}")))?;
        parse_inventory_xml(path, content)
    }
}

struct OpenField {
    name: String,
    text: String,
}

struct OpenItem {
    position: usize,
    raw: RawItem,
    field: Option<OpenField>,
}

impl OpenItem {
    fn new(position: usize) -> Self {
        Self {
            position,
            raw: RawItem::new(),
            field: None,
        }
    }

    fn finish(self, doc: &mut InventoryDocument) {
        let position = self.position;
        match self.raw.into_record() {
            Ok(record) => doc.records.push(record),
            Err(e) => {
                log::warn!(
                    "Skipping item #{} in {}: {}",
                    position,
                    doc.source.display(),
                    e
                );
                doc.rejected.push(RecordIssue {
                    position,
                    message: e.to_string(),
                });
            }
        }
    }
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

/// Parse an inventory document. Only structurally malformed markup is an
/// error; unexpected root tags are logged and items are still extracted.
pub fn parse_inventory_xml(path: &Path, content: &str) -> Result<InventoryDocument> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut doc = InventoryDocument::empty(path);
    let mut root: Option<String> = None;
    let mut depth = 0usize;
    let mut item: Option<OpenItem> = None;
    let mut positions = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::parse(
                path,
                format!("malformed XML at byte {}: {}", reader.error_position(), e),
            )
        })?;

        match event {
            Event::Start(element) => {
                depth += 1;
                let name = element_name(&element);
                open_element(path, &mut root, &mut item, &mut positions, depth, name)?;
            }
            Event::Empty(element) => {
                let name = element_name(&element);
                open_element(path, &mut root, &mut item, &mut positions, depth + 1, name)?;
                close_element(&mut doc, &mut item, depth + 1);
            }
            Event::End(_) => {
                close_element(&mut doc, &mut item, depth);
                depth = depth.saturating_sub(1);
            }
            Event::Text(text) => {
                if depth == FIELD_DEPTH {
                    if let Some(field) = item.as_mut().and_then(|i| i.field.as_mut()) {
                        let unescaped = text
                            .unescape()
                            .map_err(|e| Error::parse(path, format!("bad text content: {e}")))?;
                        field.text.push_str(&unescaped);
                    }
                }
            }
            Event::CData(data) => {
                if depth == FIELD_DEPTH {
                    if let Some(field) = item.as_mut().and_then(|i| i.field.as_mut()) {
                        field.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::parse(path, "unexpected end of document: unclosed element"));
    }
    let root = root.ok_or_else(|| Error::parse(path, "document has no root element"))?;
    if root != INVENTORY_TAG {
        log::warn!(
            "{}: root element is <{}>, expected <{}>; extracting items anyway",
            path.display(),
            root,
            INVENTORY_TAG
        );
    }
    doc.root_tag = root;

    log::debug!(
        "Parsed {} items ({} rejected) from {}",
        doc.records.len(),
        doc.rejected.len(),
        path.display()
    );
    Ok(doc)
}

fn open_element(
    path: &Path,
    root: &mut Option<String>,
    item: &mut Option<OpenItem>,
    positions: &mut usize,
    depth: usize,
    name: String,
) -> Result<()> {
    match depth {
        ROOT_DEPTH => {
            if root.is_some() {
                return Err(Error::parse(path, "junk after document element"));
            }
            *root = Some(name);
        }
        ITEM_DEPTH => {
            if name == ITEM_TAG {
                *positions += 1;
                *item = Some(OpenItem::new(*positions));
            }
        }
        FIELD_DEPTH => {
            if let Some(item) = item.as_mut() {
                item.field = Some(OpenField {
                    name,
                    text: String::new(),
                });
            }
        }
        _ => {
            if let Some(item) = item.as_mut() {
                let field = item
                    .field
                    .as_ref()
                    .map(|f| f.name.clone())
                    .unwrap_or(name);
                item.raw.mark_nested(field);
            }
        }
    }
    Ok(())
}

fn close_element(doc: &mut InventoryDocument, item: &mut Option<OpenItem>, depth: usize) {
    match depth {
        FIELD_DEPTH => {
            if let Some(open) = item.as_mut() {
                if let Some(field) = open.field.take() {
                    open.raw.push(field.name, field.text);
                }
            }
        }
        ITEM_DEPTH => {
            if let Some(open) = item.take() {
                open.finish(doc);
            }
        }
        _ => {}
    }
}
