//! Inventory file reading.
//!
//! Each supported export format implements [`InventoryFormat`]; the format is
//! chosen from the file extension. Reading never fails on bad field data, only
//! on documents that are structurally malformed.

use crate::core::{Error, InventoryRecord, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod batch;
pub mod delimited;
pub mod fields;
pub mod json;
pub mod xml;

pub use batch::{read_all, ParseOptions, ParsedFile};
pub use fields::{parse_quantity, FieldError, RawItem};
pub use xml::{parse_inventory_xml, INVENTORY_TAG, ITEM_TAG};

/// An item that was present in the source but could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordIssue {
    /// 1-based position of the item (or data row) in its document.
    pub position: usize,
    pub message: String,
}

/// A parsed inventory file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryDocument {
    pub source: PathBuf,
    pub root_tag: String,
    pub records: Vec<InventoryRecord>,
    pub rejected: Vec<RecordIssue>,
}

impl InventoryDocument {
    pub fn empty(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            root_tag: INVENTORY_TAG.to_string(),
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// File name used for provenance, warnings and derived output names.
    pub fn file_name(&self) -> String {
        file_name_of(&self.source)
    }
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub trait InventoryFormat: Send + Sync {
    fn name(&self) -> &'static str;
    fn extensions(&self) -> &'static [&'static str];
    fn parse(&self, path: &Path, bytes: &[u8]) -> Result<InventoryDocument>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Xml,
    Csv,
    Json,
}

impl InputFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xml" => Some(Self::Xml),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

pub fn get_format(format: InputFormat) -> Box<dyn InventoryFormat> {
    type FormatFactory = fn() -> Box<dyn InventoryFormat>;

    static FORMAT_MAP: &[(InputFormat, FormatFactory)] = &[
        (InputFormat::Xml, || Box::new(xml::XmlFormat)),
        (InputFormat::Csv, || Box::new(delimited::CsvFormat)),
        (InputFormat::Json, || Box::new(json::JsonFormat)),
    ];

    FORMAT_MAP
        .iter()
        .find(|(f, _)| *f == format)
        .map(|(_, factory)| factory())
        .unwrap_or_else(|| Box::new(xml::XmlFormat))
}

/// Names of all supported formats, for help and diagnostics.
pub fn supported_formats() -> Vec<&'static str> {
    [InputFormat::Xml, InputFormat::Csv, InputFormat::Json]
        .into_iter()
        .map(|f| get_format(f).name())
        .collect()
}

/// Read and parse one inventory file, choosing the format by extension.
pub fn read_inventory(path: &Path) -> Result<InventoryDocument> {
    let format = InputFormat::from_path(path).ok_or_else(|| Error::Unsupported(path.to_path_buf()))?;
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let handler = get_format(format);
    log::debug!("Parsing {} as {}", path.display(), handler.name());
    handler.parse(path, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(InputFormat::from_path(Path::new("a.XML")), Some(InputFormat::Xml));
        assert_eq!(InputFormat::from_path(Path::new("a.Csv")), Some(InputFormat::Csv));
        assert_eq!(InputFormat::from_path(Path::new("a.txt")), None);
        assert_eq!(InputFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_read_inventory_dispatches_by_extension() {
        let dir = TempDir::new().unwrap();
        let xml_path = dir.path().join("set.xml");
        fs::write(&xml_path, "<INVENTORY><ITEM><ITEMID>3001</ITEMID></ITEM></INVENTORY>").unwrap();
        let csv_path = dir.path().join("set.csv");
        fs::write(&csv_path, "part_num,color_id,quantity\n3001,5,1\n").unwrap();

        assert_eq!(read_inventory(&xml_path).unwrap().records.len(), 1);
        assert_eq!(read_inventory(&csv_path).unwrap().records.len(), 1);
    }

    #[test]
    fn test_read_inventory_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.xml");
        assert!(matches!(read_inventory(&missing), Err(Error::Io { .. })));

        let unsupported = dir.path().join("notes.txt");
        fs::write(&unsupported, "hello").unwrap();
        assert!(matches!(read_inventory(&unsupported), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_supported_formats_lists_all_handlers() {
        assert_eq!(supported_formats().len(), 3);
    }
}
