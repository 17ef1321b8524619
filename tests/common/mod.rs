//! Shared fixtures for integration tests.

#![allow(dead_code)]

use brickledger::ColorLookup;
use std::fs;
use std::path::{Path, PathBuf};

/// One `<ITEM>` of a test inventory: id, color, needed, filled.
pub type Row<'a> = (&'a str, &'a str, u64, u64);

/// Render rows as an inventory document. An empty color omits the field.
pub fn inventory_xml(rows: &[Row<'_>]) -> String {
    let mut xml = String::from("<INVENTORY>\n");
    for (id, color, needed, filled) in rows {
        xml.push_str("  <ITEM>\n    <ITEMTYPE>P</ITEMTYPE>\n");
        xml.push_str(&format!("    <ITEMID>{id}</ITEMID>\n"));
        if !color.is_empty() {
            xml.push_str(&format!("    <COLOR>{color}</COLOR>\n"));
        }
        xml.push_str(&format!("    <MINQTY>{needed}</MINQTY>\n"));
        xml.push_str(&format!("    <QTYFILLED>{filled}</QTYFILLED>\n"));
        xml.push_str("  </ITEM>\n");
    }
    xml.push_str("</INVENTORY>\n");
    xml
}

pub fn write_inventory(dir: &Path, name: &str, rows: &[Row<'_>]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, inventory_xml(rows)).unwrap();
    path
}

pub fn write_colors(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("colors.json");
    fs::write(&path, json).unwrap();
    path
}

pub fn lookup() -> ColorLookup {
    [("1", "White"), ("5", "Red"), ("11", "Black")]
        .into_iter()
        .collect()
}
