//! Color code to display name lookup.
//!
//! The table is loaded once per run from a JSON object such as
//! `{"1": "White", "5": "Red"}` and consulted read-only afterwards.

use crate::core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorLookup {
    names: HashMap<String, String>,
}

/// Outcome of resolving a color code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorName<'a> {
    Mapped(&'a str),
    /// Not in the table; the raw code doubles as the label.
    Unmapped(&'a str),
}

impl<'a> ColorName<'a> {
    pub fn label(&self) -> &'a str {
        match self {
            Self::Mapped(name) | Self::Unmapped(name) => name,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

impl ColorLookup {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the table from a JSON file. A missing or unreadable table is a
    /// configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "cannot read color mapping {}: {}",
                path.display(),
                e
            ))
        })?;
        let lookup = Self::from_json_str(&content).map_err(|e| {
            Error::config(format!("invalid color mapping {}: {}", path.display(), e))
        })?;
        log::info!("Loaded {} color names from {}", lookup.len(), path.display());
        Ok(lookup)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let names: HashMap<String, String> = serde_json::from_str(content)?;
        Ok(Self::new(names))
    }

    pub fn has(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    pub fn resolve<'a>(&'a self, code: &'a str) -> ColorName<'a> {
        match self.names.get(code) {
            Some(name) => ColorName::Mapped(name),
            None => ColorName::Unmapped(code),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColorLookup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(code, name)| (code.into(), name.into()))
                .collect(),
        )
    }
}
