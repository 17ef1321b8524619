use std::collections::BTreeSet;

/// Warnings collected during a run, deduplicated by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningLog {
    messages: BTreeSet<String>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning. Returns false if the same message was already present.
    pub fn record(&mut self, message: impl Into<String>) -> bool {
        self.messages.insert(message.into())
    }

    pub fn unmapped_color(&mut self, color_code: &str, file_name: &str) -> bool {
        self.record(unmapped_color_message(color_code, file_name))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn into_sorted(self) -> Vec<String> {
        self.messages.into_iter().collect()
    }
}

pub fn unmapped_color_message(color_code: &str, file_name: &str) -> String {
    format!(
        "Color code {} not found in color mapping. Using color code as label. File: {}",
        color_code, file_name
    )
}
