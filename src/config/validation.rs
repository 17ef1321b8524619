//! Settings validation with error accumulation.
//!
//! All problems are collected before reporting so that a user sees every
//! configuration issue in a single run.

use super::core::LedgerConfig;
use super::settings::Settings;
use crate::core::{Error, Result};
use crate::inventory::InputFormat;

/// Check everything that must hold before any file is processed.
pub fn validate_settings(settings: &Settings, config: &LedgerConfig) -> Result<()> {
    let errors = collect_errors(settings, config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::config(errors.join("; ")))
    }
}

pub fn collect_errors(settings: &Settings, config: &LedgerConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if settings.input_folder.as_os_str().is_empty() {
        errors.push("no input folder given (use --input or [input].folder)".to_string());
    } else if !settings.input_folder.is_dir() {
        errors.push(format!(
            "input folder {} does not exist or is not a directory",
            settings.input_folder.display()
        ));
    }

    for ext in &config.input.extensions {
        if InputFormat::from_extension(ext).is_none() {
            errors.push(format!("unsupported input extension '{}'", ext));
        }
    }
    if config.input.extensions.is_empty() {
        errors.push("[input].extensions must not be empty".to_string());
    }

    let bad_tag_char = |c: char| c.is_whitespace() || c == '<' || c == '>';
    if settings.root_tag.is_empty() || settings.root_tag.contains(bad_tag_char) {
        errors.push(format!("invalid root tag '{}'", settings.root_tag));
    }

    if settings.layout.filtered_prefix.contains(['/', '\\']) {
        errors.push(format!(
            "filtered prefix '{}' must not contain path separators",
            settings.layout.filtered_prefix
        ));
    }

    if settings.top == 0 {
        errors.push("report top must be at least 1".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoadedConfig, Overrides};
    use std::path::PathBuf;

    #[test]
    fn test_all_errors_are_reported_together() {
        let mut config = LedgerConfig::default();
        config.input.extensions = vec!["pdf".into()];
        config.output.root_tag = "BAD TAG".into();
        let loaded = LoadedConfig {
            config,
            source: None,
        };

        let err = Settings::resolve(
            &loaded,
            Overrides {
                folder: Some(PathBuf::from("/definitely/not/here")),
                top: Some(0),
                ..Overrides::default()
            },
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("does not exist"));
        assert!(message.contains("unsupported input extension 'pdf'"));
        assert!(message.contains("invalid root tag"));
        assert!(message.contains("top must be at least 1"));
    }

    #[test]
    fn test_missing_folder_setting() {
        let err = Settings::resolve(&LoadedConfig::default(), Overrides::default()).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("no input folder")));
    }
}
