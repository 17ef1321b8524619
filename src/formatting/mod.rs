use colored::*;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL_CONDENSED};
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_terminal_support(),
        }
    }
}

/// Switches for terminal report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    /// Unicode symbols and box-drawing table borders.
    pub unicode: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            unicode: true,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, unicode: bool) -> Self {
        Self { color, unicode }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // NO_COLOR per no-color.org
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        if let Some(mode) = env::var("BRICKLEDGER_COLOR")
            .ok()
            .as_deref()
            .and_then(ColorMode::parse)
        {
            config.color = mode;
        }

        config
    }

    /// ASCII-only, no colors.
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            unicode: false,
        }
    }

    /// comfy-table preset matching the unicode setting.
    pub fn table_preset(&self) -> &'static str {
        if self.unicode {
            UTF8_FULL_CONDENSED
        } else {
            ASCII_MARKDOWN
        }
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        if self.color.should_use_color() {
            Box::new(ColoredFormatter::new(*self))
        } else {
            Box::new(PlainFormatter {
                unicode: self.unicode,
            })
        }
    }
}

pub trait OutputFormatter {
    fn success(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
    fn error(&self, text: &str) -> String;
    fn header(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    /// `symbol` when unicode output is enabled, otherwise `fallback`.
    fn symbol(&self, symbol: &str, fallback: &str) -> String;
}

pub struct ColoredFormatter {
    config: FormattingConfig,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        colored::control::set_override(config.color.should_use_color());
        Self { config }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn success(&self, text: &str) -> String {
        text.green().to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.yellow().to_string()
    }

    fn error(&self, text: &str) -> String {
        text.red().to_string()
    }

    fn header(&self, text: &str) -> String {
        text.blue().bold().to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.dimmed().to_string()
    }

    fn symbol(&self, symbol: &str, fallback: &str) -> String {
        if self.config.unicode {
            symbol.to_string()
        } else {
            fallback.to_string()
        }
    }
}

pub struct PlainFormatter {
    pub unicode: bool,
}

impl OutputFormatter for PlainFormatter {
    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    fn symbol(&self, symbol: &str, fallback: &str) -> String {
        if self.unicode {
            symbol.to_string()
        } else {
            fallback.to_string()
        }
    }
}

fn detect_terminal_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }
    std::io::stdout().is_terminal()
}

/// Text progress bar for a completion percentage, `width` cells wide.
pub fn completion_bar(pct: f64, width: usize, unicode: bool) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let (full, empty) = if unicode { ('█', '░') } else { ('#', '.') };
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat(full).take(filled));
    bar.extend(std::iter::repeat(empty).take(width - filled));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_parse() {
        assert_eq!(ColorMode::parse("ALWAYS"), Some(ColorMode::Always));
        assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
        assert_eq!(ColorMode::parse("sometimes"), None);
    }

    #[test]
    fn test_plain_formatter_has_no_escapes() {
        let formatter = FormattingConfig::plain().formatter();
        assert_eq!(formatter.header("Sets"), "Sets");
        assert_eq!(formatter.symbol("✓", "[OK]"), "[OK]");
    }

    #[test]
    fn test_completion_bar() {
        assert_eq!(completion_bar(50.0, 10, false), "#####.....");
        assert_eq!(completion_bar(0.0, 4, false), "....");
        assert_eq!(completion_bar(100.0, 4, true), "████");
    }
}
