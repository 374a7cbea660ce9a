//! Terminal-aware styling
//!
//! Semantic colors and symbols on top of `console::Style`, downgraded to
//! plain ASCII when the terminal cannot render them.

use crate::terminal::TerminalCapabilities;
use console::Style;

/// Symbol set for the current terminal
#[derive(Debug, Clone, Copy)]
pub struct Symbols {
    pub checkmark: &'static str,
    pub cross: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub bullet: &'static str,
    pub arrow: &'static str,
}

const UNICODE_SYMBOLS: Symbols = Symbols {
    checkmark: "✓",
    cross: "✗",
    warning: "!",
    info: "·",
    bullet: "•",
    arrow: "→",
};

const ASCII_SYMBOLS: Symbols = Symbols {
    checkmark: "+",
    cross: "x",
    warning: "!",
    info: "-",
    bullet: "*",
    arrow: ">",
};

pub struct StyleManager {
    color: bool,
    symbols: Symbols,
}

impl StyleManager {
    pub fn new(capabilities: &TerminalCapabilities) -> Self {
        Self {
            color: capabilities.supports_color(),
            symbols: if capabilities.supports_unicode() {
                UNICODE_SYMBOLS
            } else {
                ASCII_SYMBOLS
            },
        }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style.force_styling(self.color).apply_to(text).to_string()
    }

    pub fn style_success(&self, text: &str) -> String {
        self.paint(Style::new().green(), text)
    }

    pub fn style_error(&self, text: &str) -> String {
        self.paint(Style::new().red(), text)
    }

    pub fn style_warning(&self, text: &str) -> String {
        self.paint(Style::new().yellow(), text)
    }

    pub fn style_info(&self, text: &str) -> String {
        self.paint(Style::new().cyan(), text)
    }

    pub fn style_emphasis(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    pub fn style_subtle(&self, text: &str) -> String {
        self.paint(Style::new().dim(), text)
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(self.symbols.checkmark), message)
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(self.symbols.cross), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning(self.symbols.warning), message)
    }

    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_info(self.symbols.info), message)
    }

    /// Working/progress line (info color with arrow)
    pub fn format_working(&self, message: &str) -> String {
        format!("{} {}", self.style_info(self.symbols.arrow), message)
    }

    pub fn bullet(&self) -> &'static str {
        self.symbols.bullet
    }

    pub fn symbols(&self) -> Symbols {
        self.symbols
    }
}
