//! Status display for user feedback
//!
//! Semantic status lines that replace raw println! usage with
//! terminal-capability-aware formatting.

use super::styling::StyleManager;
use std::io::{self, Write};

/// Status display manager for semantic user feedback
pub struct StatusDisplay<'a> {
    styling: &'a StyleManager,
}

fn join_detail(item: &str, details: &str) -> String {
    if details.is_empty() {
        item.to_string()
    } else {
        format!("{}: {}", item, details)
    }
}

impl<'a> StatusDisplay<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    /// `→ Checking packager...`
    pub fn checking(&self, task: &str) {
        println!("{}", self.format_checking(task));
        io::stdout().flush().unwrap_or(());
    }

    /// `✓ vsce: 3.6.0`
    pub fn success(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_success(&join_detail(item, details)));
    }

    /// `✗ my-pack: missing manifest`
    pub fn error(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_error(&join_detail(item, details)));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.styling.format_warning(message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.styling.format_info(message));
    }

    pub fn message(&self, text: &str) {
        println!("{}", text);
    }

    pub fn emphasis(&self, text: &str) {
        println!("{}", self.styling.style_emphasis(text));
    }

    pub fn subtle(&self, text: &str) {
        println!("{}", self.styling.style_subtle(text));
    }

    pub fn list(&self, items: &[&str]) {
        for item in items {
            println!("  {} {}", self.styling.bullet(), item);
        }
    }

    pub fn complete(&self, task: &str) {
        println!("{}", self.styling.format_success(task));
    }

    pub(crate) fn format_checking(&self, task: &str) -> String {
        self.styling.format_working(&format!("Checking {}...", task))
    }
}

/// Convenience functions for common status patterns
impl<'a> StatusDisplay<'a> {
    /// Report an external tool's availability
    pub fn tool_check(&self, tool: &str, available: bool, version: &str) {
        if available {
            self.success(tool, version);
        } else {
            self.error(tool, "not found");
        }
    }

    pub fn section(&self, title: &str) {
        println!();
        println!("{}", self.styling.style_emphasis(title));
    }

    /// `[1/3] Scanning Cursor`
    pub fn step(&self, current: usize, total: usize, description: &str) {
        let prefix = format!("[{}/{}]", current, total);
        println!("{} {}", self.styling.style_subtle(&prefix), description);
    }
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}
