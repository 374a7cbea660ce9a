//! Live display provider implementation
//!
//! Production implementation of the display providers, delegating to the
//! global `Display`.

use super::Display;
use super::providers::*;

/// Live implementation of DisplayProvider used for the command lifecycle
#[derive(Debug, Default)]
pub struct LiveDisplayProvider;

impl LiveDisplayProvider {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayProvider for LiveDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider> {
        Box::new(LiveStatusProvider)
    }

    fn table(&self) -> Box<dyn StructuredProvider> {
        Box::new(LiveStructuredProvider)
    }
}

struct LiveStatusProvider;

impl StatusProvider for LiveStatusProvider {
    fn checking(&self, task: &str) {
        Display::status().checking(task);
    }

    fn success(&self, item: &str, details: &str) {
        Display::status().success(item, details);
    }

    fn error(&self, item: &str, details: &str) {
        Display::status().error(item, details);
    }

    fn warning(&self, message: &str) {
        Display::status().warning(message);
    }

    fn info(&self, message: &str) {
        Display::status().info(message);
    }

    fn message(&self, text: &str) {
        Display::status().message(text);
    }

    fn emphasis(&self, text: &str) {
        Display::status().emphasis(text);
    }

    fn subtle(&self, text: &str) {
        Display::status().subtle(text);
    }

    fn list(&self, items: &[&str]) {
        Display::status().list(items);
    }

    fn complete(&self, task: &str) {
        Display::status().complete(task);
    }

    fn tool_check(&self, tool: &str, available: bool, version: &str) {
        Display::status().tool_check(tool, available, version);
    }

    fn section(&self, title: &str) {
        Display::status().section(title);
    }

    fn step(&self, current: usize, total: usize, description: &str) {
        Display::status().step(current, total, description);
    }
}

struct LiveStructuredProvider;

impl StructuredProvider for LiveStructuredProvider {
    fn table(&self, headers: &[&str], rows: &[Vec<&str>]) {
        let mut table = Display::table().table().header(headers);
        for row in rows {
            table = table.row(row);
        }
        table.render();
    }

    fn list(&self, items: &[&str]) {
        Display::table().list(items);
    }

    fn properties(&self, pairs: &[(&str, &str)]) {
        Display::table().pairs(pairs);
    }
}
