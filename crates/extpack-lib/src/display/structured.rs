//! Structured output display (tables, key-value pairs, lists)

use super::styling::StyleManager;
use console::{measure_text_width, truncate_str};
use std::cmp;

/// Columns wider than this are truncated with an ellipsis
const MAX_COLUMN_WIDTH: usize = 60;

pub struct StructuredDisplay<'a> {
    styling: &'a StyleManager,
}

impl<'a> StructuredDisplay<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    pub fn table(&self) -> TableDisplay<'a> {
        TableDisplay::new(self.styling)
    }

    /// Aligned `key | value` lines
    pub fn pairs(&self, pairs: &[(&str, &str)]) {
        for line in self.render_pairs(pairs) {
            println!("{}", line);
        }
    }

    pub fn list(&self, items: &[&str]) {
        for item in items {
            println!("{} {}", self.styling.bullet(), item);
        }
    }

    pub(crate) fn render_pairs(&self, pairs: &[(&str, &str)]) -> Vec<String> {
        let max_key_len = pairs
            .iter()
            .map(|(key, _)| measure_text_width(key))
            .max()
            .unwrap_or(0);

        pairs
            .iter()
            .map(|(key, value)| {
                let padded = format!("{:width$}", key, width = max_key_len);
                format!("{} | {}", self.styling.style_subtle(&padded), value)
            })
            .collect()
    }
}

/// Table display builder
pub struct TableDisplay<'a> {
    styling: &'a StyleManager,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl<'a> TableDisplay<'a> {
    fn new(styling: &'a StyleManager) -> Self {
        Self {
            styling,
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn header(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn render(self) {
        for line in self.render_lines() {
            println!("{}", line);
        }
    }

    pub(crate) fn render_lines(&self) -> Vec<String> {
        let num_cols = cmp::max(
            self.headers.len(),
            self.rows.iter().map(Vec::len).max().unwrap_or(0),
        );
        if num_cols == 0 {
            return Vec::new();
        }

        let mut col_widths = vec![0; num_cols];
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = cmp::max(col_widths[i], measure_text_width(cell));
            }
        }
        for width in &mut col_widths {
            *width = cmp::min(*width, MAX_COLUMN_WIDTH);
        }

        let mut lines = Vec::new();
        if !self.headers.is_empty() {
            lines.push(self.render_row(&self.headers, &col_widths, true));
            let separator = col_widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-");
            lines.push(self.styling.style_subtle(&separator));
        }
        for row in &self.rows {
            lines.push(self.render_row(row, &col_widths, false));
        }
        lines
    }

    fn render_row(&self, cells: &[String], widths: &[usize], is_header: bool) -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                let fitted = truncate_str(cell, width, "...");
                let padded = format!("{:width$}", fitted, width = width);
                if is_header {
                    self.styling.style_emphasis(&padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    include!("structured.test.rs");
}
