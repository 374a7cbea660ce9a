//! Mock display provider that records every call for assertions

use super::providers::*;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockDisplayProvider {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockDisplayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_calls(&self) -> Vec<DisplayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn has_call(&self, expected: &DisplayCall) -> bool {
        self.get_calls().contains(expected)
    }

    pub fn count_calls(&self, call_type: &str) -> usize {
        self.get_calls()
            .iter()
            .filter(|call| call.call_type() == call_type)
            .count()
    }

    /// Every recorded line of text, flattened, for substring assertions
    pub fn transcript(&self) -> String {
        self.get_calls()
            .iter()
            .map(DisplayCall::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DisplayProvider for MockDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider> {
        Box::new(MockRecorder {
            calls: self.calls.clone(),
        })
    }

    fn table(&self) -> Box<dyn StructuredProvider> {
        Box::new(MockRecorder {
            calls: self.calls.clone(),
        })
    }
}

/// Recorded display call for testing
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    StatusChecking { task: String },
    StatusSuccess { item: String, details: String },
    StatusError { item: String, details: String },
    StatusWarning { message: String },
    StatusInfo { message: String },
    StatusMessage { text: String },
    StatusEmphasis { text: String },
    StatusSubtle { text: String },
    StatusList { items: Vec<String> },
    StatusComplete { task: String },
    StatusToolCheck { tool: String, available: bool, version: String },
    StatusSection { title: String },
    StatusStep { current: usize, total: usize, description: String },
    StructuredTable { headers: Vec<String>, rows: Vec<Vec<String>> },
    StructuredList { items: Vec<String> },
    StructuredProperties { pairs: Vec<(String, String)> },
}

impl DisplayCall {
    pub fn call_type(&self) -> &'static str {
        match self {
            DisplayCall::StatusChecking { .. } => "status_checking",
            DisplayCall::StatusSuccess { .. } => "status_success",
            DisplayCall::StatusError { .. } => "status_error",
            DisplayCall::StatusWarning { .. } => "status_warning",
            DisplayCall::StatusInfo { .. } => "status_info",
            DisplayCall::StatusMessage { .. } => "status_message",
            DisplayCall::StatusEmphasis { .. } => "status_emphasis",
            DisplayCall::StatusSubtle { .. } => "status_subtle",
            DisplayCall::StatusList { .. } => "status_list",
            DisplayCall::StatusComplete { .. } => "status_complete",
            DisplayCall::StatusToolCheck { .. } => "status_tool_check",
            DisplayCall::StatusSection { .. } => "status_section",
            DisplayCall::StatusStep { .. } => "status_step",
            DisplayCall::StructuredTable { .. } => "structured_table",
            DisplayCall::StructuredList { .. } => "structured_list",
            DisplayCall::StructuredProperties { .. } => "structured_properties",
        }
    }

    fn text(&self) -> String {
        match self {
            DisplayCall::StatusChecking { task } => task.clone(),
            DisplayCall::StatusSuccess { item, details }
            | DisplayCall::StatusError { item, details } => format!("{item}: {details}"),
            DisplayCall::StatusWarning { message } | DisplayCall::StatusInfo { message } => {
                message.clone()
            }
            DisplayCall::StatusMessage { text }
            | DisplayCall::StatusEmphasis { text }
            | DisplayCall::StatusSubtle { text } => text.clone(),
            DisplayCall::StatusList { items } | DisplayCall::StructuredList { items } => {
                items.join("\n")
            }
            DisplayCall::StatusComplete { task } => task.clone(),
            DisplayCall::StatusToolCheck { tool, version, .. } => format!("{tool}: {version}"),
            DisplayCall::StatusSection { title } => title.clone(),
            DisplayCall::StatusStep { description, .. } => description.clone(),
            DisplayCall::StructuredTable { headers, rows } => std::iter::once(headers.join(" | "))
                .chain(rows.iter().map(|row| row.join(" | ")))
                .collect::<Vec<_>>()
                .join("\n"),
            DisplayCall::StructuredProperties { pairs } => pairs
                .iter()
                .map(|(k, v)| format!("{k} | {v}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

struct MockRecorder {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockRecorder {
    fn record_call(&self, call: DisplayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl StatusProvider for MockRecorder {
    fn checking(&self, task: &str) {
        self.record_call(DisplayCall::StatusChecking {
            task: task.to_string(),
        });
    }

    fn success(&self, item: &str, details: &str) {
        self.record_call(DisplayCall::StatusSuccess {
            item: item.to_string(),
            details: details.to_string(),
        });
    }

    fn error(&self, item: &str, details: &str) {
        self.record_call(DisplayCall::StatusError {
            item: item.to_string(),
            details: details.to_string(),
        });
    }

    fn warning(&self, message: &str) {
        self.record_call(DisplayCall::StatusWarning {
            message: message.to_string(),
        });
    }

    fn info(&self, message: &str) {
        self.record_call(DisplayCall::StatusInfo {
            message: message.to_string(),
        });
    }

    fn message(&self, text: &str) {
        self.record_call(DisplayCall::StatusMessage {
            text: text.to_string(),
        });
    }

    fn emphasis(&self, text: &str) {
        self.record_call(DisplayCall::StatusEmphasis {
            text: text.to_string(),
        });
    }

    fn subtle(&self, text: &str) {
        self.record_call(DisplayCall::StatusSubtle {
            text: text.to_string(),
        });
    }

    fn list(&self, items: &[&str]) {
        self.record_call(DisplayCall::StatusList {
            items: owned(items),
        });
    }

    fn complete(&self, task: &str) {
        self.record_call(DisplayCall::StatusComplete {
            task: task.to_string(),
        });
    }

    fn tool_check(&self, tool: &str, available: bool, version: &str) {
        self.record_call(DisplayCall::StatusToolCheck {
            tool: tool.to_string(),
            available,
            version: version.to_string(),
        });
    }

    fn section(&self, title: &str) {
        self.record_call(DisplayCall::StatusSection {
            title: title.to_string(),
        });
    }

    fn step(&self, current: usize, total: usize, description: &str) {
        self.record_call(DisplayCall::StatusStep {
            current,
            total,
            description: description.to_string(),
        });
    }
}

impl StructuredProvider for MockRecorder {
    fn table(&self, headers: &[&str], rows: &[Vec<&str>]) {
        self.record_call(DisplayCall::StructuredTable {
            headers: owned(headers),
            rows: rows.iter().map(|row| owned(row)).collect(),
        });
    }

    fn list(&self, items: &[&str]) {
        self.record_call(DisplayCall::StructuredList {
            items: owned(items),
        });
    }

    fn properties(&self, pairs: &[(&str, &str)]) {
        self.record_call(DisplayCall::StructuredProperties {
            pairs: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }
}
