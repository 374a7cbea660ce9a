//! Display provider traits for dependency injection
//!
//! Abstracts user-facing output behind traits so command handlers can be
//! exercised without writing to the terminal.

use std::fmt;

/// Provider trait for all user-facing communication
pub trait DisplayProvider {
    /// Status messages with semantic meaning
    fn status(&self) -> Box<dyn StatusProvider>;

    /// Structured output (tables, lists, key-value pairs)
    fn table(&self) -> Box<dyn StructuredProvider>;
}

/// Provider trait for status updates and user feedback
pub trait StatusProvider {
    fn checking(&self, task: &str);
    fn success(&self, item: &str, details: &str);
    fn error(&self, item: &str, details: &str);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);
    fn message(&self, text: &str);
    fn emphasis(&self, text: &str);
    fn subtle(&self, text: &str);
    fn list(&self, items: &[&str]);
    fn complete(&self, task: &str);
    fn tool_check(&self, tool: &str, available: bool, version: &str);
    fn section(&self, title: &str);
    fn step(&self, current: usize, total: usize, description: &str);
}

/// Provider trait for structured output
pub trait StructuredProvider {
    fn table(&self, headers: &[&str], rows: &[Vec<&str>]);
    fn list(&self, items: &[&str]);
    fn properties(&self, pairs: &[(&str, &str)]);
}

/// Summary information for batch operations
#[derive(Debug, Clone)]
pub struct OperationSummary {
    pub successful: usize,
    pub failed: usize,
    pub total: usize,
}

impl OperationSummary {
    pub fn new(successful: usize, failed: usize) -> Self {
        Self {
            successful,
            failed,
            total: successful + failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.successful > 0
    }

    pub fn is_partial_success(&self) -> bool {
        self.successful > 0 && self.failed > 0
    }

    pub fn is_failure(&self) -> bool {
        self.failed > 0 && self.successful == 0
    }
}

impl fmt::Display for OperationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} successful, {} failed", self.successful, self.failed)
    }
}

/// Extension trait for common display patterns used in commands
pub trait DisplayProviderExt: DisplayProvider {
    /// Summarize a batch scan with a status line matching its outcome
    fn display_summary(&self, operation: &str, summary: &OperationSummary) {
        let status = self.status();

        if summary.is_success() {
            status.complete(&format!("{}: {} loaded", operation, summary.successful));
        } else if summary.is_partial_success() {
            status.warning(&format!("{} completed with issues ({})", operation, summary));
        } else if summary.is_failure() {
            status.error(operation, &format!("{} failed", summary.failed));
        } else {
            status.info(&format!("{}: nothing found", operation));
        }
    }
}

impl<T: DisplayProvider + ?Sized> DisplayProviderExt for T {}

#[cfg(test)]
mod tests {
    include!("providers.test.rs");
}
