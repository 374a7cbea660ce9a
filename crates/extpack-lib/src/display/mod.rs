//! User-facing output
//!
//! Status lines and tables on stdout, styled to what the terminal supports.
//! Diagnostics belong to `tracing`; this module only prints results.

use crate::primitives::ConfigError;
use crate::terminal::TerminalCapabilities;
use std::sync::OnceLock;

pub mod live;
pub mod providers;
pub mod status;
pub mod structured;
pub mod styling;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
#[cfg(test)]
pub mod test_utils;

pub use live::LiveDisplayProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{DisplayCall, MockDisplayProvider};
pub use providers::{
    DisplayProvider, DisplayProviderExt, OperationSummary, StatusProvider, StructuredProvider,
};

static GLOBAL_DISPLAY: OnceLock<Display> = OnceLock::new();

/// Process-wide styled stdout. Only `LiveDisplayProvider` talks to it;
/// handlers go through `Session::display`.
pub struct Display {
    styling: styling::StyleManager,
}

impl Display {
    fn new(capabilities: &TerminalCapabilities) -> Self {
        Self {
            styling: styling::StyleManager::new(capabilities),
        }
    }

    /// Fix the styling for the rest of the process. Errors if output was
    /// already produced or `init` ran before.
    pub fn init(capabilities: TerminalCapabilities) -> Result<&'static Self, ConfigError> {
        GLOBAL_DISPLAY
            .set(Self::new(&capabilities))
            .map_err(|_| ConfigError::AlreadyInitialized)?;
        Ok(Self::global())
    }

    /// Falls back to plain ASCII output when `init` never ran
    pub fn global() -> &'static Self {
        GLOBAL_DISPLAY.get_or_init(|| Self::new(&TerminalCapabilities::default()))
    }

    pub fn status() -> status::StatusDisplay<'static> {
        status::StatusDisplay::new(&Self::global().styling)
    }

    pub fn table() -> structured::StructuredDisplay<'static> {
        structured::StructuredDisplay::new(&Self::global().styling)
    }
}
