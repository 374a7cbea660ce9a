//! Terminal capability detection
//!
//! Environment-driven detection of color depth, unicode support, and TTY
//! state. Feeds the display styling layer and the logger's ANSI toggle.

use thiserror::Error;

mod capabilities;
pub use capabilities::*;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("Failed to parse terminal environment: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },
}
