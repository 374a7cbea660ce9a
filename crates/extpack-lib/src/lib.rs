//! # extpack Library
//!
//! Editor extension pack management library.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`terminal`] - Cross-platform terminal capability detection
//! - [`logger`] - Structured logging with batch context
//! - [`display`] - User-facing status lines and tables
//! - [`extpack`] - Pack manifests, editor registries, ignored set, packaging
//! - [`application`] - CLI interface, configuration, sessions, and commands
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! // Initialize and run extpack
//! extpack_lib::main().await
//! # }
//! ```

pub mod application;
pub mod display;
pub mod extpack;
pub mod logger;
pub mod primitives;
pub mod terminal;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command, execute_command_with_session};
pub use logger::Logger;
pub use primitives::{
    ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, OutputFormat,
    TerminalCapsDetectIntent, TerminalColorCaps,
};
pub use terminal::TerminalCapabilities;

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
