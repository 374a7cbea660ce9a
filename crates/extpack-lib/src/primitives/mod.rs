//! Shared vocabulary for the rest of the crate
//!
//! Value enums parsed from flags, env vars, and config (all case-insensitive,
//! all alias-aware), the logger's configuration, and the error types raised
//! while configuring the process.

use thiserror::Error;

mod shared;
use shared::value_enum_from_str;

pub mod extpack;
pub use extpack::*;

pub mod terminal;
pub use terminal::*;

/// Logging verbosity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum LogLevel {
    #[value(aliases = ["err", "fatal", "critical"])]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warning,
    #[value(alias = "information")]
    Info,
    #[value(alias = "debugging")]
    Debug,
    #[value(aliases = ["tracing", "verbose"])]
    Trace,
}

impl LogLevel {
    /// `--log-level` is numeric: 0 = errors only, 4 and up = everything
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => Self::Error,
            1 => Self::Warning,
            2 => Self::Info,
            3 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Directive string understood by `EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One compact line per event
    #[value(aliases = ["txt", "plain"])]
    Text,
    Json,
    /// Multi-line, field per line
    #[value(aliases = ["yml", "pretty"])]
    Yaml,
}

/// Stream the logger writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stderr,
    Stdout,
}

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable status lines and tables
    #[value(aliases = ["human", "plain"])]
    Text,
    /// One `{ success, data | error }` envelope per command
    Json,
}

value_enum_from_str!(
    LogLevel => "invalid log level",
    LogFormat => "invalid log format",
    LogOutput => "invalid log output stream",
    OutputFormat => "invalid output format",
);

/// Everything `Logger::init` needs, resolved from `AppConfig`
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub terminal_caps: crate::terminal::TerminalCapabilities,
}

/// Fields attached to log lines emitted while walking a batch
#[derive(Debug, Clone)]
pub struct LogContext {
    pub operation: String,
    pub total_items: Option<u64>,
    pub current_item: Option<u64>,
}

impl LogContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            total_items: None,
            current_item: None,
        }
    }

    pub fn with_progress(operation: &str, total: u64) -> Self {
        Self {
            total_items: Some(total),
            ..Self::new(operation)
        }
    }

    pub fn set_progress(&mut self, current: u64) {
        self.current_item = Some(current);
    }
}

/// Failures while assembling `AppConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load environment file '{file}': {source}")]
    EnvFileError {
        file: String,
        source: dotenvy::Error,
    },

    #[error("Global configuration already initialized")]
    AlreadyInitialized,

    #[error("Invalid working directory: {path}")]
    InvalidWorkDir { path: String },

    #[error("Failed to parse environment variables: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Failed to get current directory: {source}")]
    CurrentDirError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration value '{value}': {reason}")]
    ParseError { value: String, reason: String },

    #[error("Could not determine a per-user {what} directory; pass it explicitly")]
    DirectoryUnavailable { what: &'static str },
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to initialize tracing subscriber: {reason}")]
    InitializationFailed { reason: String },

    #[error("Logger already initialized")]
    AlreadyInitialized,
}

#[cfg(test)]
mod extpack_tests {
    include!("extpack.test.rs");
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
