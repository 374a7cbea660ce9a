//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const TTY_CAPS_DETECT_INTENT: &str = "auto";
    pub const OUTPUT: &str = "text";
    pub const PACKAGER: &str = "npx vsce package";

    /// Folder under the workdir (or data dir) holding one subfolder per pack
    pub const PACKS_FOLDER: &str = "packs";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn tty_caps_detect_intent() -> TerminalCapsDetectIntent {
        TerminalCapsDetectIntent::Auto
    }

    pub fn output() -> OutputFormat {
        OutputFormat::Text
    }

    pub fn packager() -> String {
        defaults::PACKAGER.to_string()
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Working directory; development packs live in `<workdir>/packs`
    #[arg(short, long, global = true, env = "EXTPACK_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Packs root (overrides the workdir/data-dir derivation)
    #[arg(long, global = true, env = "EXTPACK_PACKS_DIR")]
    #[serde(default)]
    pub packs_dir: Option<PathBuf>,

    /// Use the per-user data directory for packs instead of the workdir
    #[arg(long, global = true, env = "EXTPACK_INSTALLED")]
    #[serde(default)]
    pub installed: bool,

    /// Per-user data directory (ignored-extensions.json, installed packs)
    #[arg(long, global = true, env = "EXTPACK_DATA_DIR")]
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the editors' dot-folders (defaults to $HOME)
    #[arg(long, global = true, env = "EXTPACK_EDITOR_HOME")]
    #[serde(default)]
    pub editor_home: Option<PathBuf>,

    /// Packaging command run inside a pack folder
    #[arg(long, global = true, env = "EXTPACK_PACKAGER", default_value = defaults::PACKAGER)]
    #[serde(default = "default_fns::packager")]
    pub packager: String,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, global = true, env = "EXTPACK_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, global = true, env = "EXTPACK_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, global = true, env = "EXTPACK_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, global = true, env = "EXTPACK_COLOR", default_value = defaults::TTY_CAPS_DETECT_INTENT)]
    #[serde(default = "default_fns::tty_caps_detect_intent")]
    pub color: TerminalCapsDetectIntent,

    /// Result output (text, json)
    #[arg(short, long, global = true, env = "EXTPACK_OUTPUT", default_value = defaults::OUTPUT)]
    #[serde(default = "default_fns::output")]
    pub output: OutputFormat,

    /// Never prompt; use defaults
    #[arg(short, long, global = true, env = "EXTPACK_YES")]
    #[serde(default)]
    pub yes: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            packs_dir: None,
            installed: false,
            data_dir: None,
            editor_home: None,
            packager: default_fns::packager(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::tty_caps_detect_intent(),
            output: default_fns::output(),
            yes: false,
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig and TerminalCapabilities
    pub fn to_logger_config(
        &self,
        terminal_caps: &crate::terminal::TerminalCapabilities,
    ) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            terminal_caps: terminal_caps.clone(),
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.workdir.is_some() {
            self.workdir = other.workdir;
        }
        if other.packs_dir.is_some() {
            self.packs_dir = other.packs_dir;
        }
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.editor_home.is_some() {
            self.editor_home = other.editor_home;
        }

        self.installed |= other.installed;
        self.yes |= other.yes;

        if other.packager != default_fns::packager() {
            self.packager = other.packager;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, TerminalCapsDetectIntent::Auto) {
            self.color = other.color;
        }
        if !matches!(other.output, OutputFormat::Text) {
            self.output = other.output;
        }

        self
    }

    /// Validate the final configuration and resolve derived paths
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.workdir.is_none() {
            self.workdir = Some(std::env::current_dir()?);
        }

        if self.data_dir.is_none() {
            let dirs = directories::ProjectDirs::from("dev", "inherent-design", "extpack")
                .ok_or(ConfigError::DirectoryUnavailable { what: "data" })?;
            self.data_dir = Some(dirs.data_dir().to_path_buf());
        }

        if self.editor_home.is_none() {
            let base = directories::BaseDirs::new()
                .ok_or(ConfigError::DirectoryUnavailable { what: "home" })?;
            self.editor_home = Some(base.home_dir().to_path_buf());
        }

        self.resolve_packs_dir();

        if self.packager_command().is_none() {
            return Err(ConfigError::ValidationFailed {
                reason: "packager command is empty".to_string(),
            });
        }

        Ok(())
    }

    /// Explicit packs dir, else `<data dir>/packs` when installed, else `<workdir>/packs`
    fn resolve_packs_dir(&mut self) {
        if self.packs_dir.is_some() {
            return;
        }

        let base = if self.installed {
            self.data_dir.as_ref()
        } else {
            self.workdir.as_ref()
        };
        self.packs_dir = base.map(|dir| dir.join(defaults::PACKS_FOLDER));
    }

    /// Packaging program and its arguments, split on whitespace
    pub fn packager_command(&self) -> Option<(String, Vec<String>)> {
        let mut parts = self.packager.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some((program, parts.collect()))
    }

    /// Packs root; falls back to `./packs` before `validate` has run
    pub fn packs_root(&self) -> PathBuf {
        self.packs_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::PACKS_FOLDER))
    }

    pub fn data_root(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn editor_home_dir(&self) -> PathBuf {
        self.editor_home.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn is_json(&self) -> bool {
        self.output == OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
