use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// extpack CLI - editor extension pack management
#[derive(Debug, Clone, Parser)]
#[command(name = "extpack")]
#[command(about = "Group installed editor extensions into shareable extension packs")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// extpack commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from env files, environment, and CLI
#[derive(Debug)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments, layered over the
    /// environment (see `AppConfig::resolve`)
    pub fn load() -> Result<Self, ConfigError> {
        AppConfig::load_env_files()?;
        let cli = Cli::parse();
        Ok(Self {
            app_config: AppConfig::load(cli.config)?,
            command: cli.command,
        })
    }
}

/// Available extpack commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Check that the packaging tool is available
    Requirements,

    /// Show version information
    Version,

    /// List extension packs
    Packs {
        /// Only show packs whose name, display name, or description match
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one pack's manifest
    Show {
        /// Pack name (folder name)
        pack: String,
    },

    /// Create a new pack
    Create {
        /// Folder-safe pack name
        name: String,

        /// Human-readable name (prompted for when interactive)
        #[arg(long)]
        display_name: Option<String>,

        /// Short description
        #[arg(long)]
        description: Option<String>,

        /// Initial extension identifiers (publisher.name)
        extensions: Vec<String>,
    },

    /// Update a pack's display name, description, or extension list
    Update {
        pack: String,

        #[arg(long)]
        display_name: Option<String>,

        /// New description; pass an empty string to clear it
        #[arg(long)]
        description: Option<String>,

        /// Replace the extension list (comma separated)
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        extensions: Option<Vec<String>>,
    },

    /// Add an extension to a pack
    Add {
        pack: String,

        /// Extension identifier; picked interactively from installed extensions when omitted
        extension: Option<String>,
    },

    /// Remove an extension from a pack
    Remove {
        pack: String,
        extension: String,
    },

    /// Package a pack into a .vsix archive
    Build {
        pack: String,
    },

    /// List installed editor extensions
    Extensions {
        /// Editor scheme or display name (default: Visual Studio Code)
        #[arg(long, conflicts_with = "all")]
        editor: Option<String>,

        /// Scan every known editor
        #[arg(long)]
        all: bool,

        #[arg(long)]
        search: Option<String>,

        /// Include extensions on the ignored list
        #[arg(long)]
        include_ignored: bool,
    },

    /// Manage the ignored-extensions list
    #[command(subcommand)]
    Ignored(IgnoredCommand),
}

/// Ignored-extensions subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum IgnoredCommand {
    /// Print the ignored identifiers
    List,
    /// Ignore an extension
    Add { id: String },
    /// Stop ignoring an extension
    Remove { id: String },
    /// Flip an extension's ignored state
    Toggle { id: String },
    /// Forget every ignored extension
    Clear,
    /// Report whether an extension is ignored
    Check { id: String },
}

impl Commands {
    /// Whether the command reads or writes the packs root
    pub fn requires_packs_root(&self) -> bool {
        matches!(
            self,
            Commands::Packs { .. }
                | Commands::Show { .. }
                | Commands::Create { .. }
                | Commands::Update { .. }
                | Commands::Add { .. }
                | Commands::Remove { .. }
                | Commands::Build { .. }
        )
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
