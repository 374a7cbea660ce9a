//! Configuration loading
//!
//! Coordinates loading configuration from env files, the environment, and
//! parsed CLI arguments.

use crate::primitives::ConfigError;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Env files consulted before parsing, most specific first
const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl AppConfig {
    /// Load `.env.local` then `.env` into the process environment so clap's
    /// `env =` attributes see them. Missing files are fine.
    pub fn load_env_files() -> Result<(), ConfigError> {
        for env_file in ENV_FILES {
            if let Err(e) = dotenvy::from_filename(env_file) {
                if !e.not_found() {
                    return Err(ConfigError::EnvFileError {
                        file: env_file.to_string(),
                        source: e,
                    });
                }
            }
        }
        Ok(())
    }

    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load(cli: AppConfig) -> Result<Self, ConfigError> {
        Self::resolve(cli, &EnvironmentConfig::load()?)
    }

    /// Layer the CLI config over the environment's color rules and validate
    pub fn resolve(cli: AppConfig, env: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.color = env.apply_color_config(config.color);
        config = config.merge_with(cli);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
