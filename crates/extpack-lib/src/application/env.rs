//! Standard environment variables that adjust color behavior

use crate::primitives::{ConfigError, TerminalCapsDetectIntent};
use serde::Deserialize;

/// Environment variables that affect application behavior
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    /// NO_COLOR (any non-empty value disables color)
    pub no_color: Option<String>,
    /// FORCE_COLOR (0/false disables, 1/2/3/true enables)
    pub force_color: Option<String>,
    /// CLICOLOR (0 disables color)
    pub clicolor: Option<String>,
    /// CI (any value means non-interactive CI)
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(envy::from_env()?)
    }

    /// Resolve the color intent against the environment. `CI` always wins,
    /// then `FORCE_COLOR`, then `NO_COLOR`/`CLICOLOR=0`.
    pub fn apply_color_config(&self, color: TerminalCapsDetectIntent) -> TerminalCapsDetectIntent {
        use TerminalCapsDetectIntent::{Always, Never};

        if self.ci.is_some() {
            return Never;
        }

        let forced = match self.force_color.as_deref() {
            Some("0" | "false") => Some(Never),
            Some("1" | "2" | "3" | "true") => Some(Always),
            _ => None,
        };
        let disabled = self.clicolor.as_deref() == Some("0")
            || self.no_color.as_deref().is_some_and(|v| !v.is_empty());

        forced.unwrap_or(if disabled { Never } else { color })
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}
