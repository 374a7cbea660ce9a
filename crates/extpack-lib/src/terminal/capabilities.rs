use super::TerminalError;
use crate::application::AppConfig;
use crate::primitives::*;
use serde::Deserialize;
use std::io::{self, IsTerminal};

// ============================================================================
// CORE TERMINAL CAPABILITY STRUCTURES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TerminalCapabilities {
    pub color: TerminalColorCaps,
    pub unicode: TerminalUnicodeCaps,
    pub is_tty: bool,
}

impl Default for TerminalCapabilities {
    /// Plain ASCII, no color, not a TTY. Safe for pipes and tests.
    fn default() -> Self {
        Self {
            color: TerminalColorCaps::None,
            unicode: TerminalUnicodeCaps::Ascii,
            is_tty: false,
        }
    }
}

/// Terminal-related environment variables, loaded with envy
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TerminalEnvConfig {
    pub no_color: Option<String>,
    pub force_color: Option<String>,
    pub colorterm: Option<String>,
    pub term: Option<String>,
    pub term_program: Option<String>,
    pub wt_session: Option<String>,
    pub lang: Option<String>,
    pub lc_all: Option<String>,
    pub lc_ctype: Option<String>,
}

// ============================================================================
// MAIN DETECTION IMPLEMENTATION
// ============================================================================

impl TerminalCapabilities {
    pub fn detect_from_config(config: &AppConfig) -> Result<Self, TerminalError> {
        let env_config = envy::from_env::<TerminalEnvConfig>()?;
        let is_tty = io::stdout().is_terminal();

        Ok(Self::detect_with(&env_config, config.color, is_tty))
    }

    /// Pure detection over an already-loaded environment snapshot
    pub fn detect_with(
        env_config: &TerminalEnvConfig,
        intent: TerminalCapsDetectIntent,
        is_tty: bool,
    ) -> Self {
        let color = match intent {
            TerminalCapsDetectIntent::Never => TerminalColorCaps::None,
            TerminalCapsDetectIntent::Always => {
                match detect_color_from_environment(env_config) {
                    TerminalColorCaps::None => TerminalColorCaps::Ansi16,
                    detected => detected,
                }
            }
            TerminalCapsDetectIntent::Auto => {
                if is_set(&env_config.no_color) {
                    TerminalColorCaps::None
                } else if is_tty || is_set(&env_config.force_color) {
                    detect_color_from_environment(env_config)
                } else {
                    TerminalColorCaps::None
                }
            }
        };

        Self {
            color,
            unicode: detect_unicode_capabilities(env_config, is_tty),
            is_tty,
        }
    }

    pub fn supports_color(&self) -> bool {
        self.color != TerminalColorCaps::None
    }

    pub fn supports_unicode(&self) -> bool {
        self.unicode != TerminalUnicodeCaps::Ascii
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Best color depth the environment advertises
pub fn detect_color_from_environment(env_config: &TerminalEnvConfig) -> TerminalColorCaps {
    if let Some(colorterm) = env_config.colorterm.as_deref() {
        let colorterm = colorterm.to_ascii_lowercase();
        if colorterm == "truecolor" || colorterm == "24bit" {
            return TerminalColorCaps::TrueColor;
        }
    }

    if env_config.wt_session.is_some() {
        return TerminalColorCaps::TrueColor;
    }

    match env_config.term_program.as_deref() {
        Some("iTerm.app") | Some("WezTerm") | Some("vscode") | Some("ghostty") => {
            return TerminalColorCaps::TrueColor;
        }
        Some("Apple_Terminal") => return TerminalColorCaps::Ansi256,
        _ => {}
    }

    match env_config.term.as_deref() {
        Some("dumb") => TerminalColorCaps::None,
        Some(term) if term.contains("256color") => TerminalColorCaps::Ansi256,
        Some(term) if !term.is_empty() => TerminalColorCaps::Ansi16,
        _ => TerminalColorCaps::None,
    }
}

/// Unicode support from the locale; Windows Terminal is always UTF-8
pub fn detect_unicode_capabilities(
    env_config: &TerminalEnvConfig,
    is_tty: bool,
) -> TerminalUnicodeCaps {
    if env_config.wt_session.is_some() {
        return TerminalUnicodeCaps::BasicUnicode;
    }

    let locale = env_config
        .lc_all
        .as_deref()
        .or(env_config.lc_ctype.as_deref())
        .or(env_config.lang.as_deref())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if locale.contains("utf-8") || locale.contains("utf8") {
        TerminalUnicodeCaps::BasicUnicode
    } else if is_tty && locale.is_empty() && cfg!(target_os = "macos") {
        TerminalUnicodeCaps::BasicUnicode
    } else {
        TerminalUnicodeCaps::Ascii
    }
}

#[cfg(test)]
mod tests {
    include!("capabilities.test.rs");
}
