use super::shared::value_enum_from_str;

/// How `--color` asks for terminal color detection to behave
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalCapsDetectIntent {
    /// Probe the terminal and environment
    #[value(aliases = ["automatic", "detect", "default"])]
    Auto,

    /// Color even when stdout is not a terminal
    #[value(aliases = ["force", "on"])]
    Always,

    #[value(alias = "off")]
    Never,
}

/// Terminal color capability levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalColorCaps {
    None,
    Ansi16,
    Ansi256,
    TrueColor,
}

/// Terminal unicode capability levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalUnicodeCaps {
    Ascii,
    BasicUnicode,
}

value_enum_from_str!(TerminalCapsDetectIntent => "invalid color intent");
