use serde::{Deserialize, Serialize};
use std::fmt;

/// An editor distribution sharing the VS Code extension registry format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EditorVariant {
    /// Human-readable product name
    pub display_name: &'static str,
    /// Folder scheme: extensions live under `~/.<scheme>/extensions`
    pub scheme: &'static str,
}

/// Every editor variant the scanner knows about, primary first
pub const KNOWN_EDITORS: [EditorVariant; 6] = [
    EditorVariant {
        display_name: "Visual Studio Code",
        scheme: "vscode",
    },
    EditorVariant {
        display_name: "Visual Studio Code - Insiders",
        scheme: "vscode-insiders",
    },
    EditorVariant {
        display_name: "Cursor",
        scheme: "cursor",
    },
    EditorVariant {
        display_name: "VSCodium",
        scheme: "vscode-oss",
    },
    EditorVariant {
        display_name: "Positron",
        scheme: "positron",
    },
    EditorVariant {
        display_name: "Windsurf",
        scheme: "windsurf",
    },
];

impl EditorVariant {
    /// The distinguished editor used by `list_primary`
    pub fn primary() -> Self {
        KNOWN_EDITORS[0]
    }

    /// Look up a variant by scheme or display name (case-insensitive)
    pub fn find(key: &str) -> Option<Self> {
        let key = key.trim();
        KNOWN_EDITORS.iter().copied().find(|variant| {
            variant.scheme.eq_ignore_ascii_case(key)
                || variant.display_name.eq_ignore_ascii_case(key)
        })
    }

    /// Dot-folder name under the user's home directory
    pub fn home_folder(&self) -> String {
        format!(".{}", self.scheme)
    }
}

impl fmt::Display for EditorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Outcome of an idempotent set-like mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mutation {
    /// The backing file was rewritten
    Applied,
    /// Nothing to do; the file was left untouched
    Unchanged,
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied)
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Applied => write!(f, "applied"),
            Mutation::Unchanged => write!(f, "unchanged"),
        }
    }
}
