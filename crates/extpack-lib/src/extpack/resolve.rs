//! Display metadata resolution for installed extensions
//!
//! Each value comes from an ordered list of strategies; the first strategy
//! producing something wins and every failure degrades to the next one.

use crate::application::session::FileSystemProvider;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use std::path::Path;

/// Localization table next to an extension manifest
pub const NLS_FILE: &str = "package.nls.json";

/// Ordered fallback chain
pub struct Fallback<'a, T> {
    strategies: Vec<Box<dyn FnOnce() -> Option<T> + 'a>>,
}

impl<T> Default for Fallback<'_, T> {
    fn default() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }
}

impl<'a, T> Fallback<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then<F>(mut self, strategy: F) -> Self
    where
        F: FnOnce() -> Option<T> + 'a,
    {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// First strategy that yields a value
    pub fn resolve(self) -> Option<T> {
        self.strategies.into_iter().find_map(|strategy| strategy())
    }

    pub fn resolve_or(self, default: T) -> T {
        self.resolve().unwrap_or(default)
    }
}

/// Token inside a `%token%` placeholder: the text between the first and
/// last `%`, at least one character long
pub fn nls_token(text: &str) -> Option<&str> {
    let start = text.find('%')?;
    let end = text.rfind('%')?;
    (end > start + 1).then(|| &text[start + 1..end])
}

/// MIME type for an icon file, by extension
pub fn icon_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

/// `data:<mime>;base64,<payload>` for a file's bytes
pub fn data_url(path: &Path, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", icon_mime(path), STANDARD.encode(bytes))
}

/// What an extension's own `package.json` contributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionMetadata {
    pub display_name: Option<String>,
    pub icon: Option<String>,
    pub preview: bool,
}

fn read_json(fs: &dyn FileSystemProvider, path: &Path) -> Option<Value> {
    let text = fs.read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Localized display name for a `%token%` placeholder
fn localized_name(fs: &dyn FileSystemProvider, install_dir: &Path, raw: &str) -> Option<String> {
    let token = nls_token(raw)?;
    let table = read_json(fs, &install_dir.join(NLS_FILE))?;
    non_empty_str(table.get(token))
}

fn icon_data_url(fs: &dyn FileSystemProvider, install_dir: &Path, icon: &str) -> Option<String> {
    let path = install_dir.join(icon);
    match fs.read_bytes(&path) {
        Ok(bytes) => Some(data_url(&path, &bytes)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "icon unreadable");
            None
        }
    }
}

/// Read display metadata from `<install_dir>/package.json`. Missing or
/// malformed files produce empty metadata.
pub fn read_extension_metadata(
    fs: &dyn FileSystemProvider,
    install_dir: &Path,
) -> ExtensionMetadata {
    let Some(manifest) = read_json(fs, &install_dir.join("package.json")) else {
        return ExtensionMetadata::default();
    };

    let raw_name = non_empty_str(manifest.get("displayName"));
    let display_name = Fallback::new()
        .then(|| {
            raw_name
                .as_deref()
                .and_then(|raw| localized_name(fs, install_dir, raw))
        })
        .then(|| raw_name.clone())
        .resolve();

    let icon = manifest
        .get("icon")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .and_then(|icon| icon_data_url(fs, install_dir, icon));

    ExtensionMetadata {
        display_name,
        icon,
        preview: manifest
            .get("preview")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    include!("resolve.test.rs");
}
