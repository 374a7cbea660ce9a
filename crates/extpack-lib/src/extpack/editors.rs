//! Installed editor extension scanning
//!
//! Every known editor keeps its extensions under `~/.<scheme>/extensions`
//! with an `extensions.json` registry. Entries are decoded one at a time:
//! an entry without an id is skipped, a wrongly typed field only drops that
//! field, and a missing registry means nothing is installed.

use super::resolve::read_extension_metadata;
use crate::application::session::{FileSystemProvider, Session};
use crate::primitives::{EditorVariant, KNOWN_EDITORS, LogContext};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Registry file inside each extensions root
pub const REGISTRY_FILE: &str = "extensions.json";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Unknown editor '{key}'. Known editors: {known}")]
    UnknownEditor { key: String, known: String },

    #[error("Unreadable extension registry {}: {source}", path.display())]
    Registry {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One installed extension, normalized across editors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledExtension {
    pub id: String,
    pub name: String,
    pub version: String,
    pub pre_release: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub updated: bool,
    pub fs_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_display_name: Option<String>,
    pub preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_timestamp: Option<i64>,
}

/// An editor whose registry could not be read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorFailure {
    pub editor: String,
    pub reason: String,
}

/// Installed extensions per editor display name; editors with nothing
/// installed are omitted
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditorScan {
    pub editors: BTreeMap<String, Vec<InstalledExtension>>,
    pub failures: Vec<EditorFailure>,
}

impl EditorScan {
    pub fn total(&self) -> usize {
        self.editors.values().map(Vec::len).sum()
    }
}

/// One `extensions.json` entry. Only `identifier.id` is required; every
/// other field that fails to decode reads as absent.
#[derive(Debug, Deserialize)]
struct RegistryEntry {
    identifier: RegistryIdentifier,
    #[serde(default, deserialize_with = "lenient")]
    version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    location: Option<RegistryLocation>,
    #[serde(default, deserialize_with = "lenient")]
    metadata: Option<RegistryMetadata>,
}

#[derive(Debug, Deserialize)]
struct RegistryIdentifier {
    id: String,
}

/// Either a path relative to the extensions root or a URI descriptor
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegistryLocation {
    Relative(String),
    Uri(LocationDescriptor),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationDescriptor {
    #[serde(default, deserialize_with = "lenient")]
    fs_path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryMetadata {
    #[serde(default, deserialize_with = "lenient")]
    publisher_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    publisher_display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    updated: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pre_release: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    installed_timestamp: Option<i64>,
}

/// Decode a field on its own; a wrongly typed value becomes `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

impl RegistryEntry {
    fn install_dir(&self, extensions_root: &Path) -> PathBuf {
        let located = match &self.location {
            Some(RegistryLocation::Relative(path)) if !path.is_empty() => {
                Some(extensions_root.join(path))
            }
            Some(RegistryLocation::Uri(descriptor)) => descriptor
                .fs_path
                .as_deref()
                .or(descriptor.path.as_deref())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            _ => None,
        };

        located.unwrap_or_else(|| {
            extensions_root.join(format!(
                "{}-{}",
                self.identifier.id,
                self.version.as_deref().unwrap_or_default()
            ))
        })
    }

    fn into_installed(self, fs: &dyn FileSystemProvider, extensions_root: &Path) -> InstalledExtension {
        let install_dir = self.install_dir(extensions_root);
        let meta = read_extension_metadata(fs, &install_dir);
        let metadata = self.metadata.unwrap_or_default();

        InstalledExtension {
            name: meta.display_name.unwrap_or_else(|| self.identifier.id.clone()),
            id: self.identifier.id,
            version: self.version.unwrap_or_default(),
            pre_release: metadata.pre_release.unwrap_or(false),
            icon: meta.icon,
            updated: metadata.updated.unwrap_or(false),
            fs_path: install_dir,
            publisher_id: metadata.publisher_id,
            publisher_display_name: metadata.publisher_display_name,
            preview: meta.preview,
            installed_timestamp: metadata.installed_timestamp,
        }
    }
}

pub struct EditorScanner<'a> {
    fs: &'a dyn FileSystemProvider,
    home: PathBuf,
}

impl<'a> EditorScanner<'a> {
    pub fn new(fs: &'a dyn FileSystemProvider, home: PathBuf) -> Self {
        Self { fs, home }
    }

    /// Scanner over the session's configured editor home
    pub fn from_session(session: &'a dyn Session) -> Self {
        Self::new(
            session.filesystem(),
            session.config().app_config().editor_home_dir(),
        )
    }

    pub fn extensions_root(&self, variant: &EditorVariant) -> PathBuf {
        self.home.join(variant.home_folder()).join("extensions")
    }

    /// Installed extensions for one editor, by scheme or display name
    pub fn list_for_editor(&self, key: &str) -> Result<Vec<InstalledExtension>, ScanError> {
        let variant = EditorVariant::find(key).ok_or_else(|| ScanError::UnknownEditor {
            key: key.to_string(),
            known: KNOWN_EDITORS
                .iter()
                .map(|v| v.scheme)
                .collect::<Vec<_>>()
                .join(", "),
        })?;
        self.list_variant(&variant)
    }

    pub fn list_primary(&self) -> Result<Vec<InstalledExtension>, ScanError> {
        self.list_variant(&EditorVariant::primary())
    }

    /// Every known editor; one unreadable registry does not stop the rest
    pub fn list_all(&self) -> EditorScan {
        let mut scan = EditorScan::default();
        for variant in KNOWN_EDITORS.iter() {
            match self.list_variant(variant) {
                Ok(extensions) if extensions.is_empty() => {}
                Ok(extensions) => {
                    scan.editors
                        .insert(variant.display_name.to_string(), extensions);
                }
                Err(e) => {
                    crate::log_warn!(format!("Skipping {}: {}", variant.display_name, e));
                    scan.failures.push(EditorFailure {
                        editor: variant.display_name.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        scan
    }

    pub fn list_variant(&self, variant: &EditorVariant) -> Result<Vec<InstalledExtension>, ScanError> {
        let root = self.extensions_root(variant);
        let registry = root.join(REGISTRY_FILE);
        if !self.fs.exists(&registry) {
            tracing::debug!(editor = variant.scheme, path = %registry.display(), "no registry");
            return Ok(Vec::new());
        }

        let text = self
            .fs
            .read_to_string(&registry)
            .map_err(|source| ScanError::Io {
                path: registry.clone(),
                source,
            })?;
        let entries: Option<Vec<Value>> =
            serde_json::from_str(&text).map_err(|source| ScanError::Registry {
                path: registry.clone(),
                source,
            })?;
        let entries = entries.unwrap_or_default();

        let mut ctx = LogContext::with_progress(variant.scheme, entries.len() as u64);
        let mut extensions = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            ctx.set_progress(index as u64 + 1);
            match serde_json::from_value::<RegistryEntry>(entry) {
                Ok(entry) => extensions.push(entry.into_installed(self.fs, &root)),
                Err(e) => {
                    crate::log_warn!(format!("Skipping registry entry without an id: {}", e), &ctx);
                }
            }
        }

        tracing::debug!(editor = variant.scheme, count = extensions.len(), "scanned registry");
        Ok(extensions)
    }
}

#[cfg(test)]
mod tests {
    include!("editors.test.rs");
}
