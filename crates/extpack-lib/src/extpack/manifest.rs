//! Pack manifest (`package.json`) model
//!
//! `PackManifest` mirrors the file and keeps unknown keys along with the
//! order keys had on disk; `ExtensionPack` is the resolved view with
//! folder-name fallbacks applied.

use super::packs::PackError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Manifest file inside every pack folder
pub const MANIFEST_FILE: &str = "package.json";

/// Human-readable description written next to the manifest on create
pub const README_FILE: &str = "README.md";

pub const NEW_PACK_VERSION: &str = "0.0.1";
pub const MISSING_VERSION: &str = "0.0.0";
pub const PACK_CATEGORY: &str = "Extension Packs";
pub const ENGINE_NAME: &str = "vscode";
pub const ENGINE_CONSTRAINT: &str = "^1.102.0";

/// On-disk manifest. Only `extensionPack` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engines: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    pub extension_pack: Vec<String>,

    /// Keys this tool does not manage (publisher, repository, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Top-level keys in file order; rewrites keep it
    #[serde(skip)]
    key_order: Vec<String>,
}

/// A pack as presented to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionPack {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub version: String,
    pub extension_pack: Vec<String>,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engines: Option<BTreeMap<String, String>>,
    pub folder_path: PathBuf,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Drop repeated identifiers, keeping the first occurrence
pub fn dedup_ids<I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

impl PackManifest {
    /// Manifest for a freshly created pack
    pub fn new_pack(
        name: &str,
        display_name: &str,
        description: &str,
        extension_ids: Vec<String>,
    ) -> Self {
        Self {
            name: Some(name.to_string()),
            display_name: Some(display_name.to_string()),
            description: Some(description.to_string()),
            version: Some(NEW_PACK_VERSION.to_string()),
            engines: Some(Map::from_iter([(
                ENGINE_NAME.to_string(),
                Value::from(ENGINE_CONSTRAINT),
            )])),
            categories: Some(vec![PACK_CATEGORY.to_string()]),
            extension_pack: dedup_ids(extension_ids),
            extra: Map::new(),
            key_order: Vec::new(),
        }
    }

    /// Parse manifest text. Malformed JSON is a `Parse` error; well-formed
    /// JSON that is not a pack manifest is a `Validation` error.
    pub fn parse(text: &str, path: &Path) -> Result<Self, PackError> {
        let value: Value = serde_json::from_str(text).map_err(|source| PackError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let invalid = |reason: String| PackError::Validation {
            path: path.to_path_buf(),
            reason,
        };

        let object = value
            .as_object()
            .ok_or_else(|| invalid("manifest is not a JSON object".to_string()))?;
        match object.get("extensionPack") {
            Some(Value::Array(_)) => {}
            Some(_) => return Err(invalid("extensionPack must be a list".to_string())),
            None => return Err(invalid("missing extensionPack".to_string())),
        }

        let key_order = object.keys().cloned().collect();

        let mut manifest: Self = serde_json::from_value(value)
            .map_err(|e| invalid(format!("invalid manifest field: {e}")))?;
        manifest.key_order = key_order;
        Ok(manifest)
    }

    /// Two-space pretty JSON with a trailing newline. Keys read from disk
    /// keep their position; new keys follow in field order.
    pub fn to_json(&self, path: &Path) -> Result<String, PackError> {
        let as_parse_error = |source| PackError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let mut fields = match serde_json::to_value(self).map_err(as_parse_error)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let mut ordered = Map::with_capacity(fields.len());
        for key in &self.key_order {
            if let Some(value) = fields.shift_remove(key) {
                ordered.insert(key.clone(), value);
            }
        }
        ordered.extend(fields);

        let mut text =
            serde_json::to_string_pretty(&Value::Object(ordered)).map_err(as_parse_error)?;
        text.push('\n');
        Ok(text)
    }

    /// Apply fallbacks: missing names come from the folder name
    pub fn resolve(&self, folder: &Path) -> ExtensionPack {
        let dir_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let name = non_empty(&self.name).unwrap_or(&dir_name).to_string();
        let display_name = non_empty(&self.display_name)
            .or_else(|| non_empty(&self.name))
            .unwrap_or(&dir_name)
            .to_string();

        ExtensionPack {
            name,
            display_name,
            description: self.description.clone().unwrap_or_default(),
            version: non_empty(&self.version)
                .unwrap_or(MISSING_VERSION)
                .to_string(),
            extension_pack: self.extension_pack.clone(),
            categories: self.categories.clone().unwrap_or_default(),
            engines: self.engines.as_ref().map(|engines| {
                engines
                    .iter()
                    .filter_map(|(name, range)| Some((name.clone(), range.as_str()?.to_string())))
                    .collect()
            }),
            folder_path: folder.to_path_buf(),
        }
    }
}

impl ExtensionPack {
    pub fn manifest_path(&self) -> PathBuf {
        self.folder_path.join(MANIFEST_FILE)
    }

    pub fn contains(&self, extension_id: &str) -> bool {
        self.extension_pack.iter().any(|id| id == extension_id)
    }
}

#[cfg(test)]
mod tests {
    include!("manifest.test.rs");
}
