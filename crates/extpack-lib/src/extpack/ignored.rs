//! Per-user set of extension identifiers hidden from pack membership

use super::manifest::dedup_ids;
use crate::application::session::{FileSystemProvider, Session};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub const IGNORED_FILE: &str = "ignored-extensions.json";

/// Serializes every read-modify-write of the ignored document
static IGNORED_LOCK: Mutex<()> = Mutex::new(());

#[derive(Debug, Error)]
pub enum IgnoredError {
    #[error("Ignored extensions file {} is corrupt: {source}", path.display())]
    Corrupt {
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

    #[error("Failed to serialize ignored extensions: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

/// On-disk document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredExtensionsRecord {
    #[serde(default, alias = "identifiers")]
    pub ignored_extensions: Vec<String>,

    /// RFC 3339 timestamp of the last write
    #[serde(default)]
    pub last_updated: String,
}

pub struct IgnoredStore<'a> {
    fs: &'a dyn FileSystemProvider,
    path: PathBuf,
}

impl<'a> IgnoredStore<'a> {
    /// Store over `<data_dir>/ignored-extensions.json`
    pub fn new(fs: &'a dyn FileSystemProvider, data_dir: &Path) -> Self {
        Self {
            fs,
            path: data_dir.join(IGNORED_FILE),
        }
    }

    pub fn from_session(session: &'a dyn Session) -> Self {
        Self::new(
            session.filesystem(),
            &session.config().app_config().data_root(),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock() -> MutexGuard<'static, ()> {
        IGNORED_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_record(&self) -> Result<IgnoredExtensionsRecord, IgnoredError> {
        if !self.fs.exists(&self.path) {
            return Ok(IgnoredExtensionsRecord::default());
        }

        let text = self
            .fs
            .read_to_string(&self.path)
            .map_err(|source| IgnoredError::Io {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_str(&text).map_err(|source| IgnoredError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, ids: Vec<String>) -> Result<(), IgnoredError> {
        let io_error = |source| IgnoredError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent).map_err(io_error)?;
        }

        let record = IgnoredExtensionsRecord {
            ignored_extensions: dedup_ids(ids),
            last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let mut text = serde_json::to_string_pretty(&record)?;
        text.push('\n');
        self.fs.write_file(&self.path, &text).map_err(io_error)?;

        tracing::debug!(
            path = %self.path.display(),
            count = record.ignored_extensions.len(),
            "wrote ignored extensions"
        );
        Ok(())
    }

    /// Ignored identifiers in insertion order. A missing file is empty.
    pub fn list(&self) -> Result<Vec<String>, IgnoredError> {
        let _guard = Self::lock();
        Ok(dedup_ids(self.read_record()?.ignored_extensions))
    }

    pub fn contains(&self, id: &str) -> Result<bool, IgnoredError> {
        let _guard = Self::lock();
        Ok(self
            .read_record()?
            .ignored_extensions
            .iter()
            .any(|ignored| ignored == id))
    }

    /// Returns whether the set changed
    pub fn add(&self, id: &str) -> Result<bool, IgnoredError> {
        let _guard = Self::lock();
        let mut ids = self.read_record()?.ignored_extensions;
        if ids.iter().any(|ignored| ignored == id) {
            return Ok(false);
        }
        ids.push(id.to_string());
        self.write(ids)?;
        Ok(true)
    }

    /// Returns whether the set changed; an absent id skips the write
    pub fn remove(&self, id: &str) -> Result<bool, IgnoredError> {
        let _guard = Self::lock();
        let mut ids = self.read_record()?.ignored_extensions;
        let before = ids.len();
        ids.retain(|ignored| ignored != id);
        if ids.len() == before {
            return Ok(false);
        }
        self.write(ids)?;
        Ok(true)
    }

    /// Flip membership; returns the new state
    pub fn toggle(&self, id: &str) -> Result<bool, IgnoredError> {
        let _guard = Self::lock();
        let mut ids = self.read_record()?.ignored_extensions;
        let now_ignored = if ids.iter().any(|ignored| ignored == id) {
            ids.retain(|ignored| ignored != id);
            false
        } else {
            ids.push(id.to_string());
            true
        };
        self.write(ids)?;
        Ok(now_ignored)
    }

    pub fn clear(&self) -> Result<(), IgnoredError> {
        let _guard = Self::lock();
        self.write(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    include!("ignored.test.rs");
}
