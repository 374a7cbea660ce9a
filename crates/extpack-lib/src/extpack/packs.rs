//! Pack directory scanning and manifest mutation
//!
//! `PackScanner` turns the packs root into a sorted list of packs with
//! per-directory failures kept aside. `PackStore` performs field-level
//! create/update/add/remove on one manifest at a time, holding a lock keyed
//! by the manifest path for each read-modify-write.

use super::manifest::{ExtensionPack, MANIFEST_FILE, PackManifest, README_FILE, dedup_ids};
use super::templates::{TemplateEngine, TemplateError};
use crate::application::session::{FileSystemProvider, Session};
use crate::primitives::{LogContext, Mutation};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use thiserror::Error;

/// Errors from pack scanning and manifest mutation
#[derive(Debug, Error)]
pub enum PackError {
    #[error("Extension pack not found: {name}")]
    NotFound { name: String },

    #[error("Packs directory not found: {}", path.display())]
    RootMissing { path: PathBuf },

    #[error("Invalid pack at {}: {reason}", path.display())]
    Validation { path: PathBuf, reason: String },

    #[error("Malformed JSON in {}: {source}", path.display())]
    Parse {
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

    #[error("{} pack directories failed to load: {}", failures.len(), summarize(failures))]
    Aggregate { failures: Vec<ScanFailure> },

    #[error("README generation failed: {source}")]
    Template {
        #[from]
        source: TemplateError,
    },
}

fn summarize(failures: &[ScanFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.path.display(), f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PackError + '_ {
    move |source| PackError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// One pack directory that could not be loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Best-effort scan result
#[derive(Debug, Clone, Default, Serialize)]
pub struct PackScan {
    pub packs: Vec<ExtensionPack>,
    pub failures: Vec<ScanFailure>,
}

impl PackScan {
    /// Strict view: any failed directory fails the whole scan
    pub fn into_result(self) -> Result<Vec<ExtensionPack>, PackError> {
        if self.failures.is_empty() {
            Ok(self.packs)
        } else {
            Err(PackError::Aggregate {
                failures: self.failures,
            })
        }
    }
}

/// Case-insensitive by display name, raw string breaks ties
fn sort_packs(packs: &mut [ExtensionPack]) {
    packs.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
}

/// Per-manifest locks shared by every store in the process
fn manifest_lock(path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    locks.entry(path.to_path_buf()).or_default().clone()
}

/// Read a manifest while holding its lock, so scans never observe a
/// half-written file from a concurrent mutation
fn read_manifest(fs: &dyn FileSystemProvider, path: &Path) -> Result<PackManifest, PackError> {
    let lock = manifest_lock(path);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
    read_manifest_unlocked(fs, path)
}

fn read_manifest_unlocked(
    fs: &dyn FileSystemProvider,
    path: &Path,
) -> Result<PackManifest, PackError> {
    let text = fs.read_to_string(path).map_err(io_error(path))?;
    PackManifest::parse(&text, path)
}

pub struct PackScanner<'a> {
    fs: &'a dyn FileSystemProvider,
    root: PathBuf,
}

impl<'a> PackScanner<'a> {
    pub fn new(fs: &'a dyn FileSystemProvider, root: PathBuf) -> Self {
        Self { fs, root }
    }

    /// Scanner over the session's configured packs root
    pub fn from_session(session: &'a dyn Session) -> Self {
        Self::new(
            session.filesystem(),
            session.config().app_config().packs_root(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every pack directory under the root
    pub fn scan(&self) -> Result<PackScan, PackError> {
        if !self.fs.is_directory(&self.root) {
            return Err(PackError::RootMissing {
                path: self.root.clone(),
            });
        }

        let entries = self.fs.list_dir(&self.root).map_err(io_error(&self.root))?;
        let dirs: Vec<PathBuf> = entries
            .into_iter()
            .filter(|entry| self.fs.is_directory(entry))
            .collect();

        let mut scan = PackScan::default();
        let mut ctx = LogContext::with_progress("scan packs", dirs.len() as u64);
        for (index, dir) in dirs.into_iter().enumerate() {
            ctx.set_progress(index as u64 + 1);
            match self.load_pack(&dir) {
                Ok(pack) => scan.packs.push(pack),
                Err(e) => {
                    crate::log_debug!(format!("skipping {}: {}", dir.display(), e), &ctx);
                    scan.failures.push(ScanFailure {
                        path: dir,
                        reason: e.to_string(),
                    });
                }
            }
        }

        sort_packs(&mut scan.packs);
        tracing::debug!(
            root = %self.root.display(),
            packs = scan.packs.len(),
            failures = scan.failures.len(),
            "scanned packs root"
        );
        Ok(scan)
    }

    /// Load one pack directory
    pub fn load_pack(&self, dir: &Path) -> Result<ExtensionPack, PackError> {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !self.fs.exists(&manifest_path) {
            return Err(PackError::Validation {
                path: dir.to_path_buf(),
                reason: format!("missing manifest {}", MANIFEST_FILE),
            });
        }

        Ok(read_manifest(self.fs, &manifest_path)?.resolve(dir))
    }

    /// Valid packs only; every failed directory is logged as a warning
    pub fn list_packs(&self) -> Result<Vec<ExtensionPack>, PackError> {
        let scan = self.scan()?;
        for failure in &scan.failures {
            crate::log_warn!(format!(
                "Failed to load pack {}: {}",
                failure.path.display(),
                failure.reason
            ));
        }
        Ok(scan.packs)
    }

    /// Resolve a pack by its manifest name
    pub fn find(&self, name: &str) -> Result<ExtensionPack, PackError> {
        let not_found = || PackError::NotFound {
            name: name.to_string(),
        };

        let scan = match self.scan() {
            Ok(scan) => scan,
            Err(PackError::RootMissing { .. }) => return Err(not_found()),
            Err(e) => return Err(e),
        };
        scan.packs
            .into_iter()
            .find(|pack| pack.name == name)
            .ok_or_else(not_found)
    }
}

/// Fields to change; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackUpdate {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub extension_pack: Option<Vec<String>>,
}

impl PackUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.description.is_none() && self.extension_pack.is_none()
    }
}

/// Rejects names that would escape or confuse the packs root
pub fn validate_pack_name(name: &str) -> Result<(), PackError> {
    let reason = if name.trim().is_empty() {
        Some("pack name is empty")
    } else if name == "." || name == ".." {
        Some("pack name cannot be '.' or '..'")
    } else if name.contains(['/', '\\']) {
        Some("pack name cannot contain path separators")
    } else if name.contains('\0') {
        Some("pack name cannot contain NUL")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PackError::Validation {
            path: PathBuf::from(name),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub struct PackStore<'a> {
    fs: &'a dyn FileSystemProvider,
    scanner: PackScanner<'a>,
}

impl<'a> PackStore<'a> {
    pub fn new(fs: &'a dyn FileSystemProvider, root: PathBuf) -> Self {
        Self {
            fs,
            scanner: PackScanner::new(fs, root),
        }
    }

    pub fn from_session(session: &'a dyn Session) -> Self {
        Self::new(
            session.filesystem(),
            session.config().app_config().packs_root(),
        )
    }

    pub fn scanner(&self) -> &PackScanner<'a> {
        &self.scanner
    }

    pub fn get_pack(&self, name: &str) -> Result<ExtensionPack, PackError> {
        self.scanner.find(name)
    }

    /// Create `<root>/<name>/` with a manifest and README. An existing pack
    /// of the same name is overwritten.
    pub fn create_pack(
        &self,
        name: &str,
        display_name: &str,
        description: &str,
        extension_ids: Vec<String>,
    ) -> Result<ExtensionPack, PackError> {
        validate_pack_name(name)?;

        let folder = self.scanner.root().join(name);
        self.fs
            .create_dir_all(&folder)
            .map_err(io_error(&folder))?;

        let manifest_path = folder.join(MANIFEST_FILE);
        let manifest = PackManifest::new_pack(name, display_name, description, extension_ids);
        {
            let lock = manifest_lock(&manifest_path);
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            if self.fs.exists(&manifest_path) {
                crate::log_warn!(format!(
                    "Overwriting existing pack manifest {}",
                    manifest_path.display()
                ));
            }
            self.write_manifest(&manifest_path, &manifest)?;
        }

        let readme = TemplateEngine::new()?.render_readme(
            display_name,
            description,
            &manifest.extension_pack,
        )?;
        let readme_path = folder.join(README_FILE);
        self.fs
            .write_file(&readme_path, &readme)
            .map_err(io_error(&readme_path))?;

        tracing::info!(pack = name, path = %folder.display(), "created pack");
        Ok(manifest.resolve(&folder))
    }

    /// Merge the provided fields into the manifest
    pub fn update_pack(&self, name: &str, update: PackUpdate) -> Result<ExtensionPack, PackError> {
        let pack = self.get_pack(name)?;
        let manifest = self.modify(&pack.folder_path, |manifest| {
            if let Some(display_name) = update.display_name.filter(|d| !d.is_empty()) {
                manifest.display_name = Some(display_name);
            }
            if let Some(description) = update.description {
                manifest.description = Some(description);
            }
            if let Some(ids) = update.extension_pack {
                manifest.extension_pack = ids;
            }
            Mutation::Applied
        })?;

        tracing::info!(pack = name, "updated pack");
        Ok(manifest.resolve(&pack.folder_path))
    }

    /// Append an extension id; already present is a no-op
    pub fn add_extension(&self, name: &str, extension_id: &str) -> Result<Mutation, PackError> {
        let pack = self.get_pack(name)?;
        let mut outcome = Mutation::Unchanged;
        self.modify(&pack.folder_path, |manifest| {
            if !manifest.extension_pack.iter().any(|id| id == extension_id) {
                manifest.extension_pack.push(extension_id.to_string());
                outcome = Mutation::Applied;
            }
            outcome
        })?;

        tracing::debug!(pack = name, id = extension_id, %outcome, "add extension");
        Ok(outcome)
    }

    /// Remove an extension id; absent is a no-op
    pub fn remove_extension(&self, name: &str, extension_id: &str) -> Result<Mutation, PackError> {
        let pack = self.get_pack(name)?;
        let mut outcome = Mutation::Unchanged;
        self.modify(&pack.folder_path, |manifest| {
            let before = manifest.extension_pack.len();
            manifest.extension_pack.retain(|id| id != extension_id);
            if manifest.extension_pack.len() != before {
                outcome = Mutation::Applied;
            }
            outcome
        })?;

        tracing::debug!(pack = name, id = extension_id, %outcome, "remove extension");
        Ok(outcome)
    }

    /// Read-modify-write under the manifest's lock. The file is only
    /// rewritten when `apply` reports a change.
    fn modify<F>(&self, folder: &Path, apply: F) -> Result<PackManifest, PackError>
    where
        F: FnOnce(&mut PackManifest) -> Mutation,
    {
        let path = folder.join(MANIFEST_FILE);
        let lock = manifest_lock(&path);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut manifest = read_manifest_unlocked(self.fs, &path)?;
        if apply(&mut manifest).is_applied() {
            manifest.extension_pack = dedup_ids(std::mem::take(&mut manifest.extension_pack));
            self.write_manifest(&path, &manifest)?;
        }
        Ok(manifest)
    }

    fn write_manifest(&self, path: &Path, manifest: &PackManifest) -> Result<(), PackError> {
        let text = manifest.to_json(path)?;
        self.fs.write_file(path, &text).map_err(io_error(path))
    }
}

#[cfg(test)]
mod tests {
    include!("packs.test.rs");
}
