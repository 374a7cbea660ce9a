//! Extension pack domain
//!
//! Stores and scanners over the on-disk formats: pack manifests under the
//! packs root, editor extension registries under the user's home, and the
//! per-user ignored set. Everything reaches the disk through a
//! `FileSystemProvider` so commands and tests share one code path.

pub mod editors;
pub mod envelope;
pub mod ignored;
pub mod manifest;
pub mod packager;
pub mod packs;
pub mod resolve;
pub mod search;
pub mod templates;

pub use editors::{EditorFailure, EditorScan, EditorScanner, InstalledExtension, ScanError};
pub use envelope::Envelope;
pub use ignored::{IgnoredError, IgnoredExtensionsRecord, IgnoredStore};
pub use manifest::{ExtensionPack, PackManifest};
pub use packager::{BuildOutput, Packager, PackagerError};
pub use packs::{PackError, PackScan, PackScanner, PackStore, PackUpdate, ScanFailure};
pub use search::{fuzzy_score, matches_any};

// Re-export primitives types for convenience
pub use crate::primitives::{EditorVariant, KNOWN_EDITORS, Mutation};
