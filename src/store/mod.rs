//! Filesystem-backed image store.
//!
//! The filesystem is the data store: a root folder contains batch
//! subfolders, each holding PNG files named by an opaque identifier.
//!
//! ```text
//! all items/
//! ├── batch-1/
//! │   ├── 4f3a9c.png
//! │   └── 77b012.png
//! ├── batch-2/
//! │   └── 81ffe0.png
//! └── ...
//! ```
//!
//! The store never creates, mutates, or deletes filesystem entries. Every
//! request re-scans the tree; there is no caching.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::LookupError;

/// The fixed set of batch folders inspected by [`ImageStore::list_images`].
///
/// Lookup via [`ImageStore::find_image`] is NOT restricted to this set; it
/// scans every subdirectory of the root. The asymmetry is intentional.
pub const BATCH_NAMES: [&str; 6] = [
    "batch-1", "batch-2", "batch-3", "batch-4", "batch-5", "batch-6",
];

/// Read-only view of the on-disk image tree.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at the given folder.
    ///
    /// The folder is not required to exist yet; existence is re-checked on
    /// every request.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured root folder path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Verify the root folder exists as a directory.
    pub async fn check_root(&self) -> Result<(), LookupError> {
        let is_dir = match tokio::fs::metadata(&self.root).await {
            Ok(meta) => meta.is_dir(),
            Err(_) => false,
        };

        if is_dir {
            debug!(root = %self.root.display(), "root folder check passed");
            Ok(())
        } else {
            Err(LookupError::RootFolderMissing {
                root: self.root.display().to_string(),
            })
        }
    }

    /// Find the image `<root>/<batch>/<id>.png` by scanning every batch
    /// subfolder of the root.
    ///
    /// The first existing candidate wins, in directory-enumeration order
    /// (OS dependent). If the same identifier exists in multiple batches,
    /// which file is returned is unspecified.
    ///
    /// Identifiers containing path separators or `..` components are
    /// rejected as not found before any filesystem access, so an `id`
    /// cannot address files outside the root.
    pub async fn find_image(&self, id: &str) -> Result<PathBuf, LookupError> {
        if !is_safe_id(id) {
            warn!(id, "rejected path-like identifier");
            return Err(LookupError::NotFound);
        }

        self.check_root().await?;

        let file_name = format!("{id}.png");

        for batch in self.batch_dirs().await? {
            debug!(batch = %batch.display(), "scanning batch folder");

            let candidate = batch.join(&file_name);
            if is_file(&candidate).await {
                info!(id, path = %candidate.display(), "image found");
                return Ok(candidate);
            }
            debug!(candidate = %candidate.display(), "no match");
        }

        info!(id, "image not found in any batch folder");
        Err(LookupError::NotFound)
    }

    /// List PNG filenames for the fixed set of batch folders.
    ///
    /// The result always contains exactly the six [`BATCH_NAMES`] keys, in
    /// order. A batch maps to the empty list when its folder is absent or
    /// holds no PNG files. The suffix match is case-insensitive, so
    /// `FOO.PNG` is listed even though [`ImageStore::find_image`] would not
    /// resolve `id=FOO`.
    ///
    /// Folders outside the fixed set are never inspected, even if present
    /// under the root.
    pub async fn list_images(&self) -> Result<BTreeMap<String, Vec<String>>, LookupError> {
        self.check_root().await?;

        let mut images = BTreeMap::new();
        for batch in BATCH_NAMES {
            let dir = self.root.join(batch);
            let names = if is_dir(&dir).await {
                let names = png_names_in(&dir).await?;
                debug!(batch, count = names.len(), "listed batch folder");
                names
            } else {
                warn!(batch, "batch folder missing, returning empty list");
                Vec::new()
            };
            images.insert(batch.to_string(), names);
        }

        Ok(images)
    }

    /// Enumerate the immediate subdirectories of the root, in
    /// directory-enumeration order.
    async fn batch_dirs(&self) -> Result<Vec<PathBuf>, LookupError> {
        let mut dirs = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }
}

/// Whether an identifier is free of path traversal sequences.
///
/// Rejects separators outright (also `\` so Windows-style input cannot slip
/// through on Unix hosts) and any `..` component.
fn is_safe_id(id: &str) -> bool {
    if id.contains('/') || id.contains('\\') {
        return false;
    }
    Path::new(id)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

/// List filenames in a directory whose name has a case-insensitive `.png`
/// suffix, in directory-enumeration order.
async fn png_names_in(dir: &Path) -> Result<Vec<String>, LookupError> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue; // skip non-UTF-8 names
        };
        if name.to_lowercase().ends_with(".png") && entry.file_type().await?.is_file() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
