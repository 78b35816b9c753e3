//! Whole-catalog persistence to a single JSON file.
//!
//! The file holds a versioned envelope around the ordered item list. Writes go
//! to a temporary file next to the destination and are renamed into place, so
//! a failed save never leaves a half-written catalog behind.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::Item;

/// Current catalog file format version
pub const FORMAT_VERSION: u32 = 1;

/// Errors that can occur reading or writing a catalog file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Catalog file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt catalog file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported catalog format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Serialized catalog file
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile<I> {
    /// Format version
    version: u32,

    /// When the file was written
    saved_at: DateTime<Utc>,

    /// Items in catalog order
    items: I,
}

/// Header read ahead of the items so a newer format is reported as such
/// rather than as a parse failure
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Write the items to `path`, replacing any existing file atomically
pub fn write_catalog(path: &Path, items: &[Item]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let file = CatalogFile {
        version: FORMAT_VERSION,
        saved_at: Utc::now(),
        items,
    };
    let content = serde_json::to_string_pretty(&file).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;

    info!(path = %path.display(), items = items.len(), "Catalog saved");
    Ok(())
}

/// Read every item from `path`.
///
/// The whole file is parsed and validated before anything is returned.
pub fn read_catalog(path: &Path) -> Result<Vec<Item>, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let corrupt = |source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    };

    let probe: VersionProbe = serde_json::from_str(&content).map_err(corrupt)?;
    if probe.version != FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: probe.version,
            expected: FORMAT_VERSION,
        });
    }

    let file: CatalogFile<Vec<Item>> = serde_json::from_str(&content).map_err(corrupt)?;
    debug!(saved_at = %file.saved_at, "Parsed catalog file");

    info!(path = %path.display(), items = file.items.len(), "Catalog loaded");
    Ok(file.items)
}
