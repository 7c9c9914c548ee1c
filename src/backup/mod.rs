//! Backup artifact storage.
//!
//! An artifact is a snapshot blob written to a deterministic location
//! under the backup root: `{table}_{label}_backup`. That string key is
//! the sole identity of a snapshot; writing the same (table, label) pair
//! again silently overwrites the previous artifact.
//!
//! Backup is read-only against the row store: it selects the table's
//! rows, encodes them under the live schema descriptor, and writes the
//! blob with an fsync before reporting the location.

mod errors;

pub use errors::{BackupError, BackupResult};

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::schema::Table;
use crate::snapshot;
use crate::store::RowStore;

/// Backup labels are path-safe by construction.
fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("label pattern"))
}

/// Returns whether a label is acceptable in an artifact name.
pub fn valid_label(label: &str) -> bool {
    label_pattern().is_match(label)
}

/// Artifact storage rooted at one directory.
pub struct BackupStore {
    root: PathBuf,
}

impl BackupStore {
    /// Creates a store rooted at `root`. The directory is created lazily
    /// on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The backup root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deterministic artifact location for a (table, label) pair.
    pub fn artifact_path(&self, table: &str, label: &str) -> PathBuf {
        self.root.join(format!("{}_{}_backup", table, label))
    }

    /// Writes an artifact, silently overwriting any previous one with the
    /// same key. The file is fsynced before the location is reported.
    pub fn write_artifact(&self, table: &str, label: &str, bytes: &[u8]) -> BackupResult<PathBuf> {
        if !valid_label(label) {
            return Err(BackupError::InvalidLabel(label.to_string()));
        }

        fs::create_dir_all(&self.root).map_err(|e| BackupError::Io {
            context: format!("failed to create backup root {}", self.root.display()),
            source: e,
        })?;

        let path = self.artifact_path(table, label);
        let mut file = File::create(&path).map_err(|e| BackupError::Io {
            context: format!("failed to create {}", path.display()),
            source: e,
        })?;
        file.write_all(bytes).map_err(|e| BackupError::Io {
            context: format!("failed to write {}", path.display()),
            source: e,
        })?;
        file.sync_all().map_err(|e| BackupError::Io {
            context: format!("failed to fsync {}", path.display()),
            source: e,
        })?;

        Ok(path)
    }

    /// Reads an artifact back. A missing file is `NotFound`; any other
    /// I/O failure is reported as such.
    pub fn read_artifact(&self, table: &str, label: &str) -> BackupResult<Vec<u8>> {
        if !valid_label(label) {
            return Err(BackupError::InvalidLabel(label.to_string()));
        }

        let path = self.artifact_path(table, label);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BackupError::NotFound { path })
            }
            Err(e) => Err(BackupError::Io {
                context: format!("failed to read {}", path.display()),
                source: e,
            }),
        }
    }
}

/// Backs up a table under the given label and returns the artifact
/// location.
pub fn create_backup(
    store: &RowStore,
    backups: &BackupStore,
    table: Table,
    label: &str,
) -> BackupResult<PathBuf> {
    let rows = store.select_all(table);
    let descriptor = table.schema().descriptor();
    let bytes = snapshot::encode(table.name(), &descriptor, &rows)?;
    backups.write_artifact(table.name(), label, &bytes)
}
