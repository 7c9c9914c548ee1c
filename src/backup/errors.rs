//! Backup error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::EncodeError;

/// Result type for backup operations.
pub type BackupResult<T> = Result<T, BackupError>;

/// Errors creating or reading backup artifacts.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Label contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid backup label '{0}'")]
    InvalidLabel(String),

    /// No artifact exists for the (table, label) pair.
    #[error("no backup artifact at {path}")]
    NotFound { path: PathBuf },

    /// Filesystem failure while writing or reading an artifact.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot encoding failure.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] EncodeError),
}
