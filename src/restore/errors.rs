//! Restore error types.
//!
//! Every failure mode of the restore state machine has its own variant so
//! callers can tell a missing artifact from a schema mismatch from a
//! failed load. None of these abort the process.

use thiserror::Error;

use crate::backup::BackupError;
use crate::snapshot::DecodeError;

/// Result type for restore operations.
pub type RestoreResult<T> = Result<T, RestoreError>;

/// Errors surfaced by the restore coordinator.
#[derive(Debug, Error)]
pub enum RestoreError {
    /// No artifact for the requested (table, label) pair.
    #[error("no backup named '{label}' for table {table}")]
    ArtifactNotFound { table: &'static str, label: String },

    /// Artifact exists but could not be read from disk.
    #[error(transparent)]
    Artifact(BackupError),

    /// Artifact bytes are unreadable or corrupt.
    #[error("failed to decode backup artifact: {0}")]
    Decode(#[from] DecodeError),

    /// The snapshot's embedded schema disagrees with the live table.
    #[error("schema mismatch: backup has fields [{}], table {} has [{}]",
        .found.join(", "), .table, .expected.join(", "))]
    SchemaMismatch {
        table: &'static str,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The clear phase failed; the table's prior contents are intact.
    #[error("failed to clear table {table}: {detail}")]
    ClearFailed {
        table: &'static str,
        detail: String,
    },

    /// The load phase failed; the table's prior contents are intact
    /// (rows are staged aside and swapped in only on full success).
    #[error("failed to load backup rows into table {table}: {detail}")]
    LoadFailed {
        table: &'static str,
        detail: String,
    },
}
