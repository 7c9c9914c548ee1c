//! Ingestion error types.
//!
//! Per-row validation failures are not errors: they are collected into
//! the rejection map of a successful report. These variants abort the
//! whole call.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Result type for batch ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors aborting an ingestion call.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Request exceeded the batch size limit. Raised before any row is
    /// validated.
    #[error("batch exceeds the maximum of {limit} rows (got {got})")]
    SizeLimit { limit: usize, got: usize },

    /// Every row in the batch failed validation. Carries the rejection
    /// map so the caller can still report per-row reasons.
    #[error("all rows skipped")]
    AllRejected {
        skipped: BTreeMap<String, Vec<String>>,
    },

    /// The row store refused the accepted rows (e.g. a duplicate primary
    /// key). Nothing was written.
    #[error("write conflict: {0}")]
    WriteConflict(StoreError),
}

/// Errors aborting the startup seed load.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Seed file could not be opened or parsed at the CSV layer.
    #[error("failed to read seed file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Accepted rows were refused by the store.
    #[error("failed to commit seed rows for table {table}: {source}")]
    Store {
        table: &'static str,
        #[source]
        source: StoreError,
    },
}
