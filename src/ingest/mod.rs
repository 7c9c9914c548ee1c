//! Batch ingestion.
//!
//! Rows are validated independently and partitioned into accepted and
//! rejected; accepted rows are written as one atomic multi-row insert.
//! Rejections never fail the call (they come back in the report keyed by
//! the raw row's JSON form), but a batch where nothing validated is its
//! own outcome, and a store refusal (duplicate key) is another.

mod errors;
pub mod loader;

pub use errors::{IngestError, IngestResult, LoaderError};

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::schema::{validator, Table};
use crate::store::RowStore;

/// Default cap on rows per ingestion call.
pub const DEFAULT_BATCH_LIMIT: usize = 1000;

/// Outcome of a (at least partially) successful ingestion call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IngestReport {
    /// Rows written to the store.
    pub accepted: usize,
    /// Rejected rows, keyed by their raw JSON form, with reasons.
    pub skipped: BTreeMap<String, Vec<String>>,
}

/// Validates and persists bounded batches of field-keyed rows.
pub struct BatchIngestor {
    store: Arc<RowStore>,
    limit: usize,
}

impl BatchIngestor {
    pub fn new(store: Arc<RowStore>, limit: usize) -> Self {
        Self { store, limit }
    }

    /// The configured batch size limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Ingests one batch into `table`.
    ///
    /// An empty batch is a no-op report, not an error. A batch over the
    /// size limit is refused before any row is validated.
    pub fn ingest(&self, table: Table, rows: &[Value]) -> IngestResult<IngestReport> {
        if rows.len() > self.limit {
            return Err(IngestError::SizeLimit {
                limit: self.limit,
                got: rows.len(),
            });
        }

        let schema = table.schema();
        let mut accepted = Vec::new();
        let mut skipped = BTreeMap::new();

        for raw in rows {
            let outcome = match raw {
                Value::Object(map) => validator::validate_keyed(schema, map),
                _ => Err(vec!["row is not a field map".to_string()]),
            };
            match outcome {
                Ok(row) => accepted.push(row),
                Err(reasons) => {
                    skipped.insert(raw.to_string(), reasons);
                }
            }
        }

        if accepted.is_empty() && !rows.is_empty() {
            return Err(IngestError::AllRejected { skipped });
        }

        let written = self
            .store
            .insert_batch(table, accepted)
            .map_err(IngestError::WriteConflict)?;

        Ok(IngestReport {
            accepted: written,
            skipped,
        })
    }
}
