//! In-memory row store.
//!
//! The store is the single owner of persisted rows. It exposes exactly the
//! primitives the rest of the system needs: atomic multi-row insert, clear,
//! atomic full replacement, and select. Each table sits behind its own
//! `RwLock`; every mutating primitive holds the write lock for its whole
//! scope, so readers never observe mixed old/new state.
//!
//! The store is handed around as an explicitly constructed `Arc<RowStore>`;
//! there is no process-wide singleton.

mod errors;

pub use errors::{StoreError, StoreResult};

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::model::Row;
use crate::schema::Table;

#[derive(Default)]
struct TableState {
    rows: Vec<Row>,
    /// Bit patterns of the primary key column, for uniqueness checks.
    keys: HashSet<u64>,
}

impl TableState {
    /// Stages rows into a fresh state, enforcing key uniqueness. Used by
    /// both batch insert (starting from the live keys) and replacement
    /// (starting from empty).
    fn stage(table: Table, rows: Vec<Row>, mut keys: HashSet<u64>) -> StoreResult<(Vec<Row>, HashSet<u64>)> {
        let schema_len = table.schema().len();
        for row in &rows {
            if row.len() != schema_len {
                return Err(StoreError::MalformedRow {
                    table: table.name(),
                    detail: format!("expected {} fields, got {}", schema_len, row.len()),
                });
            }
            let key = row.key_bits().ok_or_else(|| StoreError::MalformedRow {
                table: table.name(),
                detail: "leading field is not an identifier".to_string(),
            })?;
            if !keys.insert(key) {
                return Err(StoreError::DuplicateKey {
                    table: table.name(),
                    id: f64::from_bits(key),
                });
            }
        }
        Ok((rows, keys))
    }
}

/// Shared row store covering the three registry tables.
pub struct RowStore {
    tables: HashMap<Table, RwLock<TableState>>,
}

impl RowStore {
    /// Creates an empty store with one (empty) table per registry entry.
    pub fn new() -> Self {
        let tables = Table::ALL
            .into_iter()
            .map(|t| (t, RwLock::new(TableState::default())))
            .collect();
        Self { tables }
    }

    fn table(&self, table: Table) -> &RwLock<TableState> {
        // Every Table variant is inserted at construction.
        self.tables
            .get(&table)
            .unwrap_or_else(|| unreachable!("table {} missing from store", table.name()))
    }

    /// Inserts a batch of rows atomically: either every row lands or none
    /// do. Duplicate ids (against live rows or within the batch) refuse
    /// the whole batch.
    pub fn insert_batch(&self, table: Table, rows: Vec<Row>) -> StoreResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        let mut state = self.table(table).write().expect("table lock poisoned");
        let (staged, keys) = TableState::stage(table, rows, state.keys.clone())?;
        let inserted = staged.len();
        state.rows.extend(staged);
        state.keys = keys;
        Ok(inserted)
    }

    /// Removes every row of the table, returning how many were removed.
    pub fn clear(&self, table: Table) -> StoreResult<usize> {
        let mut state = self.table(table).write().expect("table lock poisoned");
        let removed = state.rows.len();
        state.rows.clear();
        state.keys.clear();
        Ok(removed)
    }

    /// Replaces the table's contents with the given rows in one step.
    ///
    /// The new contents are staged off to the side first; the live state
    /// is swapped only after staging has fully succeeded. A staging
    /// failure leaves the previous contents untouched.
    pub fn replace_all(&self, table: Table, rows: Vec<Row>) -> StoreResult<usize> {
        let (staged, keys) = TableState::stage(table, rows, HashSet::new())?;
        let inserted = staged.len();
        let mut state = self.table(table).write().expect("table lock poisoned");
        *state = TableState { rows: staged, keys };
        Ok(inserted)
    }

    /// Snapshot read of all rows, in insertion order.
    pub fn select_all(&self, table: Table) -> Vec<Row> {
        self.table(table)
            .read()
            .expect("table lock poisoned")
            .rows
            .clone()
    }

    /// Current row count.
    pub fn count(&self, table: Table) -> usize {
        self.table(table)
            .read()
            .expect("table lock poisoned")
            .rows
            .len()
    }
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new()
    }
}
