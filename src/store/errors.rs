//! Row store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the row store primitives.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// A batch carried an id that already exists, or that repeats within
    /// the batch. The whole batch is refused.
    #[error("duplicate id {id} in table {table}")]
    DuplicateKey { table: &'static str, id: f64 },

    /// A row's shape does not match the table schema. Validated rows
    /// never trigger this.
    #[error("malformed row for table {table}: {detail}")]
    MalformedRow {
        table: &'static str,
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_message() {
        let err = StoreError::DuplicateKey {
            table: "jobs",
            id: 7.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("jobs"));
        assert!(msg.contains('7'));
    }
}
