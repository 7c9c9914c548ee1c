//! Startup bulk load from delimited seed files.
//!
//! One file per table (`<table>.csv` under the seed directory),
//! headerless, comma-delimited. Rows go through the same positional
//! validation as API input; invalid rows are logged and skipped, and the
//! accepted rows of each file are committed as one atomic batch. A
//! missing file is logged and tolerated so a partial seed directory
//! still boots.

use std::path::Path;

use crate::observability::Logger;
use crate::schema::{validator, Table};
use crate::store::RowStore;

use super::errors::LoaderError;

/// Per-table summary of a seed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLoadReport {
    pub table: &'static str,
    pub loaded: usize,
    pub skipped: usize,
}

/// Loads every table's seed file from `dir`. Returns one report per file
/// found.
pub fn load_seed_dir(store: &RowStore, dir: &Path) -> Result<Vec<TableLoadReport>, LoaderError> {
    let mut reports = Vec::new();
    for table in Table::ALL {
        let path = dir.join(format!("{}.csv", table.name()));
        if !path.exists() {
            Logger::warn(
                "seed_file_missing",
                &[("table", table.name()), ("path", &path.display().to_string())],
            );
            continue;
        }
        reports.push(load_seed_file(store, table, &path)?);
    }
    Ok(reports)
}

/// Loads one table's seed file, committing accepted rows as one batch.
pub fn load_seed_file(
    store: &RowStore,
    table: Table,
    path: &Path,
) -> Result<TableLoadReport, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoaderError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

    let schema = table.schema();
    let mut accepted = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| LoaderError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();

        match validator::validate_positional(schema, &fields) {
            Ok(row) => accepted.push(row),
            Err(reasons) => {
                skipped += 1;
                Logger::warn(
                    "seed_row_skipped",
                    &[
                        ("table", table.name()),
                        ("row", &fields.join(",")),
                        ("reasons", &reasons.join("; ")),
                    ],
                );
            }
        }
    }

    let loaded = store
        .insert_batch(table, accepted)
        .map_err(|e| LoaderError::Store {
            table: table.name(),
            source: e,
        })?;

    Logger::info(
        "seed_file_loaded",
        &[
            ("table", table.name()),
            ("loaded", &loaded.to_string()),
            ("skipped", &skipped.to_string()),
        ],
    );

    Ok(TableLoadReport {
        table: table.name(),
        loaded,
        skipped,
    })
}
