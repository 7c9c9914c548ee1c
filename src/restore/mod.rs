//! Restore: destructive replacement of a table's contents from a
//! snapshot artifact, gated by schema compatibility.
//!
//! The coordinator walks a fixed sequence per request:
//!
//! 1. Fetch: read the artifact for (table, label).
//! 2. Decode: parse the self-describing snapshot.
//! 3. SchemaCheck: the embedded field-name list must equal the live
//!    table's, order-sensitively; any difference aborts with the table
//!    untouched.
//! 4. Clear + Load: executed as one atomic replacement. The snapshot
//!    rows are staged into a shadow table and swapped in only after the
//!    full load has succeeded, so a failure at any point leaves the
//!    previous contents visible. A restore never applies a subset of
//!    rows.
//!
//! Any failing step maps to its own `RestoreError` variant and aborts
//! the remaining steps.

mod errors;

pub use errors::{RestoreError, RestoreResult};

use crate::backup::{BackupError, BackupStore};
use crate::schema::Table;
use crate::snapshot;
use crate::store::{RowStore, StoreError};

/// Successful restore summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub table: &'static str,
    pub label: String,
    pub rows_restored: usize,
}

/// Coordinates restore requests against the row store and the artifact
/// store.
pub struct RestoreCoordinator<'a> {
    store: &'a RowStore,
    backups: &'a BackupStore,
}

impl<'a> RestoreCoordinator<'a> {
    pub fn new(store: &'a RowStore, backups: &'a BackupStore) -> Self {
        Self { store, backups }
    }

    /// Runs the full restore sequence for one (table, label) pair.
    pub fn restore(&self, table: Table, label: &str) -> RestoreResult<RestoreOutcome> {
        let bytes = self
            .backups
            .read_artifact(table.name(), label)
            .map_err(|e| match e {
                BackupError::NotFound { .. } => RestoreError::ArtifactNotFound {
                    table: table.name(),
                    label: label.to_string(),
                },
                other => RestoreError::Artifact(other),
            })?;

        let snap = snapshot::decode(&bytes)?;

        let expected = table.schema().field_names();
        let found = snap.schema.field_names();
        if snap.table != table.name() || found != expected {
            return Err(RestoreError::SchemaMismatch {
                table: table.name(),
                expected: expected.iter().map(|s| s.to_string()).collect(),
                found: found.iter().map(|s| s.to_string()).collect(),
            });
        }

        let rows_restored = self
            .store
            .replace_all(table, snap.rows)
            .map_err(|e| match e {
                StoreError::DuplicateKey { .. } | StoreError::MalformedRow { .. } => {
                    RestoreError::LoadFailed {
                        table: table.name(),
                        detail: e.to_string(),
                    }
                }
            })?;

        Ok(RestoreOutcome {
            table: table.name(),
            label: label.to_string(),
            rows_restored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::create_backup;
    use crate::model::{Department, FieldValue, Record, Row};
    use crate::schema::{FieldDescriptor, FieldKind, SchemaDescriptor};
    use tempfile::TempDir;

    fn dept(id: f64, name: &str) -> Row {
        Record::Department(Department {
            id,
            name: name.to_string(),
        })
        .into_row()
    }

    fn fixture() -> (TempDir, RowStore, BackupStore) {
        let tmp = TempDir::new().unwrap();
        let backups = BackupStore::new(tmp.path());
        let store = RowStore::new();
        store
            .insert_batch(Table::Departments, vec![dept(1.0, "HR"), dept(2.0, "Eng")])
            .unwrap();
        (tmp, store, backups)
    }

    #[test]
    fn test_backup_then_restore_roundtrip() {
        let (_tmp, store, backups) = fixture();
        create_backup(&store, &backups, Table::Departments, "d1").unwrap();

        store.clear(Table::Departments).unwrap();
        assert_eq!(store.count(Table::Departments), 0);

        let outcome = RestoreCoordinator::new(&store, &backups)
            .restore(Table::Departments, "d1")
            .unwrap();

        assert_eq!(outcome.table, "departments");
        assert_eq!(outcome.label, "d1");
        assert_eq!(outcome.rows_restored, 2);

        let mut names: Vec<String> = store
            .select_all(Table::Departments)
            .iter()
            .filter_map(|r| r.0[1].as_text().map(str::to_string))
            .collect();
        names.sort();
        assert_eq!(names, vec!["Eng", "HR"]);
    }

    #[test]
    fn test_restore_replaces_existing_rows_exactly() {
        let (_tmp, store, backups) = fixture();
        create_backup(&store, &backups, Table::Departments, "d1").unwrap();

        // Mutate the table after the backup.
        store
            .insert_batch(Table::Departments, vec![dept(3.0, "Sales")])
            .unwrap();
        assert_eq!(store.count(Table::Departments), 3);

        RestoreCoordinator::new(&store, &backups)
            .restore(Table::Departments, "d1")
            .unwrap();

        // Exactly the snapshot rows: no residue, no duplication.
        assert_eq!(
            store.select_all(Table::Departments),
            vec![dept(1.0, "HR"), dept(2.0, "Eng")]
        );
    }

    #[test]
    fn test_missing_artifact_leaves_table_untouched() {
        let (_tmp, store, backups) = fixture();
        let err = RestoreCoordinator::new(&store, &backups)
            .restore(Table::Departments, "never-created")
            .unwrap_err();
        assert!(matches!(err, RestoreError::ArtifactNotFound { .. }));
        assert_eq!(store.count(Table::Departments), 2);
    }

    #[test]
    fn test_schema_mismatch_leaves_table_untouched() {
        let (_tmp, store, backups) = fixture();

        // An artifact whose descriptor renames a field.
        let foreign = SchemaDescriptor {
            fields: vec![
                FieldDescriptor {
                    name: "id".to_string(),
                    kind: FieldKind::Identifier,
                },
                FieldDescriptor {
                    name: "title".to_string(),
                    kind: FieldKind::Text,
                },
            ],
        };
        let rows = vec![Row(vec![
            FieldValue::Identifier(9.0),
            FieldValue::Text("X".to_string()),
        ])];
        let bytes = snapshot::encode("departments", &foreign, &rows).unwrap();
        backups.write_artifact("departments", "bad", &bytes).unwrap();

        let err = RestoreCoordinator::new(&store, &backups)
            .restore(Table::Departments, "bad")
            .unwrap_err();
        assert!(matches!(err, RestoreError::SchemaMismatch { .. }));
        assert_eq!(store.count(Table::Departments), 2);
    }

    #[test]
    fn test_reordered_fields_are_a_mismatch() {
        let (_tmp, store, backups) = fixture();

        let reordered = SchemaDescriptor {
            fields: vec![
                FieldDescriptor {
                    name: "name".to_string(),
                    kind: FieldKind::Text,
                },
                FieldDescriptor {
                    name: "id".to_string(),
                    kind: FieldKind::Identifier,
                },
            ],
        };
        let bytes = snapshot::encode("departments", &reordered, &[]).unwrap();
        backups
            .write_artifact("departments", "reordered", &bytes)
            .unwrap();

        let err = RestoreCoordinator::new(&store, &backups)
            .restore(Table::Departments, "reordered")
            .unwrap_err();
        assert!(matches!(err, RestoreError::SchemaMismatch { .. }));
        assert_eq!(store.count(Table::Departments), 2);
    }

    #[test]
    fn test_artifact_for_other_table_is_a_mismatch() {
        let (_tmp, store, backups) = fixture();

        // jobs and departments share a field-name list; the embedded
        // table name still has to agree.
        let bytes = snapshot::encode("jobs", &Table::Jobs.schema().descriptor(), &[]).unwrap();
        backups
            .write_artifact("departments", "crossed", &bytes)
            .unwrap();

        let err = RestoreCoordinator::new(&store, &backups)
            .restore(Table::Departments, "crossed")
            .unwrap_err();
        assert!(matches!(err, RestoreError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_corrupt_artifact_is_a_decode_failure() {
        let (_tmp, store, backups) = fixture();
        backups
            .write_artifact("departments", "junk", b"not a snapshot")
            .unwrap();

        let err = RestoreCoordinator::new(&store, &backups)
            .restore(Table::Departments, "junk")
            .unwrap_err();
        assert!(matches!(err, RestoreError::Decode(_)));
        assert_eq!(store.count(Table::Departments), 2);
    }

    #[test]
    fn test_load_failure_leaves_prior_contents() {
        let (_tmp, store, backups) = fixture();

        // Snapshot with a duplicated primary key cannot be loaded.
        let bytes = snapshot::encode(
            "departments",
            &Table::Departments.schema().descriptor(),
            &[dept(5.0, "A"), dept(5.0, "B")],
        )
        .unwrap();
        backups.write_artifact("departments", "dup", &bytes).unwrap();

        let err = RestoreCoordinator::new(&store, &backups)
            .restore(Table::Departments, "dup")
            .unwrap_err();
        assert!(matches!(err, RestoreError::LoadFailed { .. }));
        assert_eq!(
            store.select_all(Table::Departments),
            vec![dept(1.0, "HR"), dept(2.0, "Eng")]
        );
    }
}
