//! Static schema registry for the three record kinds.
//!
//! Table identity is a tagged variant resolved once at the API boundary;
//! everything downstream works with `Table`, never with raw name strings.
//! The registry is immutable after process start.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::types::{FieldDef, FieldKind, TableSchema};

static EMPLOYEES_SCHEMA: TableSchema = TableSchema {
    table: "employees",
    fields: &[
        FieldDef {
            name: "id",
            kind: FieldKind::Identifier,
        },
        FieldDef {
            name: "name",
            kind: FieldKind::Text,
        },
        FieldDef {
            name: "hired_at",
            kind: FieldKind::Timestamp,
        },
        FieldDef {
            name: "department_id",
            kind: FieldKind::Identifier,
        },
        FieldDef {
            name: "job_id",
            kind: FieldKind::Identifier,
        },
    ],
};

static DEPARTMENTS_SCHEMA: TableSchema = TableSchema {
    table: "departments",
    fields: &[
        FieldDef {
            name: "id",
            kind: FieldKind::Identifier,
        },
        FieldDef {
            name: "name",
            kind: FieldKind::Text,
        },
    ],
};

static JOBS_SCHEMA: TableSchema = TableSchema {
    table: "jobs",
    fields: &[
        FieldDef {
            name: "id",
            kind: FieldKind::Identifier,
        },
        FieldDef {
            name: "name",
            kind: FieldKind::Text,
        },
    ],
};

/// The three tables served by this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Employees,
    Departments,
    Jobs,
}

impl Table {
    /// All tables, in seed-load order (referenced tables first).
    pub const ALL: [Table; 3] = [Table::Departments, Table::Jobs, Table::Employees];

    /// Table name as used in routes, artifact names, and seed file names.
    pub fn name(&self) -> &'static str {
        self.schema().table
    }

    /// The static schema for this table.
    pub fn schema(&self) -> &'static TableSchema {
        match self {
            Table::Employees => &EMPLOYEES_SCHEMA,
            Table::Departments => &DEPARTMENTS_SCHEMA,
            Table::Jobs => &JOBS_SCHEMA,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lookup failure for an unknown table name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("table '{0}' not found")]
pub struct UnknownTable(pub String);

impl FromStr for Table {
    type Err = UnknownTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employees" => Ok(Table::Employees),
            "departments" => Ok(Table::Departments),
            "jobs" => Ok(Table::Jobs),
            other => Err(UnknownTable(other.to_string())),
        }
    }
}
