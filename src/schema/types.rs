//! Schema type definitions.
//!
//! A table schema is an ordered list of field definitions. Order matters
//! for positional (CSV) input and for snapshot descriptors; keyed (API)
//! input is matched by name.
//!
//! Supported field kinds:
//! - identifier: numeric key, stored as f64
//! - text: UTF-8 string
//! - timestamp: UTC instant in the fixed `YYYY-MM-DDTHH:MM:SSZ` form

use std::fmt;

/// The fixed timestamp pattern used everywhere: API input, CSV input,
/// and snapshot artifacts. UTC only, no fractional seconds, literal `Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Supported field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Numeric identifier (stored as a floating value).
    Identifier,
    /// UTF-8 text, passed through unchanged.
    Text,
    /// UTC timestamp in the fixed pattern.
    Timestamp,
}

impl FieldKind {
    /// Returns the kind name for error messages and descriptors.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Identifier => "identifier",
            FieldKind::Text => "text",
            FieldKind::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single field definition inside a table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name, unique within its schema.
    pub name: &'static str,
    /// Field kind.
    pub kind: FieldKind,
}

/// Ordered schema of one table. Static after process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name as it appears in the API and artifact names.
    pub table: &'static str,
    /// Ordered field definitions. The first field is the primary key.
    pub fields: &'static [FieldDef],
}

impl TableSchema {
    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the schema has no fields (never the case for the
    /// built-in tables; kept for API completeness).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Ordered field names.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Builds the owned descriptor embedded into snapshot artifacts.
    pub fn descriptor(&self) -> SchemaDescriptor {
        SchemaDescriptor {
            fields: self
                .fields
                .iter()
                .map(|f| FieldDescriptor {
                    name: f.name.to_string(),
                    kind: f.kind,
                })
                .collect(),
        }
    }
}

/// One field of an owned schema descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

/// Owned, ordered schema descriptor.
///
/// This is the self-describing half of a snapshot artifact: it is written
/// at backup time from the live table schema and read back at restore time
/// without consulting the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    pub fields: Vec<FieldDescriptor>,
}

impl SchemaDescriptor {
    /// Ordered field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the descriptor has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: TableSchema = TableSchema {
        table: "sample",
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
                name: "seen_at",
                kind: FieldKind::Timestamp,
            },
        ],
    };

    #[test]
    fn test_field_names_preserve_order() {
        assert_eq!(SAMPLE.field_names(), vec!["id", "name", "seen_at"]);
    }

    #[test]
    fn test_descriptor_mirrors_schema() {
        let desc = SAMPLE.descriptor();
        assert_eq!(desc.len(), 3);
        assert_eq!(desc.field_names(), vec!["id", "name", "seen_at"]);
        assert_eq!(desc.fields[0].kind, FieldKind::Identifier);
        assert_eq!(desc.fields[2].kind, FieldKind::Timestamp);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldKind::Identifier.name(), "identifier");
        assert_eq!(FieldKind::Text.name(), "text");
        assert_eq!(FieldKind::Timestamp.name(), "timestamp");
    }
}
