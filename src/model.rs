//! Record value types.
//!
//! Rows are stored as ordered field values matching their table schema.
//! The typed record variants are read-side views used by the reports; a
//! row becomes immutable once it has passed validation.

use chrono::{DateTime, Utc};

use crate::schema::{Table, TIMESTAMP_FORMAT};

/// One normalized field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Numeric identifier. Kept as f64 to match the legacy numeric typing
    /// of the source data.
    Identifier(f64),
    /// Text, passed through unchanged.
    Text(String),
    /// UTC timestamp.
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// The identifier value, if this is an identifier field.
    pub fn as_identifier(&self) -> Option<f64> {
        match self {
            FieldValue::Identifier(v) => Some(*v),
            _ => None,
        }
    }

    /// The text value, if this is a text field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The timestamp value, if this is a timestamp field.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

/// Renders a timestamp in the fixed artifact/API pattern.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// One validated, normalized row. Field order matches the table schema;
/// the first field is the primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct Row(pub Vec<FieldValue>);

impl Row {
    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Primary key bit pattern, used for uniqueness checks. `None` when
    /// the leading field is not an identifier.
    pub fn key_bits(&self) -> Option<u64> {
        self.0.first()?.as_identifier().map(f64::to_bits)
    }
}

/// An employee row, viewed through its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: f64,
    pub name: String,
    pub hired_at: DateTime<Utc>,
    pub department_id: f64,
    pub job_id: f64,
}

/// A department row.
#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub id: f64,
    pub name: String,
}

/// A job row.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: f64,
    pub name: String,
}

/// A typed record, one variant per table.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Employee(Employee),
    Department(Department),
    Job(Job),
}

impl Record {
    /// Reads a typed record out of a validated row. Returns `None` when
    /// the row shape does not match the table schema; validated rows
    /// always match.
    pub fn from_row(table: Table, row: &Row) -> Option<Record> {
        let f = &row.0;
        match table {
            Table::Employees => Some(Record::Employee(Employee {
                id: f.first()?.as_identifier()?,
                name: f.get(1)?.as_text()?.to_string(),
                hired_at: f.get(2)?.as_timestamp()?,
                department_id: f.get(3)?.as_identifier()?,
                job_id: f.get(4)?.as_identifier()?,
            })),
            Table::Departments => Some(Record::Department(Department {
                id: f.first()?.as_identifier()?,
                name: f.get(1)?.as_text()?.to_string(),
            })),
            Table::Jobs => Some(Record::Job(Job {
                id: f.first()?.as_identifier()?,
                name: f.get(1)?.as_text()?.to_string(),
            })),
        }
    }

    /// Flattens the record back into its ordered row form.
    pub fn into_row(self) -> Row {
        match self {
            Record::Employee(e) => Row(vec![
                FieldValue::Identifier(e.id),
                FieldValue::Text(e.name),
                FieldValue::Timestamp(e.hired_at),
                FieldValue::Identifier(e.department_id),
                FieldValue::Identifier(e.job_id),
            ]),
            Record::Department(d) => Row(vec![
                FieldValue::Identifier(d.id),
                FieldValue::Text(d.name),
            ]),
            Record::Job(j) => Row(vec![
                FieldValue::Identifier(j.id),
                FieldValue::Text(j.name),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_employee() -> Employee {
        Employee {
            id: 1.0,
            name: "Ana".to_string(),
            hired_at: Utc.with_ymd_and_hms(2021, 3, 5, 12, 0, 0).unwrap(),
            department_id: 2.0,
            job_id: 3.0,
        }
    }

    #[test]
    fn test_employee_row_roundtrip() {
        let employee = sample_employee();
        let row = Record::Employee(employee.clone()).into_row();
        assert_eq!(row.len(), 5);

        match Record::from_row(Table::Employees, &row).unwrap() {
            Record::Employee(back) => assert_eq!(back, employee),
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_department_row_roundtrip() {
        let dept = Department {
            id: 2.0,
            name: "Engineering".to_string(),
        };
        let row = Record::Department(dept.clone()).into_row();
        match Record::from_row(Table::Departments, &row).unwrap() {
            Record::Department(back) => assert_eq!(back, dept),
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_from_row_shape_mismatch() {
        let row = Record::Department(Department {
            id: 1.0,
            name: "HR".to_string(),
        })
        .into_row();
        // A two-field row cannot be read as an employee.
        assert!(Record::from_row(Table::Employees, &row).is_none());
    }

    #[test]
    fn test_key_bits_uses_leading_identifier() {
        let row = Record::Job(Job {
            id: 7.0,
            name: "Analyst".to_string(),
        })
        .into_row();
        assert_eq!(row.key_bits(), Some(7.0f64.to_bits()));

        let no_key = Row(vec![FieldValue::Text("x".to_string())]);
        assert_eq!(no_key.key_bits(), None);
    }

    #[test]
    fn test_format_timestamp_fixed_pattern() {
        let t = Utc.with_ymd_and_hms(2021, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(t), "2021-03-05T12:00:00Z");
    }
}
