//! Row validation against a table schema.
//!
//! Validation rules, applied in order, stopping at the first failing
//! category:
//! 1. Arity: supplied field count must equal the schema length.
//! 2. Presence (keyed input only): every schema field present, non-null,
//!    non-empty.
//! 3. Timestamp fields must parse against the fixed pattern.
//! 4. Identifier fields must parse as numbers.
//!
//! A row that fails produces rejection reasons and is never partially
//! normalized. Empty string counts as missing for the presence check and
//! as non-numeric for identifier fields; it is never defaulted.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use super::types::{FieldKind, TableSchema, TIMESTAMP_FORMAT};
use crate::model::{FieldValue, Row};

/// Rejection reason for a row whose field count differs from the schema.
pub const REASON_COLUMN_COUNT: &str = "column count mismatch";

/// Rejection reason for a timestamp outside the fixed pattern.
pub const REASON_BAD_TIMESTAMP: &str = "invalid datetime format";

/// Parses the fixed `YYYY-MM-DDTHH:MM:SSZ` pattern. UTC only; fractional
/// seconds and numeric offsets are rejected.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Validates a field-keyed row (API input) and normalizes it into a `Row`
/// ordered per the schema.
pub fn validate_keyed(schema: &TableSchema, row: &Map<String, Value>) -> Result<Row, Vec<String>> {
    if row.len() != schema.len() {
        return Err(vec![REASON_COLUMN_COUNT.to_string()]);
    }

    for def in schema.fields {
        if is_missing(row.get(def.name)) {
            return Err(vec![format!("missing field {}", def.name)]);
        }
    }

    let mut values: Vec<Option<FieldValue>> = vec![None; schema.len()];

    for (i, def) in schema.fields.iter().enumerate() {
        if def.kind != FieldKind::Timestamp {
            continue;
        }
        let parsed = row
            .get(def.name)
            .and_then(Value::as_str)
            .and_then(parse_timestamp);
        match parsed {
            Some(t) => values[i] = Some(FieldValue::Timestamp(t)),
            None => return Err(vec![REASON_BAD_TIMESTAMP.to_string()]),
        }
    }

    for (i, def) in schema.fields.iter().enumerate() {
        if def.kind != FieldKind::Identifier {
            continue;
        }
        match row.get(def.name).and_then(numeric_value) {
            Some(n) => values[i] = Some(FieldValue::Identifier(n)),
            None => return Err(vec![format!("non-numeric value in field {}", def.name)]),
        }
    }

    for (i, def) in schema.fields.iter().enumerate() {
        if def.kind == FieldKind::Text {
            // Presence was already checked; any scalar renders as text.
            let text = match row.get(def.name) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            values[i] = Some(FieldValue::Text(text));
        }
    }

    Ok(Row(values.into_iter().flatten().collect()))
}

/// Validates a positional row (CSV input) and normalizes it. Positional
/// input has no presence check: an empty identifier field fails as
/// non-numeric, an empty text field passes through.
pub fn validate_positional(schema: &TableSchema, fields: &[String]) -> Result<Row, Vec<String>> {
    if fields.len() != schema.len() {
        return Err(vec![REASON_COLUMN_COUNT.to_string()]);
    }

    let mut values: Vec<Option<FieldValue>> = vec![None; schema.len()];

    for (i, def) in schema.fields.iter().enumerate() {
        if def.kind != FieldKind::Timestamp {
            continue;
        }
        match parse_timestamp(&fields[i]) {
            Some(t) => values[i] = Some(FieldValue::Timestamp(t)),
            None => return Err(vec![REASON_BAD_TIMESTAMP.to_string()]),
        }
    }

    for (i, def) in schema.fields.iter().enumerate() {
        if def.kind != FieldKind::Identifier {
            continue;
        }
        match fields[i].trim().parse::<f64>() {
            Ok(n) => values[i] = Some(FieldValue::Identifier(n)),
            Err(_) => return Err(vec![format!("non-numeric value in field {}", def.name)]),
        }
    }

    for (i, def) in schema.fields.iter().enumerate() {
        if def.kind == FieldKind::Text {
            values[i] = Some(FieldValue::Text(fields[i].clone()));
        }
    }

    Ok(Row(values.into_iter().flatten().collect()))
}

/// Missing for the presence check: absent, null, or empty string.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Numeric reading of a JSON value: numbers directly, strings via parse.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
