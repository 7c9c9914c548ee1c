//! Self-describing binary snapshot encoding.
//!
//! Artifact layout:
//!
//! ```text
//! +------------------+
//! | Magic "HRVS"     | (4 bytes)
//! +------------------+
//! | Format Version   | (u8)
//! +------------------+
//! | Table Name       | (length-prefixed string)
//! +------------------+
//! | Field Count      | (u16 LE)
//! +------------------+
//! | Fields           | (per field: length-prefixed name, kind tag u8)
//! +------------------+
//! | Row Count        | (u32 LE)
//! +------------------+
//! | Rows             | (fields encoded in descriptor order)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32 over all preceding bytes)
//! +------------------+
//! ```
//!
//! Field encodings: identifier = f64 LE, text = length-prefixed string,
//! timestamp = length-prefixed string in the fixed `YYYY-MM-DDTHH:MM:SSZ`
//! pattern. Timestamps stay in string form so an artifact can be audited
//! with a hex dump and carries no epoch convention.
//!
//! Decoding is self-contained: the embedded descriptor is all that is
//! needed, and the target table does not have to exist.

use crate::model::{format_timestamp, FieldValue, Row};
use crate::schema::validator::parse_timestamp;
use crate::schema::{FieldDescriptor, FieldKind, SchemaDescriptor};

use super::errors::{DecodeError, EncodeError};

/// Leading magic bytes of every artifact.
pub const MAGIC: [u8; 4] = *b"HRVS";

/// Current artifact format version.
pub const FORMAT_VERSION: u8 = 1;

const KIND_IDENTIFIER: u8 = 0;
const KIND_TEXT: u8 = 1;
const KIND_TIMESTAMP: u8 = 2;

fn kind_tag(kind: FieldKind) -> u8 {
    match kind {
        FieldKind::Identifier => KIND_IDENTIFIER,
        FieldKind::Text => KIND_TEXT,
        FieldKind::Timestamp => KIND_TIMESTAMP,
    }
}

fn kind_from_tag(tag: u8) -> Result<FieldKind, DecodeError> {
    match tag {
        KIND_IDENTIFIER => Ok(FieldKind::Identifier),
        KIND_TEXT => Ok(FieldKind::Text),
        KIND_TIMESTAMP => Ok(FieldKind::Timestamp),
        other => Err(DecodeError::UnknownFieldKind(other)),
    }
}

/// A decoded artifact: table name, embedded descriptor, and rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub table: String,
    pub schema: SchemaDescriptor,
    pub rows: Vec<Row>,
}

/// Encodes a table's rows under the given descriptor.
pub fn encode(
    table: &str,
    schema: &SchemaDescriptor,
    rows: &[Row],
) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(64 + rows.len() * 32);

    buf.extend_from_slice(&MAGIC);
    buf.push(FORMAT_VERSION);
    write_string(&mut buf, table);

    buf.extend_from_slice(&(schema.len() as u16).to_le_bytes());
    for field in &schema.fields {
        write_string(&mut buf, &field.name);
        buf.push(kind_tag(field.kind));
    }

    buf.extend_from_slice(&(rows.len() as u32).to_le_bytes());
    for (index, row) in rows.iter().enumerate() {
        if row.len() != schema.len() {
            return Err(EncodeError::RowShape { index });
        }
        for (field, value) in schema.fields.iter().zip(&row.0) {
            match (field.kind, value) {
                (FieldKind::Identifier, FieldValue::Identifier(n)) => {
                    buf.extend_from_slice(&n.to_le_bytes());
                }
                (FieldKind::Text, FieldValue::Text(s)) => write_string(&mut buf, s),
                (FieldKind::Timestamp, FieldValue::Timestamp(t)) => {
                    write_string(&mut buf, &format_timestamp(*t));
                }
                _ => return Err(EncodeError::RowShape { index }),
            }
        }
    }

    let checksum = crc32(&buf);
    buf.extend_from_slice(&checksum.to_le_bytes());
    Ok(buf)
}

/// Decodes an artifact, verifying magic, version, and checksum.
pub fn decode(bytes: &[u8]) -> Result<Snapshot, DecodeError> {
    if bytes.len() < MAGIC.len() + 1 + 4 {
        return Err(DecodeError::Truncated { offset: bytes.len() });
    }

    let (content, checksum_bytes) = bytes.split_at(bytes.len() - 4);
    let stored = u32::from_le_bytes([
        checksum_bytes[0],
        checksum_bytes[1],
        checksum_bytes[2],
        checksum_bytes[3],
    ]);
    if crc32(content) != stored {
        return Err(DecodeError::ChecksumMismatch);
    }

    let mut reader = ByteReader::new(content);

    if reader.read_bytes(MAGIC.len())? != MAGIC {
        return Err(DecodeError::BadMagic);
    }
    let version = reader.read_u8()?;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let table = reader.read_string()?;

    let field_count = reader.read_u16()? as usize;
    let mut fields = Vec::with_capacity(field_count);
    for _ in 0..field_count {
        let name = reader.read_string()?;
        let kind = kind_from_tag(reader.read_u8()?)?;
        fields.push(FieldDescriptor { name, kind });
    }
    let schema = SchemaDescriptor { fields };

    let row_count = reader.read_u32()? as usize;
    let mut rows = Vec::with_capacity(row_count);
    for _ in 0..row_count {
        let mut values = Vec::with_capacity(schema.len());
        for field in &schema.fields {
            let value = match field.kind {
                FieldKind::Identifier => FieldValue::Identifier(reader.read_f64()?),
                FieldKind::Text => FieldValue::Text(reader.read_string()?),
                FieldKind::Timestamp => {
                    let raw = reader.read_string()?;
                    let parsed = parse_timestamp(&raw)
                        .ok_or(DecodeError::InvalidTimestamp(raw))?;
                    FieldValue::Timestamp(parsed)
                }
            };
            values.push(value);
        }
        rows.push(Row(values));
    }

    if !reader.is_exhausted() {
        return Err(DecodeError::TrailingBytes);
    }

    Ok(Snapshot {
        table,
        schema,
        rows,
    })
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

fn write_string(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Bounds-checked cursor over the artifact content.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or(DecodeError::Truncated { offset: self.pos })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_f64(&mut self) -> Result<f64, DecodeError> {
        let b = self.read_bytes(8)?;
        Ok(f64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn read_string(&mut self) -> Result<String, DecodeError> {
        let offset = self.pos;
        let len = self.read_u32()? as usize;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    fn is_exhausted(&self) -> bool {
        self.pos == self.buf.len()
    }
}
