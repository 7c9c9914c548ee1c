//! Snapshot artifacts: a table's schema and rows frozen into one
//! self-describing binary blob.
//!
//! Encoding embeds the schema descriptor ahead of the row data, so a
//! snapshot can be decoded without the registry and checked against the
//! live table before anything is overwritten.

mod codec;
mod errors;

pub use codec::{decode, encode, Snapshot, FORMAT_VERSION, MAGIC};
pub use errors::{DecodeError, EncodeError};
