//! Snapshot codec error types.

use thiserror::Error;

/// Errors producing a snapshot artifact.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A row's fields disagree with the descriptor being embedded.
    #[error("row {index} does not match the schema descriptor")]
    RowShape { index: usize },
}

/// Errors reading a snapshot artifact. Malformed or truncated input is
/// always reported through one of these, never a panic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes than the structure declares.
    #[error("snapshot truncated at byte {offset}")]
    Truncated { offset: usize },

    /// Leading magic bytes are not a snapshot header.
    #[error("not a snapshot artifact (bad magic)")]
    BadMagic,

    /// Artifact written by an unknown format version.
    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u8),

    /// Trailing checksum does not match the content.
    #[error("snapshot checksum mismatch")]
    ChecksumMismatch,

    /// Descriptor carries a field kind tag this build does not know.
    #[error("unknown field kind tag {0}")]
    UnknownFieldKind(u8),

    /// A length-prefixed string is not valid UTF-8.
    #[error("invalid utf-8 in snapshot at byte {offset}")]
    InvalidUtf8 { offset: usize },

    /// A timestamp field does not parse under the fixed pattern.
    #[error("invalid timestamp '{0}' in snapshot")]
    InvalidTimestamp(String),

    /// Content bytes left over after the declared rows.
    #[error("trailing bytes after snapshot content")]
    TrailingBytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        assert!(DecodeError::BadMagic.to_string().contains("magic"));
        assert!(DecodeError::ChecksumMismatch.to_string().contains("checksum"));
        assert!(DecodeError::UnsupportedVersion(9).to_string().contains('9'));
        assert!(EncodeError::RowShape { index: 3 }.to_string().contains('3'));
    }
}
