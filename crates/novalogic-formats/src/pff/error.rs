//! Error types for PFF archive operations

use crate::cursor::CursorError;
use thiserror::Error;

/// PFF operation result type
pub type PffResult<T> = Result<T, PffError>;

/// Errors raised while opening or reading a PFF archive
#[derive(Debug, Error)]
pub enum PffError {
    /// Header size or signature is not a known PFF revision
    #[error("Unsupported archive format: {0}")]
    UnsupportedFormat(String),

    /// Archive is shorter than a header, directory or entry requires
    #[error("Truncated archive at offset {offset}: expected {expected} bytes, {actual} available")]
    TruncatedData {
        /// Offset the read started at
        offset: usize,
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },

    /// A directory record is internally inconsistent
    #[error("Malformed directory record: {0}")]
    MalformedRecord(String),

    /// I/O error while opening the backing file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CursorError> for PffError {
    fn from(e: CursorError) -> Self {
        match e {
            CursorError::TruncatedData {
                offset,
                expected,
                actual,
            } => Self::TruncatedData {
                offset,
                expected,
                actual,
            },
            CursorError::InvalidRecord { .. } => Self::MalformedRecord(e.to_string()),
        }
    }
}

impl PffError {
    /// Whether the error comes from the archive bytes rather than the file system
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cursor_error() {
        let err: PffError = CursorError::TruncatedData {
            offset: 20,
            expected: 32,
            actual: 4,
        }
        .into();
        assert!(matches!(
            err,
            PffError::TruncatedData {
                offset: 20,
                expected: 32,
                actual: 4
            }
        ));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_error_display() {
        let err = PffError::UnsupportedFormat("signature 0x12345678".to_string());
        assert!(err.to_string().contains("0x12345678"));

        let err = PffError::MalformedRecord("record size 16".to_string());
        assert!(err.to_string().contains("16"));
    }
}
