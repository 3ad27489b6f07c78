//! Error types for 3DI model parsing

use crate::cursor::CursorError;
use std::io;
use thiserror::Error;

/// Model parsing result type
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while reading a 3DI model
#[derive(Debug, Error)]
pub enum ModelError {
    /// Signature is not a supported 3DI version
    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),

    /// Input ended before a record or table was complete
    #[error("Truncated model data at offset {offset}: expected {expected} bytes, {actual} available")]
    TruncatedData {
        /// Offset the read started at
        offset: usize,
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },

    /// A count or index is inconsistent with the rest of the file
    #[error("Malformed model record: {0}")]
    MalformedRecord(String),

    /// I/O error reading a model file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<CursorError> for ModelError {
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
