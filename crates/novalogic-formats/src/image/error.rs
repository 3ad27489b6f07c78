//! Error types for image decoding

use crate::cursor::CursorError;
use thiserror::Error;

/// Image decoding result type
pub type ImageResult<T> = Result<T, ImageError>;

/// Errors raised by the PCX and TGA decoders
#[derive(Debug, Error)]
pub enum ImageError {
    /// Input is not an image of the expected format
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Input ended before the header, pixel data or palette was complete
    #[error("Truncated image data at offset {offset}: expected {expected} bytes, {actual} available")]
    TruncatedData {
        /// Offset the read started at
        offset: usize,
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },

    /// Pixel data or palette is inconsistent with the header
    #[error("Malformed image data: {0}")]
    MalformedRecord(String),

    /// A recognised variant that these decoders deliberately do not handle
    #[error("Unsupported image variant: {0}")]
    Unsupported(String),
}

impl From<CursorError> for ImageError {
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
