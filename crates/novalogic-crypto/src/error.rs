//! Error types for cryptographic operations

use thiserror::Error;

/// Errors that can occur while opening or keying a script container
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Input is shorter than the container magic
    #[error("Truncated script header: expected at least {expected} bytes, got {actual}")]
    TruncatedHeader {
        /// Required header size in bytes
        expected: usize,
        /// Actual input size in bytes
        actual: usize,
    },

    /// Container magic does not match `SCR\x01`
    #[error("Invalid script magic: expected {expected:#010x}, got {actual:#010x}")]
    InvalidMagic {
        /// Magic the container must start with
        expected: u32,
        /// Magic found in the input
        actual: u32,
    },

    /// Key selector is neither a known title nor a `0xXXXXXXXX` literal
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// A zero seed is reserved as "no key"
    #[error("Key must be non-zero")]
    ZeroKey,
}
