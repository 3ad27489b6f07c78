//! Script key selection
//!
//! Every title seeds the script keystream with a fixed 32-bit value. Keys are
//! picked by a short title name, or given directly as a `0xXXXXXXXX` literal
//! for titles missing from the table.

use std::fmt;

use crate::error::CryptoError;

/// Seeds used by the shipped titles, keyed by their short names
pub const KNOWN_KEYS: &[(&str, u32)] = &[
    // Delta Force
    ("DF1", 0x0496_0552),
    ("DF2", 0x0123_4567),
    ("DF3", 0x0123_4567),
    ("TFD", 0x0123_4567),
    ("C4", 0x0123_4567),
    // Black Hawk Down era
    ("BHD", 0x2A5A_8EAD),
    ("TS", 0x2A5A_8EAD),
    ("JO", 0x2A5A_8EAD),
    // Joint Operations beta builds
    ("JO:B", 0xABEE_FACE),
];

/// Length of a hex key literal including its `0x` prefix
const HEX_LITERAL_LEN: usize = 10;

/// A resolved script key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptKey(u32);

impl ScriptKey {
    /// Wrap a raw seed
    pub fn new(value: u32) -> Result<Self, CryptoError> {
        if value == 0 {
            return Err(CryptoError::ZeroKey);
        }
        Ok(Self(value))
    }

    /// Raw 32-bit seed
    pub fn value(self) -> u32 {
        self.0
    }

    /// Parse a `0xXXXXXXXX` literal
    pub fn from_hex(literal: &str) -> Result<Self, CryptoError> {
        let literal = literal.trim();
        let digits = literal
            .strip_prefix("0x")
            .or_else(|| literal.strip_prefix("0X"))
            .filter(|_| literal.len() == HEX_LITERAL_LEN)
            .ok_or_else(|| {
                CryptoError::InvalidKeyFormat(format!(
                    "expected a title name or 0xXXXXXXXX, got {literal:?}"
                ))
            })?;

        let bytes = hex::decode(digits)
            .map_err(|e| CryptoError::InvalidKeyFormat(format!("invalid hex: {e}")))?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&bytes);
        Self::new(u32::from_be_bytes(raw))
    }
}

impl fmt::Display for ScriptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010X}", self.0)
    }
}

/// Look up the seed of a known title
pub fn named_key(name: &str) -> Option<u32> {
    KNOWN_KEYS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|&(_, value)| value)
}

/// Names accepted by [`named_key`]
pub fn known_key_names() -> impl Iterator<Item = &'static str> {
    KNOWN_KEYS.iter().map(|&(name, _)| name)
}

/// Resolve a key selector: a known title name first, then a hex literal
pub fn parse_key(selector: &str) -> Result<ScriptKey, CryptoError> {
    if let Some(value) = named_key(selector) {
        return ScriptKey::new(value);
    }
    ScriptKey::from_hex(selector)
}
