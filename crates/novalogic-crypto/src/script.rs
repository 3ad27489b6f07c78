//! Script container cipher
//!
//! Scripts are stored as `SCR\x01` followed by the obfuscated body. The body
//! is produced by XORing the plaintext with a keystream and then reversing
//! the whole buffer; opening a script undoes the two steps in the opposite
//! order.
//!
//! The keystream is a 32-bit recurrence seeded with the title key:
//!
//! ```text
//! t1  = rotl(key, 11)
//! t2  = rotl(key + t1, 4)      (wrapping add)
//! key = t2 ^ 1
//! out = key as u8
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use novalogic_crypto::script::{ScriptCipher, decrypt, encrypt};
//!
//! let sealed = encrypt(b"Hello, World!", 0x2A5A_8EAD);
//! assert_eq!(&sealed[..4], b"SCR\x01");
//!
//! let opened = decrypt(&sealed, 0x2A5A_8EAD).expect("valid container");
//! assert_eq!(opened, b"Hello, World!");
//!
//! // The raw keystream is available for tooling
//! let first: Vec<u8> = ScriptCipher::new(0x2A5A_8EAD).take(2).collect();
//! assert_eq!(first, [0xFE, 0x5F]);
//! ```

use tracing::debug;

use crate::error::CryptoError;

/// Container magic, `SCR\x01` read as a little-endian `u32`
pub const SCRIPT_MAGIC: u32 = 0x0152_4353;

/// Size of the container magic in bytes
pub const SCRIPT_MAGIC_SIZE: usize = 4;

/// Keystream generator for the script cipher.
///
/// Iterating yields one keystream byte per step; the generator never ends.
#[derive(Debug, Clone)]
pub struct ScriptCipher {
    /// Running 32-bit state
    state: u32,
}

impl ScriptCipher {
    /// Create a keystream seeded with `key`
    pub fn new(key: u32) -> Self {
        Self { state: key }
    }

    /// Advance the recurrence by one step
    fn next_keystream_byte(&mut self) -> u8 {
        let t1 = self.state.rotate_left(11);
        let t2 = self.state.wrapping_add(t1).rotate_left(4);
        self.state = t2 ^ 1;
        self.state as u8
    }

    /// XOR `data` in place with the keystream, in forward order
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.next_keystream_byte();
        }
    }
}

impl Iterator for ScriptCipher {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_keystream_byte())
    }
}

/// Seal a plaintext script.
///
/// XORs the plaintext with the keystream, reverses the result and prepends
/// the container magic.
pub fn encrypt(plaintext: &[u8], key: u32) -> Vec<u8> {
    let mut body = plaintext.to_vec();
    ScriptCipher::new(key).apply_keystream(&mut body);
    body.reverse();

    let mut sealed = Vec::with_capacity(SCRIPT_MAGIC_SIZE + body.len());
    sealed.extend_from_slice(&SCRIPT_MAGIC.to_le_bytes());
    sealed.extend_from_slice(&body);

    debug!("Encrypted {} script bytes", plaintext.len());
    sealed
}

/// Open a sealed script.
///
/// # Errors
///
/// Returns [`CryptoError::TruncatedHeader`] when the input cannot hold the
/// magic and [`CryptoError::InvalidMagic`] when the magic does not match.
pub fn decrypt(sealed: &[u8], key: u32) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < SCRIPT_MAGIC_SIZE {
        return Err(CryptoError::TruncatedHeader {
            expected: SCRIPT_MAGIC_SIZE,
            actual: sealed.len(),
        });
    }

    let (magic, body) = sealed.split_at(SCRIPT_MAGIC_SIZE);
    let magic = u32::from_le_bytes([magic[0], magic[1], magic[2], magic[3]]);
    if magic != SCRIPT_MAGIC {
        return Err(CryptoError::InvalidMagic {
            expected: SCRIPT_MAGIC,
            actual: magic,
        });
    }

    let mut body = body.to_vec();
    body.reverse();
    ScriptCipher::new(key).apply_keystream(&mut body);

    debug!("Decrypted {} script bytes", body.len());
    Ok(body)
}
