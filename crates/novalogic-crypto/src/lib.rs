//! Script obfuscation for Novalogic game data
//!
//! Novalogic titles (Delta Force, Black Hawk Down, Joint Operations, ...)
//! ship their mission and configuration scripts in a lightly obfuscated
//! container. This crate implements that container bit-exactly.
//!
//! # Components
//!
//! - **Cipher**: a 32-bit rotate/add keystream XORed over the body, combined
//!   with a full byte reversal of the buffer
//! - **Container**: a 4-byte `SCR\x01` magic prefix on encrypted output
//! - **Key Table**: per-title seeds selected by short names (`DF2`, `BHD`, ...)
//!
//! # Examples
//!
//! ```
//! use novalogic_crypto::{decrypt, encrypt, parse_key};
//!
//! let key = parse_key("BHD").expect("known title");
//! let sealed = encrypt(b"set_mission 1", key.value());
//! let opened = decrypt(&sealed, key.value()).expect("valid container");
//! assert_eq!(opened, b"set_mission 1");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod keys;
pub mod script;

pub use error::CryptoError;

// Re-export commonly used types
pub use keys::{KNOWN_KEYS, ScriptKey, known_key_names, named_key, parse_key};
pub use script::{SCRIPT_MAGIC, SCRIPT_MAGIC_SIZE, ScriptCipher, decrypt, encrypt};
