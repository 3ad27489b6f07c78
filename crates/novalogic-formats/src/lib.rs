//! Readers for Novalogic game data formats
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Format names don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::similar_names)] // Domain-specific naming patterns
#![allow(clippy::return_self_not_must_use)] // Builder patterns
//! This crate reads the asset formats shipped with Novalogic titles (Delta
//! Force, Comanche, Black Hawk Down and their relatives). Every reader works
//! on an in-memory byte buffer through a bounds-checked cursor, validates
//! signatures before anything else and fails with a typed error instead of
//! guessing when a file is truncated or inconsistent.
//!
//! # Supported Formats
//!
//! - **PFF**: Resource archives (`PFF3` revision, 32, 36 and larger records)
//! - **3DI**: Version 8 models with embedded paletted textures and LODs
//! - **PCX**: 8-bit indexed ZSoft images, 16 or 256 colours
//! - **TGA**: Uncompressed 24/32-bit and RLE 24-bit true-colour images
//!
//! Writing any of these formats is not supported.

#![warn(missing_docs)]

pub mod cursor;
/// File-kind detection and preview decoding
pub mod kind;
pub mod image;
pub mod model;
pub mod pff;

pub use cursor::{ByteCursor, CursorError};
pub use kind::{FileKind, FormatError, Preview};

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;
