//! Error types for the command-line tools.

use novalogic_crypto::CryptoError;
use novalogic_formats::FormatError;
use novalogic_formats::pff::PffError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors found before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input file does not exist
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Key selector is neither a known title nor a hex literal
    #[error("Invalid key '{selector}': {source}")]
    InvalidKey {
        /// Selector as given
        selector: String,
        /// Parse failure
        #[source]
        source: CryptoError,
    },

    /// Output location cannot be used
    #[error("Invalid output path {}: {reason}", .path.display())]
    InvalidOutput {
        /// Offending path
        path: PathBuf,
        /// Why it cannot be used
        reason: String,
    },
}

/// Errors raised while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Entry name would escape the output directory
    #[error("Refusing to extract unsafe entry name '{0}'")]
    UnsafeName(String),

    /// No retrievable entry has the requested name
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Archive could not be read
    #[error(transparent)]
    Archive(#[from] PffError),

    /// Entry could not be decoded
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Script container could not be converted
    #[error(transparent)]
    Script(#[from] CryptoError),

    /// Input could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// Source path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Output could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Report could not be printed
    #[error("Failed to print report: {0}")]
    Report(#[from] io::Error),
}
