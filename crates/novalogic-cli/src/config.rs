//! Command-line configuration.
//!
//! Both tools read their options from CLI arguments with environment
//! variable fallbacks:
//!
//! - `NOVALOGIC_PFF_OUTPUT`: extraction directory for `pff`
//! - `NOVALOGIC_SCRIPT_KEY`: key selector for `scr`
//!
//! # Example
//!
//! ```no_run
//! use novalogic_cli::ScrConfig;
//!
//! let config = ScrConfig::from_args();
//! config.validate().expect("Invalid configuration");
//! println!("Writing {}", config.output_path().display());
//! ```

use crate::error::ConfigError;
use clap::{ArgGroup, Parser};
use novalogic_crypto::{ScriptKey, parse_key};
use std::path::{Path, PathBuf};

/// Options for the `pff` archive tool.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pff",
    about = "List, extract and inspect Novalogic PFF archives",
    version
)]
pub struct PffConfig {
    /// List archive entries (the default when no other action is given)
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Extract every entry that still has data
    #[arg(short = 'e', long)]
    pub extract: bool,

    /// Directory entries are extracted into
    #[arg(short = 'o', long, env = "NOVALOGIC_PFF_OUTPUT", default_value = ".")]
    pub output: PathBuf,

    /// Decode one entry and print a summary of it
    #[arg(long, value_name = "NAME")]
    pub inspect: Option<String>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Archive to read
    pub archive: PathBuf,
}

impl PffConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Whether entries should be listed.
    pub fn should_list(&self) -> bool {
        self.list || (!self.extract && self.inspect.is_none())
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the archive does not exist or the output
    /// directory is an existing file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.archive.is_file() {
            return Err(ConfigError::MissingInput(self.archive.clone()));
        }

        if self.extract && self.output.is_file() {
            return Err(ConfigError::InvalidOutput {
                path: self.output.clone(),
                reason: "not a directory".to_string(),
            });
        }

        Ok(())
    }
}

/// Direction of a script conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMode {
    /// Container to plaintext
    Decrypt,
    /// Plaintext to container
    Encrypt,
}

/// Options for the `scr` script tool.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "scr",
    about = "Encrypt and decrypt Novalogic script files",
    version,
    group(ArgGroup::new("mode").required(true).args(["decrypt", "encrypt"]))
)]
pub struct ScrConfig {
    /// Decrypt a script container
    #[arg(short = 'd', long)]
    pub decrypt: bool,

    /// Encrypt a plaintext script
    #[arg(short = 'e', long)]
    pub encrypt: bool,

    /// Title name (DF2, BHD, JO:B, ...) or a 0x-prefixed 8-digit hex key
    #[arg(short = 'k', long, env = "NOVALOGIC_SCRIPT_KEY")]
    pub key: String,

    /// Output file; defaults to `<input>.txt` when decrypting and to the
    /// input path without its extension when encrypting
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// File to convert
    pub input: PathBuf,
}

impl ScrConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Selected conversion direction.
    pub fn mode(&self) -> ScriptMode {
        if self.decrypt {
            ScriptMode::Decrypt
        } else {
            ScriptMode::Encrypt
        }
    }

    /// Resolve the key selector.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidKey` for unknown names, malformed hex and
    /// the zero key.
    pub fn script_key(&self) -> Result<ScriptKey, ConfigError> {
        parse_key(&self.key).map_err(|source| ConfigError::InvalidKey {
            selector: self.key.clone(),
            source,
        })
    }

    /// Where the converted file is written.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(&self.input, self.mode()))
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the input does not exist, the key is invalid,
    /// or the output would overwrite the input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input.is_file() {
            return Err(ConfigError::MissingInput(self.input.clone()));
        }

        self.script_key()?;

        let output = self.output_path();
        if output == self.input {
            return Err(ConfigError::InvalidOutput {
                path: output,
                reason: "would overwrite the input file".to_string(),
            });
        }

        Ok(())
    }
}

/// Output path the legacy tools used.
///
/// Decrypting `M01.SCR` writes `M01.SCR.txt`; encrypting `M01.SCR.txt`
/// writes `M01.SCR`.
pub fn default_output(input: &Path, mode: ScriptMode) -> PathBuf {
    match mode {
        ScriptMode::Decrypt => {
            let mut name = input.as_os_str().to_owned();
            name.push(".txt");
            PathBuf::from(name)
        }
        ScriptMode::Encrypt => input.with_extension(""),
    }
}
