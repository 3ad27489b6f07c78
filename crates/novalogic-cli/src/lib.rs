//! Command-line tools for Novalogic game data
//!
//! The crate backs two thin binaries:
//!
//! - `pff`: list, extract and inspect PFF archives
//! - `scr`: encrypt and decrypt script containers
//!
//! Command logic lives here so it can be tested without spawning processes;
//! the binaries only parse arguments, set up logging and report errors.

#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod error;
pub mod logging;
pub mod script;

pub use config::{PffConfig, ScrConfig, ScriptMode, default_output};
pub use error::{CommandError, ConfigError};
