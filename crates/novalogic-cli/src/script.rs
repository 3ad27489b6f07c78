//! Script container conversion.

use crate::config::{ScrConfig, ScriptMode};
use crate::error::CommandError;
use novalogic_crypto::{ScriptKey, decrypt, encrypt};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Convert a buffer in the given direction.
pub fn convert(data: &[u8], mode: ScriptMode, key: ScriptKey) -> Result<Vec<u8>, CommandError> {
    let converted = match mode {
        ScriptMode::Decrypt => decrypt(data, key.value())?,
        ScriptMode::Encrypt => encrypt(data, key.value()),
    };
    Ok(converted)
}

/// Read the configured input, convert it and write the output file.
///
/// Returns the path written.
pub fn run(config: &ScrConfig) -> Result<PathBuf, CommandError> {
    config.validate()?;
    let key = config.script_key()?;

    let data = fs::read(&config.input).map_err(|source| CommandError::Read {
        path: config.input.clone(),
        source,
    })?;
    let converted = convert(&data, config.mode(), key)?;

    let output = config.output_path();
    fs::write(&output, &converted).map_err(|source| CommandError::Write {
        path: output.clone(),
        source,
    })?;

    info!(
        "{:?} {} -> {} with key {}",
        config.mode(),
        config.input.display(),
        output.display(),
        key
    );
    Ok(output)
}
