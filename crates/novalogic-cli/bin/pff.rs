//! `pff` binary entry point.
//!
//! Lists, extracts or inspects one PFF archive. See `novalogic_cli::archive`
//! for the command logic.

use anyhow::{Context, Result};
use novalogic_cli::PffConfig;
use novalogic_cli::archive::{extract_all, inspect, list_entries};
use novalogic_cli::logging::init_tracing;
use novalogic_formats::pff::PffArchive;
use std::io::{self, Write};

fn main() -> Result<()> {
    let config = PffConfig::from_args();
    init_tracing(config.verbose);

    config.validate()?;

    let archive = PffArchive::open(&config.archive)
        .with_context(|| format!("Failed to open {}", config.archive.display()))?;
    tracing::debug!("{:?}", archive);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.should_list() {
        list_entries(&archive, &mut out)?;
    }

    if let Some(name) = &config.inspect {
        let summary = inspect(&archive, name).with_context(|| format!("Failed to inspect {name}"))?;
        writeln!(out, "{summary}")?;
    }

    if config.extract {
        let summary = extract_all(&archive, &config.output)?;
        writeln!(
            out,
            "Extracted {} files ({} bytes) to {}",
            summary.files,
            summary.bytes,
            config.output.display()
        )?;
        if summary.duplicates > 0 {
            writeln!(out, "Skipped {} duplicate names", summary.duplicates)?;
        }
    }

    Ok(())
}
