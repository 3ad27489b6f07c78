//! `scr` binary entry point.
//!
//! Encrypts or decrypts one script file with a title key.

use anyhow::Result;
use novalogic_cli::ScrConfig;
use novalogic_cli::logging::init_tracing;
use novalogic_cli::script::run;

fn main() -> Result<()> {
    let config = ScrConfig::from_args();
    init_tracing(config.verbose);

    let output = run(&config)?;
    println!("{}", output.display());

    Ok(())
}
