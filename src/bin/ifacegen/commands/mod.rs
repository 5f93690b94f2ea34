//! Command implementations

pub mod ffi;
pub mod header;
pub mod symbols;

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::OutputArgs;
use ifacegen::ops::{GenerateOptions, GenerateResult};
use ifacegen::util::{Config, Destination};

/// Build generation options shared by every mode.
pub(crate) fn options(args: &OutputArgs, config: Option<&Path>) -> Result<GenerateOptions> {
    let cwd = std::env::current_dir()?;
    let config = Config::discover(config, &cwd).context("failed to load configuration")?;

    Ok(GenerateOptions::new(Destination::parse(&args.destination))
        .with_interface(&args.interface)
        .with_config(config))
}

/// Log a summary of the generation run.
pub(crate) fn report(result: &GenerateResult) {
    tracing::debug!(
        "{} declarations, {} skipped lines, {} bytes written",
        result.declarations,
        result.skipped,
        result.bytes
    );
}
