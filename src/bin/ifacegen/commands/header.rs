//! `ifacegen header` command

use std::path::Path;

use anyhow::Result;

use crate::cli::OutputArgs;
use ifacegen::ops::{generate, Mode};

pub fn execute(args: OutputArgs, config: Option<&Path>) -> Result<()> {
    let opts = super::options(&args, config)?;
    let result = generate(Mode::Header, &opts)?;
    super::report(&result);
    Ok(())
}
