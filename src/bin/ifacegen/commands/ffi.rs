//! `ifacegen ffi` command
//!
//! Generates the TypeScript cwrap bindings module.

use std::path::Path;

use anyhow::Result;

use crate::cli::FfiArgs;
use ifacegen::ops::{generate, Mode};

pub fn execute(args: FfiArgs, config: Option<&Path>) -> Result<()> {
    let mut opts = super::options(&args.output, config)?
        .with_ffi_types(&args.ffi_types)
        .with_asyncify(args.asyncify);

    // The flag only enables the rewrite; the config file may enable it too
    if args.export_types {
        opts.config.ffi.export_types = true;
    }

    let result = generate(Mode::Ffi, &opts)?;
    super::report(&result);
    Ok(())
}
