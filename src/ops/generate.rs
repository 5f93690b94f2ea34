//! Implementation of `ifacegen symbols`, `ifacegen header` and `ifacegen ffi`.
//!
//! All inputs are read before anything is written, so a missing ancillary file
//! never leaves a half-generated artifact behind.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::bindings::{generate_header, InterfaceParser, SymbolListGenerator, TypeScriptGenerator};
use crate::core::SourceUnit;
use crate::util::config::Config;
use crate::util::errors::{GenerateError, Result};
use crate::util::fs::{write_artifact, Destination};

/// Default interface source path.
pub const DEFAULT_INTERFACE_PATH: &str = "./c/interface.c";

/// Default ancillary TypeScript type declarations path.
pub const DEFAULT_FFI_TYPES_PATH: &str = "./ts/ffi-types.ts";

/// Which artifact to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// JSON list of exported symbols
    Symbols,
    /// Standalone C header
    Header,
    /// TypeScript `cwrap` bindings
    Ffi,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Symbols => write!(f, "symbols"),
            Mode::Header => write!(f, "header"),
            Mode::Ffi => write!(f, "ffi"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "symbols" => Ok(Mode::Symbols),
            "header" => Ok(Mode::Header),
            "ffi" => Ok(Mode::Ffi),
            _ => Err(format!(
                "invalid mode '{}'; expected 'symbols', 'header', or 'ffi'",
                s
            )),
        }
    }
}

/// Options for generating an artifact.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// C interface source file
    pub interface_path: PathBuf,

    /// Ancillary type declarations spliced into the FFI module
    pub ffi_types_path: PathBuf,

    /// Where the artifact goes
    pub destination: Destination,

    /// Use the asyncify class and module names
    pub asyncify: bool,

    /// Naming conventions
    pub config: Config,
}

impl GenerateOptions {
    /// Create options with default paths.
    pub fn new(destination: Destination) -> Self {
        GenerateOptions {
            interface_path: PathBuf::from(DEFAULT_INTERFACE_PATH),
            ffi_types_path: PathBuf::from(DEFAULT_FFI_TYPES_PATH),
            destination,
            asyncify: false,
            config: Config::default(),
        }
    }

    /// Set the interface source path.
    pub fn with_interface(mut self, path: impl Into<PathBuf>) -> Self {
        self.interface_path = path.into();
        self
    }

    /// Set the ancillary type declarations path.
    pub fn with_ffi_types(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffi_types_path = path.into();
        self
    }

    /// Select the asyncify vocabulary.
    pub fn with_asyncify(mut self, asyncify: bool) -> Self {
        self.asyncify = asyncify;
        self
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

/// Summary of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    /// Number of exported declarations found
    pub declarations: usize,

    /// Number of near-miss lines that were skipped
    pub skipped: usize,

    /// Size of the artifact in bytes, excluding the trailing newline
    pub bytes: usize,
}

/// Parse the interface and write one artifact.
pub fn generate(mode: Mode, opts: &GenerateOptions) -> Result<GenerateResult> {
    let unit = InterfaceParser::new()
        .with_symbol_prefix(opts.config.interface.symbol_prefix.clone())
        .parse_file(&opts.interface_path)?;

    let ffi_types = match mode {
        Mode::Ffi => Some(read_ffi_types(&opts.ffi_types_path)?),
        Mode::Symbols | Mode::Header => None,
    };

    let contents = render(mode, &unit, &opts.config, opts.asyncify, ffi_types.as_deref())?;
    write_artifact(&opts.destination, &contents)?;

    tracing::info!(
        "generated {} for {} declarations -> {}",
        mode,
        unit.declarations.len(),
        opts.destination
    );

    Ok(GenerateResult {
        declarations: unit.declarations.len(),
        skipped: unit.skipped.len(),
        bytes: contents.len(),
    })
}

/// Render one artifact from a parsed interface.
///
/// `ffi_types` is only used in [`Mode::Ffi`]; when absent the module is
/// generated without ancillary declarations.
pub fn render(
    mode: Mode,
    unit: &SourceUnit,
    config: &Config,
    asyncify: bool,
    ffi_types: Option<&str>,
) -> Result<String> {
    match mode {
        Mode::Symbols => SymbolListGenerator::from_config(&config.interface).generate(unit),
        Mode::Header => Ok(generate_header(unit)),
        Mode::Ffi => Ok(TypeScriptGenerator::from_config(&config.ffi, asyncify)
            .generate(unit, ffi_types.unwrap_or_default())),
    }
}

fn read_ffi_types(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| GenerateError::ReadFfiTypes {
        path: path.to_path_buf(),
        source,
    })
}
