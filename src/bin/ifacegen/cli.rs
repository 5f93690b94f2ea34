//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ifacegen::ops::{DEFAULT_FFI_TYPES_PATH, DEFAULT_INTERFACE_PATH};

/// ifacegen - Export lists, headers and TypeScript bindings from a C interface
#[derive(Parser)]
#[command(name = "ifacegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./ifacegen.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the JSON list of exported symbols
    Symbols(OutputArgs),

    /// Write a standalone C header
    Header(OutputArgs),

    /// Write the TypeScript cwrap bindings
    Ffi(FfiArgs),
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output file, or `-` for stdout
    pub destination: String,

    /// C interface source file
    #[arg(long, env = "HEADER_FILE_PATH", default_value = DEFAULT_INTERFACE_PATH)]
    pub interface: PathBuf,
}

#[derive(Args)]
pub struct FfiArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// TypeScript type declarations spliced into the module
    #[arg(long, env = "FFI_TYPES_PATH", default_value = DEFAULT_FFI_TYPES_PATH)]
    pub ffi_types: PathBuf,

    /// Rewrite `type` to `export type` in the spliced declarations
    #[arg(long)]
    pub export_types: bool,

    /// Use the asyncify class and module names
    #[arg(long)]
    pub asyncify: bool,
}
