//! ifacegen - Export lists, headers and TypeScript bindings from a C interface
//!
//! This crate parses a single C interface source file and renders three
//! artifacts from the same declarations: the linker export list, a standalone
//! header, and an Emscripten `cwrap` binding module.

pub mod bindings;
pub mod core;
pub mod ops;
pub mod util;

pub use bindings::{generate_header, InterfaceParser, SymbolListGenerator, TypeScriptGenerator};
pub use crate::core::{map_type, CallingConventionType, Declaration, Param, SourceUnit, TypeMapping};
pub use ops::{generate, GenerateOptions, Mode};
pub use util::{Config, Destination, GenerateError};
