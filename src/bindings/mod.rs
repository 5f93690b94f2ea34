//! Artifact generation for C interfaces.
//!
//! This module provides the interface parser and the three emitters that
//! render a parsed [`SourceUnit`](crate::core::SourceUnit): the exported
//! symbol list, the standalone header and the TypeScript `cwrap` bindings.

pub mod header;
pub mod parser;
pub mod symbols;
pub mod typescript;

pub use header::generate_header;
pub use parser::InterfaceParser;
pub use symbols::SymbolListGenerator;
pub use typescript::{FfiFunction, FfiParam, TypeScriptGenerator};
