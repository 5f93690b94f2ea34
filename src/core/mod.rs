//! Core data structures for ifacegen.
//!
//! This module contains the model shared by the parser and all emitters:
//! - Parsed source units and declarations
//! - C type classification for the calling convention

pub mod ctype;
pub mod source;

pub use ctype::{map_type, CallingConventionType, TypeMapping};
pub use source::{Declaration, Param, SkipReason, SkippedLine, SourceUnit};
