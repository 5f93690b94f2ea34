//! High-level operations.
//!
//! This module contains the implementation of ifacegen commands.

pub mod generate;

pub use generate::{
    generate, render, GenerateOptions, GenerateResult, Mode, DEFAULT_FFI_TYPES_PATH,
    DEFAULT_INTERFACE_PATH,
};
