//! Error types for artifact generation.
//!
//! Parsing and type mapping cannot fail; every error here comes from the I/O
//! boundary or from a malformed configuration file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error while generating an artifact.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to read interface source: {}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read FFI type declarations: {}", .path.display())]
    ReadFfiTypes {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write artifact: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config file: {}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file: {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize symbol list")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
