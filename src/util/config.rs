//! Configuration file support for ifacegen.
//!
//! The config file (`ifacegen.toml` in the working directory, or an explicit
//! `--config` path) describes the naming conventions of the interface being
//! processed. Input and output paths are not configured here; they come from
//! the command line or environment.
//!
//! ```toml
//! [interface]
//! symbol_prefix = "QTS_"
//! runtime_symbols = ["malloc", "free"]
//!
//! [ffi]
//! class_name = "QuickJSFFI"
//! const_aliases = { JSValueConst = "JSValue" }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::errors::{GenerateError, Result};

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "ifacegen.toml";

/// ifacegen configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Interface naming conventions
    pub interface: InterfaceConfig,

    /// Generated TypeScript module settings
    pub ffi: FfiConfig,
}

/// Naming conventions of the C interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterfaceConfig {
    /// Prefix a function name must carry to be exported
    pub symbol_prefix: String,

    /// Character(s) the linker prepends to C symbols
    pub linker_prefix: String,

    /// Runtime symbols always kept alive, appended after the declarations
    pub runtime_symbols: Vec<String>,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        InterfaceConfig {
            symbol_prefix: "QTS_".to_string(),
            linker_prefix: "_".to_string(),
            runtime_symbols: vec!["malloc".to_string(), "free".to_string()],
        }
    }
}

/// Settings for the generated TypeScript module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FfiConfig {
    /// Name of the generated wrapper class
    pub class_name: String,

    /// Emscripten module type taken by the constructor
    pub module_type: String,

    /// Wrapper class name when generating the asyncify build
    pub async_class_name: String,

    /// Module type when generating the asyncify build
    pub async_module_type: String,

    /// Import path the module type is loaded from
    pub module_import: String,

    /// Const alias -> non-const type; parameters typed with the alias also
    /// accept the non-const pointer
    pub const_aliases: BTreeMap<String, String>,

    /// Rewrite `type` to `export type` in the spliced type declarations
    pub export_types: bool,
}

impl Default for FfiConfig {
    fn default() -> Self {
        let mut const_aliases = BTreeMap::new();
        const_aliases.insert("JSValueConst".to_string(), "JSValue".to_string());

        FfiConfig {
            class_name: "QuickJSFFI".to_string(),
            module_type: "QuickJSEmscriptenModule".to_string(),
            async_class_name: "QuickJSAsyncFFI".to_string(),
            async_module_type: "QuickJSAsyncEmscriptenModule".to_string(),
            module_import: "./emscripten-types".to_string(),
            const_aliases,
            export_types: false,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            GenerateError::ReadConfig {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&contents).map_err(|source| GenerateError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must load. Otherwise `ifacegen.toml` in `cwd` is used
    /// when present, and must load too; only its absence yields defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = project_config_path(cwd);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        tracing::debug!("loading config from {}", path.display());
        Self::load(&path)
    }
}

/// Get the project config path (`ifacegen.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}
