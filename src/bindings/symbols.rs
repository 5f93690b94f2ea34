//! Exported symbol list generation.
//!
//! The linker drops any function not named in the export list, so the list
//! must contain every declaration plus the allocator the host uses to pass
//! strings in and out.

use crate::core::SourceUnit;
use crate::util::config::InterfaceConfig;
use crate::util::errors::Result;

/// Generator for the JSON export list.
#[derive(Debug, Clone)]
pub struct SymbolListGenerator {
    /// Prepended to every C name
    linker_prefix: String,
    /// Appended after the declarations, in order
    runtime_symbols: Vec<String>,
}

impl Default for SymbolListGenerator {
    fn default() -> Self {
        Self::from_config(&InterfaceConfig::default())
    }
}

impl SymbolListGenerator {
    /// Create a generator with the default `_` prefix and `malloc`/`free`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator from interface settings.
    pub fn from_config(config: &InterfaceConfig) -> Self {
        SymbolListGenerator {
            linker_prefix: config.linker_prefix.clone(),
            runtime_symbols: config.runtime_symbols.clone(),
        }
    }

    /// Linker-level names, declarations first, then runtime symbols.
    pub fn symbols(&self, unit: &SourceUnit) -> Vec<String> {
        unit.declaration_names()
            .chain(self.runtime_symbols.iter().map(String::as_str))
            .map(|name| format!("{}{}", self.linker_prefix, name))
            .collect()
    }

    /// The symbol list as a compact JSON array.
    pub fn generate(&self, unit: &SourceUnit) -> Result<String> {
        Ok(serde_json::to_string(&self.symbols(unit))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::InterfaceParser;
    use crate::core::Declaration;

    #[test]
    fn test_single_declaration() {
        let unit = InterfaceParser::new().parse_content("int QTS_Add(int a, int b) {\n");
        let json = SymbolListGenerator::new().generate(&unit).unwrap();

        assert_eq!(json, r#"["_QTS_Add","_malloc","_free"]"#);
    }

    #[test]
    fn test_length_is_declarations_plus_two() {
        let generator = SymbolListGenerator::new();

        for count in [0, 1, 5] {
            let unit = SourceUnit {
                declarations: (0..count)
                    .map(|i| Declaration::new(format!("QTS_F{}", i), "int ", ""))
                    .collect(),
                ..Default::default()
            };
            assert_eq!(generator.symbols(&unit).len(), count + 2);
        }
    }

    #[test]
    fn test_empty_source_still_exports_allocator() {
        let symbols = SymbolListGenerator::new().symbols(&SourceUnit::default());
        assert_eq!(symbols, vec!["_malloc", "_free"]);
    }

    #[test]
    fn test_duplicates_are_not_collapsed() {
        let unit = InterfaceParser::new().parse_content("int QTS_A(void) {\nint QTS_A(void) {\n");
        let symbols = SymbolListGenerator::new().symbols(&unit);
        assert_eq!(symbols, vec!["_QTS_A", "_QTS_A", "_malloc", "_free"]);
    }

    #[test]
    fn test_custom_conventions() {
        let config = InterfaceConfig {
            linker_prefix: String::new(),
            runtime_symbols: vec!["calloc".to_string()],
            ..Default::default()
        };
        let unit = InterfaceParser::new().parse_content("int QTS_A(void) {\n");

        let symbols = SymbolListGenerator::from_config(&config).symbols(&unit);
        assert_eq!(symbols, vec!["QTS_A", "calloc"]);
    }
}
