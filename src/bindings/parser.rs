//! C interface parser.
//!
//! Extracts `#include` lines, `typedef` lines and exported function definitions
//! from a C source file. This is line-shape matching, not a C grammar: a
//! function is only recognized when its whole signature and the opening brace
//! sit on one line.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::{Declaration, SkipReason, SkippedLine, SourceUnit};
use crate::util::errors::{GenerateError, Result};

/// `<ret><name>(<params>) {` with an optional `;` terminator in prototype mode.
static DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w*]+[ \t*]+)(\w+)\((.*?)\) ?(\{|;)$").expect("declaration pattern")
});

/// Anything that starts like a function signature, including ones with extra
/// leading words such as `static` or `inline`.
static CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[\w*]+[ \t*]+)+(\w+)\(").expect("candidate pattern")
});

static TYPEDEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*typedef[ \t]+\S").expect("typedef pattern"));

/// Parser for C interface files.
#[derive(Debug, Clone)]
pub struct InterfaceParser {
    /// Prefix an exported function name must start with
    symbol_prefix: String,
    /// Also accept `;`-terminated prototypes
    prototypes: bool,
}

impl Default for InterfaceParser {
    fn default() -> Self {
        InterfaceParser {
            symbol_prefix: "QTS_".to_string(),
            prototypes: false,
        }
    }
}

impl InterfaceParser {
    /// Create a new interface parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exported-symbol prefix.
    pub fn with_symbol_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.symbol_prefix = prefix.into();
        self
    }

    /// Accept prototypes ending in `;` as well as definitions.
    ///
    /// Used to read back a generated header.
    pub fn with_prototypes(mut self, prototypes: bool) -> Self {
        self.prototypes = prototypes;
        self
    }

    /// Parse an interface file.
    pub fn parse_file(&self, path: &Path) -> Result<SourceUnit> {
        let content =
            std::fs::read_to_string(path).map_err(|source| GenerateError::ReadInput {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(self.parse_content(&content))
    }

    /// Parse interface content.
    ///
    /// Never fails: lines that do not match are skipped.
    pub fn parse_content(&self, content: &str) -> SourceUnit {
        let unit = SourceUnit {
            includes: self.parse_includes(content),
            typedefs: self.parse_typedefs(content),
            declarations: self.parse_declarations(content),
            skipped: self.find_skipped(content),
        };

        for skipped in &unit.skipped {
            match skipped.reason {
                SkipReason::IncompleteSignature | SkipReason::UnrecognizedShape => {
                    tracing::warn!(
                        "line {}: skipping `{}` ({})",
                        skipped.line_number,
                        skipped.text.trim(),
                        skipped.reason
                    )
                }
                SkipReason::ForwardDeclaration => tracing::debug!(
                    "line {}: skipping `{}` ({})",
                    skipped.line_number,
                    skipped.text.trim(),
                    skipped.reason
                ),
            }
        }

        tracing::debug!(
            "parsed {} includes, {} typedefs, {} declarations",
            unit.includes.len(),
            unit.typedefs.len(),
            unit.declarations.len()
        );

        unit
    }

    /// Lines beginning with `#include`, verbatim.
    fn parse_includes(&self, content: &str) -> Vec<String> {
        content
            .lines()
            .filter(|line| line.starts_with("#include"))
            .map(str::to_string)
            .collect()
    }

    /// Lines beginning with optional indentation and `typedef`, verbatim.
    fn parse_typedefs(&self, content: &str) -> Vec<String> {
        content
            .lines()
            .filter(|line| TYPEDEF_RE.is_match(line))
            .map(str::to_string)
            .collect()
    }

    /// Exported single-line function definitions.
    fn parse_declarations(&self, content: &str) -> Vec<Declaration> {
        content
            .lines()
            .filter_map(|line| self.match_declaration(line))
            .collect()
    }

    fn match_declaration(&self, line: &str) -> Option<Declaration> {
        let cap = DECL_RE.captures(line)?;

        let terminator = cap.get(4).map_or("", |m| m.as_str());
        if terminator == ";" && !self.prototypes {
            return None;
        }

        let name = cap.get(2).map_or("", |m| m.as_str());
        if !name.starts_with(&self.symbol_prefix) {
            return None;
        }

        Some(Declaration {
            name: name.to_string(),
            raw_return_type: cap.get(1).map_or("", |m| m.as_str()).to_string(),
            raw_param_list: cap.get(3).map_or("", |m| m.as_str()).to_string(),
        })
    }

    /// Prefixed signatures that did not make it into the declarations.
    fn find_skipped(&self, content: &str) -> Vec<SkippedLine> {
        content
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let name = CANDIDATE_RE.captures(line)?.get(1)?.as_str();
                if !name.starts_with(&self.symbol_prefix) || self.match_declaration(line).is_some()
                {
                    return None;
                }

                let trimmed = line.trim_end();
                let reason = if trimmed.ends_with(';') {
                    SkipReason::ForwardDeclaration
                } else if trimmed.ends_with('{') {
                    SkipReason::UnrecognizedShape
                } else {
                    SkipReason::IncompleteSignature
                };

                Some(SkippedLine {
                    line_number: index + 1,
                    text: line.to_string(),
                    reason,
                })
            })
            .collect()
    }
}
