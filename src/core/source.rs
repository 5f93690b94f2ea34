//! Parsed interface source types.
//!
//! A [`SourceUnit`] is everything the emitters need from one C interface file:
//! the verbatim `#include` and `typedef` lines plus the ordered function
//! declarations. All three artifacts are rendered from the same value.

use serde::{Deserialize, Serialize};

/// One parsed C interface file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// `#include` lines, verbatim, in source order
    pub includes: Vec<String>,

    /// `typedef` lines, verbatim (leading whitespace kept), in source order
    pub typedefs: Vec<String>,

    /// Exported function definitions, in source order
    pub declarations: Vec<Declaration>,

    /// Lines that looked like exported functions but did not match
    pub skipped: Vec<SkippedLine>,
}

impl SourceUnit {
    /// Names of all declarations, in source order.
    pub fn declaration_names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.name.as_str())
    }
}

/// A single-line exported function definition.
///
/// Declarations have no identity beyond their fields; the same name may appear
/// more than once if the source repeats it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Function name, including the exported-symbol prefix
    pub name: String,

    /// Return type exactly as written, including trailing whitespace
    pub raw_return_type: String,

    /// Text between the parentheses of the signature
    pub raw_param_list: String,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(
        name: impl Into<String>,
        raw_return_type: impl Into<String>,
        raw_param_list: impl Into<String>,
    ) -> Self {
        Declaration {
            name: name.into(),
            raw_return_type: raw_return_type.into(),
            raw_param_list: raw_param_list.into(),
        }
    }

    /// Split the parameter list into named parameters.
    ///
    /// An empty list or a lone `void` yields no parameters. An entry without a
    /// trailing identifier (`int *`) is named `argN` after its position.
    /// Entries are split on every comma, so function-pointer parameters such
    /// as `int (*cb)(int, int)` are not supported.
    pub fn params(&self) -> Vec<Param> {
        let list = self.raw_param_list.trim();
        if list.is_empty() || list == "void" {
            return Vec::new();
        }

        list.split(',')
            .enumerate()
            .map(|(index, entry)| Param::parse(entry, index))
            .collect()
    }

    /// The signature with `;` in place of the body: `<ret><name>(<params>);`
    pub fn prototype(&self) -> String {
        format!(
            "{}{}({});",
            self.raw_return_type, self.name, self.raw_param_list
        )
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name
    pub name: String,

    /// Everything before the name, trimmed
    pub raw_type: String,
}

impl Param {
    /// Create a new parameter.
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            raw_type: raw_type.into(),
        }
    }

    /// Split one comma-separated entry into its type and trailing identifier.
    fn parse(entry: &str, index: usize) -> Self {
        let entry = entry.trim();
        let ident_start = entry
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
            .last()
            .map(|(i, _)| i);

        match ident_start {
            // A bare word such as `int` is a type, not a name
            Some(start) if start > 0 => Param {
                name: entry[start..].to_string(),
                raw_type: entry[..start].trim().to_string(),
            },
            _ => Param {
                name: format!("arg{}", index),
                raw_type: entry.to_string(),
            },
        }
    }
}

/// Why a candidate line was left out of the declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Ends in `;`: a forward declaration rather than a definition
    ForwardDeclaration,
    /// The signature does not close with `) {` on the same line
    IncompleteSignature,
    /// Ends in `{` but is not `<type> <name>(<params>) {`, e.g. `static int f(void) {`
    UnrecognizedShape,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::ForwardDeclaration => write!(f, "forward declaration"),
            SkipReason::IncompleteSignature => write!(f, "signature not on a single line"),
            SkipReason::UnrecognizedShape => {
                write!(f, "does not match `<type> <name>(<params>) {{`")
            }
        }
    }
}

/// A near-miss line, kept for reporting only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number
    pub line_number: usize,

    /// The line as written
    pub text: String,

    /// Why it was skipped
    pub reason: SkipReason,
}
