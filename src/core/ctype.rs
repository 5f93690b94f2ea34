//! C type classification for the `cwrap` calling convention.
//!
//! Emscripten's `cwrap` only knows four kinds of values: numbers, strings,
//! booleans and "nothing". [`map_type`] folds an arbitrary C type string into
//! one of them and picks the TypeScript name used in generated signatures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a value crosses the compiled-module boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallingConventionType {
    /// Integers, doubles and opaque pointers
    Number,
    /// `char *`, marshalled as a host string
    String,
    /// `bool`
    Boolean,
    /// `void`, only meaningful as a return type
    None,
}

impl CallingConventionType {
    /// The `cwrap` type literal: `"number"`, `"string"`, `"boolean"` or `null`.
    pub fn as_cwrap(&self) -> &'static str {
        match self {
            CallingConventionType::Number => "\"number\"",
            CallingConventionType::String => "\"string\"",
            CallingConventionType::Boolean => "\"boolean\"",
            CallingConventionType::None => "null",
        }
    }
}

impl fmt::Display for CallingConventionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallingConventionType::Number => write!(f, "number"),
            CallingConventionType::String => write!(f, "string"),
            CallingConventionType::Boolean => write!(f, "boolean"),
            CallingConventionType::None => write!(f, "none"),
        }
    }
}

/// The classification of one raw C type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMapping {
    /// The type as written in the source
    pub raw_type: String,

    /// Calling-convention category
    pub calling_convention: CallingConventionType,

    /// TypeScript type name
    pub target_type: String,
}

/// Suffix that stands in for each level of `*` in generated type names.
pub const POINTER_SUFFIX: &str = "Pointer";

/// Classify a raw C type string.
///
/// Total: any input yields a mapping, falling back to a numeric handle named
/// after the normalized type.
pub fn map_type(raw_type: &str) -> TypeMapping {
    let normalized = normalize(raw_type);

    let (calling_convention, target_type) = if normalized.contains("char*") {
        (CallingConventionType::String, "string".to_string())
    } else {
        match normalized.as_str() {
            "bool" => (CallingConventionType::Boolean, "boolean".to_string()),
            "void" => (CallingConventionType::None, "void".to_string()),
            "double" | "int" => (CallingConventionType::Number, "number".to_string()),
            other => (
                CallingConventionType::Number,
                other.replace('*', POINTER_SUFFIX),
            ),
        }
    };

    TypeMapping {
        raw_type: raw_type.to_string(),
        calling_convention,
        target_type,
    }
}

/// Drop every `const` keyword and all whitespace.
///
/// `const char *` and `char*` both normalize to `char*`.
fn normalize(raw_type: &str) -> String {
    let mut out = String::with_capacity(raw_type.len());
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut String| {
        if word.as_str() != "const" {
            out.push_str(word);
        }
        word.clear();
    };

    for c in raw_type.chars() {
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
            continue;
        }
        flush(&mut word, &mut out);
        if !c.is_whitespace() {
            out.push(c);
        }
    }
    flush(&mut word, &mut out);

    out
}
