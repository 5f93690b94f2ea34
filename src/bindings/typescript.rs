//! TypeScript `cwrap` binding generation.
//!
//! Produces a TypeScript module with one class member per exported function.
//! Each member is the result of Emscripten's `cwrap`, which converts arguments
//! and the return value according to the calling-convention types computed by
//! [`map_type`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::core::{map_type, CallingConventionType, Declaration, SourceUnit, TypeMapping};
use crate::core::ctype::POINTER_SUFFIX;
use crate::util::config::FfiConfig;

static TYPE_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\bexport\s+)?\btype\b").expect("type keyword pattern"));

/// A parameter of a generated binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FfiParam {
    /// Parameter name
    pub name: String,

    /// TypeScript type accepted by the binding, after widening
    pub target_type: String,

    /// Classification of the raw C type
    pub mapping: TypeMapping,
}

/// Descriptor for one generated binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FfiFunction {
    /// Exported function name
    pub name: String,

    /// Parameters, in declaration order
    pub params: Vec<FfiParam>,

    /// Return type classification
    pub return_type: TypeMapping,
}

impl FfiFunction {
    /// Build the descriptor for a declaration.
    ///
    /// `const_aliases` maps a const alias (`JSValueConst`) to its non-const
    /// type (`JSValue`). A parameter typed as a pointer to the alias also
    /// accepts the matching pointer to the non-const type, since the calling
    /// convention cannot tell them apart.
    pub fn from_declaration(decl: &Declaration, const_aliases: &BTreeMap<String, String>) -> Self {
        let params = decl
            .params()
            .into_iter()
            .map(|param| {
                let mapping = map_type(&param.raw_type);
                FfiParam {
                    name: param.name,
                    target_type: widen(&mapping.target_type, const_aliases),
                    mapping,
                }
            })
            .collect();

        FfiFunction {
            name: decl.name.clone(),
            params,
            return_type: map_type(decl.raw_return_type.trim()),
        }
    }

    /// `(a: T, b: U) => R`
    pub fn typescript_type(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.target_type))
            .collect::<Vec<_>>()
            .join(", ");

        format!("({}) => {}", params, self.return_type.target_type)
    }

    /// `this.module.cwrap("NAME", "ret", ["arg", ...])`
    pub fn cwrap_call(&self) -> String {
        let args = self
            .params
            .iter()
            .map(|p| p.mapping.calling_convention.as_cwrap())
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "this.module.cwrap(\"{}\", {}, [{}])",
            self.name,
            self.return_type.calling_convention.as_cwrap(),
            args
        )
    }

    /// Whether the binding returns nothing.
    pub fn returns_void(&self) -> bool {
        self.return_type.calling_convention == CallingConventionType::None
    }

    /// The class member declaration.
    fn render(&self) -> String {
        format!(
            "  {}: {} =\n    {}",
            self.name,
            self.typescript_type(),
            self.cwrap_call()
        )
    }
}

/// Widen a const-alias pointer type to also accept the non-const pointer.
fn widen(target_type: &str, const_aliases: &BTreeMap<String, String>) -> String {
    for (alias, base) in const_aliases {
        if let Some(suffix) = target_type.strip_prefix(alias.as_str()) {
            if suffix.starts_with(POINTER_SUFFIX) {
                return format!("{}{} | {}", base, suffix, target_type);
            }
        }
    }
    target_type.to_string()
}

/// Generator for the TypeScript FFI module.
#[derive(Debug, Clone)]
pub struct TypeScriptGenerator {
    /// Wrapper class name
    class_name: String,
    /// Emscripten module type taken by the constructor
    module_type: String,
    /// Import path for the module type
    module_import: String,
    /// Const alias -> non-const type
    const_aliases: BTreeMap<String, String>,
    /// Rewrite `type` to `export type` in the spliced declarations
    export_types: bool,
}

impl Default for TypeScriptGenerator {
    fn default() -> Self {
        Self::from_config(&FfiConfig::default(), false)
    }
}

impl TypeScriptGenerator {
    /// Create a generator with the default QuickJS vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator from FFI settings.
    ///
    /// `asyncify` selects the async class and module names.
    pub fn from_config(config: &FfiConfig, asyncify: bool) -> Self {
        let (class_name, module_type) = if asyncify {
            (&config.async_class_name, &config.async_module_type)
        } else {
            (&config.class_name, &config.module_type)
        };

        TypeScriptGenerator {
            class_name: class_name.clone(),
            module_type: module_type.clone(),
            module_import: config.module_import.clone(),
            const_aliases: config.const_aliases.clone(),
            export_types: config.export_types,
        }
    }

    /// Set the wrapper class name.
    pub fn with_class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = name.into();
        self
    }

    /// Set the module type and its import path.
    pub fn with_module(mut self, module_type: impl Into<String>, import: impl Into<String>) -> Self {
        self.module_type = module_type.into();
        self.module_import = import.into();
        self
    }

    /// Set whether spliced type declarations get exported.
    pub fn with_export_types(mut self, export: bool) -> Self {
        self.export_types = export;
        self
    }

    /// Binding descriptors for every declaration, in order.
    pub fn functions(&self, unit: &SourceUnit) -> Vec<FfiFunction> {
        unit.declarations
            .iter()
            .map(|decl| FfiFunction::from_declaration(decl, &self.const_aliases))
            .collect()
    }

    /// Generate the module source.
    ///
    /// `ffi_types` is spliced in as-is (apart from the optional `export`
    /// rewrite); it is never parsed.
    pub fn generate(&self, unit: &SourceUnit, ffi_types: &str) -> String {
        let members = self
            .functions(unit)
            .iter()
            .map(FfiFunction::render)
            .collect::<Vec<_>>()
            .join("\n\n");

        let ffi_types = if self.export_types {
            export_type_aliases(ffi_types)
        } else {
            ffi_types.to_string()
        };

        let mut out = String::new();
        out.push_str("// This file generated by \"ifacegen ffi\" in the root of the repo.\n");
        out.push_str(&format!(
            "import {{ {} }} from \"{}\"\n\n",
            self.module_type, self.module_import
        ));
        out.push_str(&ffi_types);
        out.push_str("\n\n");
        out.push_str("/**\n");
        out.push_str(" * Low-level FFI bindings to the Emscripten module.\n");
        out.push_str(" *\n");
        out.push_str(" * @unstable The FFI interface is considered private and may change.\n");
        out.push_str(" */\n");
        out.push_str(&format!("export class {} {{\n", self.class_name));
        out.push_str(&format!(
            "  constructor(private module: {}) {{}}\n\n",
            self.module_type
        ));
        out.push_str(&members);
        out.push_str("\n}");

        out.trim().to_string()
    }
}

/// Prefix each `type` keyword with `export`, leaving exported ones alone.
fn export_type_aliases(source: &str) -> String {
    TYPE_KEYWORD_RE
        .replace_all(source, |caps: &Captures| match caps.get(1) {
            Some(_) => caps[0].to_string(),
            None => "export type".to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::InterfaceParser;

    const FFI_TYPES: &str = "type JSContextPointer = Pointer<'JSContext'>\n\
type JSValuePointer = Pointer<'JSValue'>\n\
type JSValueConstPointer = Pointer<'JSValueConst'>\n";

    fn parse(content: &str) -> SourceUnit {
        InterfaceParser::new().parse_content(content)
    }

    #[test]
    fn test_string_return_and_const_string_param() {
        let unit = parse("char *QTS_Echo(const char *s) {\n");
        let functions = TypeScriptGenerator::new().functions(&unit);

        let echo = &functions[0];
        assert_eq!(echo.return_type.calling_convention, CallingConventionType::String);
        assert_eq!(echo.params[0].mapping.calling_convention, CallingConventionType::String);
        assert_eq!(echo.params[0].target_type, "string");
        assert_eq!(echo.cwrap_call(), r#"this.module.cwrap("QTS_Echo", "string", ["string"])"#);
    }

    #[test]
    fn test_const_alias_pointer_is_widened() {
        let unit = parse("JSValue *QTS_Dup(JSContext *ctx, JSValueConst *value) {\n");
        let functions = TypeScriptGenerator::new().functions(&unit);

        let dup = &functions[0];
        assert_eq!(dup.params[0].target_type, "JSContextPointer");
        assert_eq!(dup.params[1].target_type, "JSValuePointer | JSValueConstPointer");
        assert_eq!(dup.params[1].mapping.target_type, "JSValueConstPointer");
        assert_eq!(
            dup.typescript_type(),
            "(ctx: JSContextPointer, value: JSValuePointer | JSValueConstPointer) => JSValuePointer"
        );
    }

    #[test]
    fn test_widening_only_applies_to_pointers() {
        let aliases = FfiConfig::default().const_aliases;
        assert_eq!(widen("JSValueConst", &aliases), "JSValueConst");
        assert_eq!(widen("JSValuePointer", &aliases), "JSValuePointer");
        assert_eq!(
            widen("JSValueConstPointerPointer", &aliases),
            "JSValuePointerPointer | JSValueConstPointerPointer"
        );
    }

    #[test]
    fn test_void_and_bool_returns() {
        let unit = parse("void QTS_Free(JSRuntime *rt) {\nbool QTS_IsJob(JSRuntime *rt) {\n");
        let functions = TypeScriptGenerator::new().functions(&unit);

        assert!(functions[0].returns_void());
        assert_eq!(
            functions[0].cwrap_call(),
            r#"this.module.cwrap("QTS_Free", null, ["number"])"#
        );
        assert_eq!(functions[0].typescript_type(), "(rt: JSRuntimePointer) => void");
        assert_eq!(
            functions[1].cwrap_call(),
            r#"this.module.cwrap("QTS_IsJob", "boolean", ["number"])"#
        );
    }

    #[test]
    fn test_no_params() {
        let unit = parse("JSRuntime *QTS_NewRuntime() {\n");
        let functions = TypeScriptGenerator::new().functions(&unit);

        assert_eq!(functions[0].typescript_type(), "() => JSRuntimePointer");
        assert_eq!(
            functions[0].cwrap_call(),
            r#"this.module.cwrap("QTS_NewRuntime", "number", [])"#
        );
    }

    #[test]
    fn test_generate_module() {
        let unit = parse("int QTS_Add(int a, int b) {\nvoid QTS_Free(JSRuntime *rt) {\n");
        let module = TypeScriptGenerator::new().generate(&unit, FFI_TYPES);

        assert!(module.starts_with("// This file generated by"));
        assert!(module.contains(
            "import { QuickJSEmscriptenModule } from \"./emscripten-types\"\n\n\
type JSContextPointer = Pointer<'JSContext'>\n"
        ));
        assert!(module.contains("export class QuickJSFFI {\n"));
        assert!(module.contains("  constructor(private module: QuickJSEmscriptenModule) {}\n\n"));
        assert!(module.contains(
            "  QTS_Add: (a: number, b: number) => number =\n    \
this.module.cwrap(\"QTS_Add\", \"number\", [\"number\",\"number\"])\n\n  QTS_Free:"
        ));
        assert!(module.ends_with("[\"number\"])\n}"));
    }

    #[test]
    fn test_members_follow_declaration_order() {
        let unit = parse("int QTS_B(void) {\nint QTS_A(void) {\n");
        let module = TypeScriptGenerator::new().generate(&unit, "");

        let b = module.find("QTS_B:").unwrap();
        let a = module.find("QTS_A:").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_skipped_declaration_has_no_member() {
        let unit = parse("int QTS_Broken(int a,\n  int b) {\n");
        let module = TypeScriptGenerator::new().generate(&unit, FFI_TYPES);
        assert!(!module.contains("QTS_Broken"));
    }

    #[test]
    fn test_ffi_types_spliced_verbatim_by_default() {
        let module = TypeScriptGenerator::new().generate(&SourceUnit::default(), FFI_TYPES);
        assert!(module.contains(FFI_TYPES));
        assert!(!module.contains("export type"));
    }

    #[test]
    fn test_export_types_rewrite() {
        let source = "type A = number\nexport type B = string\ntype Typed = A // type\n";
        assert_eq!(
            export_type_aliases(source),
            "export type A = number\nexport type B = string\nexport type Typed = A // export type\n"
        );

        let module = TypeScriptGenerator::new()
            .with_export_types(true)
            .generate(&SourceUnit::default(), FFI_TYPES);
        assert!(module.contains("export type JSValuePointer = Pointer<'JSValue'>"));
    }

    #[test]
    fn test_asyncify_vocabulary() {
        let generator = TypeScriptGenerator::from_config(&FfiConfig::default(), true);
        let module = generator.generate(&SourceUnit::default(), "");

        assert!(module.contains("import { QuickJSAsyncEmscriptenModule } from"));
        assert!(module.contains("export class QuickJSAsyncFFI {"));
        assert!(module.contains("constructor(private module: QuickJSAsyncEmscriptenModule) {}"));
    }

    #[test]
    fn test_builder_overrides() {
        let module = TypeScriptGenerator::new()
            .with_class_name("LibFFI")
            .with_module("LibModule", "./lib-module")
            .generate(&SourceUnit::default(), "");

        assert!(module.contains("import { LibModule } from \"./lib-module\""));
        assert!(module.contains("export class LibFFI {"));
    }
}
