//! Standalone header generation.
//!
//! Rebuilds a header from the interface source: includes, then typedefs, then
//! one prototype per exported function. Blocks are separated by one blank line
//! and keep their position even when empty.

use crate::core::SourceUnit;

/// Render the header for a parsed interface.
pub fn generate_header(unit: &SourceUnit) -> String {
    let includes = unit.includes.join("\n");
    let typedefs = unit.typedefs.join("\n");
    let prototypes = unit
        .declarations
        .iter()
        .map(|decl| decl.prototype())
        .collect::<Vec<_>>()
        .join("\n");

    [includes, typedefs, prototypes].join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::InterfaceParser;
    use std::collections::BTreeSet;

    const INTERFACE: &str = "#include <stdio.h>\n\
#include \"quickjs.h\"\n\
typedef JSValue JSValueConst;\n\
\n\
int QTS_Add(int a, int b) {\n\
  return a + b;\n\
}\n\
char * QTS_Echo(const char *s) {\n\
  return s;\n\
}\n\
#include <stdio.h>\n";

    #[test]
    fn test_header_layout() {
        let unit = InterfaceParser::new().parse_content(INTERFACE);
        let header = generate_header(&unit);

        assert_eq!(
            header,
            "#include <stdio.h>\n\
#include \"quickjs.h\"\n\
#include <stdio.h>\n\
\n\
typedef JSValue JSValueConst;\n\
\n\
int QTS_Add(int a, int b);\n\
char * QTS_Echo(const char *s);"
        );
    }

    #[test]
    fn test_header_ends_with_prototype() {
        let unit = InterfaceParser::new().parse_content("int QTS_Add(int a, int b) {\n");
        let header = generate_header(&unit);

        assert!(header.ends_with("\nint QTS_Add(int a, int b);"));
        assert_eq!(header, "\n\n\n\nint QTS_Add(int a, int b);");
    }

    #[test]
    fn test_skipped_line_is_absent() {
        let unit = InterfaceParser::new()
            .parse_content("int QTS_Broken(int a,\n  int b) {\n}\nint QTS_Ok(void) {\n");
        let header = generate_header(&unit);

        assert!(!header.contains("QTS_Broken"));
        assert!(header.contains("int QTS_Ok(void);"));
    }

    #[test]
    fn test_reparsing_header_yields_same_names() {
        let unit = InterfaceParser::new().parse_content(INTERFACE);
        let header = generate_header(&unit);

        let reparsed = InterfaceParser::new()
            .with_prototypes(true)
            .parse_content(&header);

        let original: BTreeSet<_> = unit.declaration_names().collect();
        let roundtrip: BTreeSet<_> = reparsed.declaration_names().collect();
        assert_eq!(original, roundtrip);
        assert_eq!(reparsed.includes, unit.includes);
        assert_eq!(reparsed.typedefs, unit.typedefs);
    }
}
