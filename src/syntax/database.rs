//! Built-in syntax table.

use super::profile::{HighlightFlags, SyntaxProfile, SyntaxTable};

const C_KEYWORDS: &[&str] = &[
    "switch", "if", "while", "for", "break", "continue", "return", "else", "struct", "union",
    "typedef", "static", "enum", "class", "case", "default", "do", "goto", "sizeof", "const",
    "extern", "volatile", "namespace", "template", "public", "private", "protected", "virtual",
    "new", "delete", "true", "false", "nullptr", "NULL",
];

const C_TYPES: &[&str] = &[
    "int", "long", "double", "float", "char", "unsigned", "signed", "void", "short", "bool",
    "size_t", "auto",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

const RUST_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
    "f32", "f64", "bool", "char", "str", "String", "Vec", "Option", "Result", "Box",
];

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "break", "case", "catch", "checked", "class", "const", "continue",
    "default", "delegate", "do", "else", "enum", "event", "explicit", "extern", "false",
    "finally", "fixed", "for", "foreach", "goto", "if", "implicit", "in", "interface",
    "internal", "is", "lock", "namespace", "new", "null", "operator", "out", "override",
    "params", "private", "protected", "public", "readonly", "ref", "return", "sealed", "sizeof",
    "stackalloc", "static", "struct", "switch", "this", "throw", "true", "try", "typeof",
    "unchecked", "unsafe", "using", "virtual", "volatile", "while", "async", "await", "get",
    "init", "nameof", "partial", "record", "required", "set", "value", "when", "where", "with",
    "yield",
];

const CSHARP_TYPES: &[&str] = &[
    "var", "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "nint",
    "nuint", "long", "ulong", "short", "ushort", "object", "string", "dynamic",
];

const MAKE_KEYWORDS: &[&str] = &["ifeq", "ifneq", "ifdef", "ifndef", "else", "endif", "include", "define", "endef"];

/// The profiles shipped with the editor, in lookup order.
pub fn builtin() -> SyntaxTable {
    let code = HighlightFlags::NUMBERS | HighlightFlags::STRINGS;
    SyntaxTable::new(vec![
        SyntaxProfile::new("c")
            .with_file_matches([".c", ".h", ".cpp", ".hpp", ".cc"])
            .with_single_line_comment("//")
            .with_multi_line_comment("/*", "*/")
            .with_keywords1(C_KEYWORDS.iter().copied())
            .with_keywords2(C_TYPES.iter().copied())
            .with_flags(code),
        SyntaxProfile::new("rust")
            .with_file_matches([".rs"])
            .with_single_line_comment("//")
            .with_multi_line_comment("/*", "*/")
            .with_keywords1(RUST_KEYWORDS.iter().copied())
            .with_keywords2(RUST_TYPES.iter().copied())
            .with_flags(code),
        SyntaxProfile::new("csharp")
            .with_file_matches([".cs"])
            .with_single_line_comment("//")
            .with_multi_line_comment("/*", "*/")
            .with_keywords1(CSHARP_KEYWORDS.iter().copied())
            .with_keywords2(CSHARP_TYPES.iter().copied())
            .with_flags(code),
        SyntaxProfile::new("make")
            .with_file_matches(["Makefile", "makefile", "GNUmakefile", ".mk"])
            .with_single_line_comment("#")
            .with_keywords1(MAKE_KEYWORDS.iter().copied())
            .with_flags(HighlightFlags::STRINGS),
    ])
}
