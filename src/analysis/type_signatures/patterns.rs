//! Type Pattern Library
//!
//! Static knowledge used while classifying Go signatures:
//! - The registry of predeclared types that serialize without adapters
//! - Patterns that locate a signature inside free-form instruction text

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Predeclared Go types treated as basic.
///
/// `error` is included because harnesses only check it for nil.
pub fn is_basic_type(name: &str) -> bool {
    matches!(
        name,
        "bool"
            | "string"
            | "int"
            | "int8"
            | "int16"
            | "int32"
            | "int64"
            | "uint"
            | "uint8"
            | "uint16"
            | "uint32"
            | "uint64"
            | "float32"
            | "float64"
            | "byte"
            | "rune"
            | "error"
    )
}

/// Float types, which make harnesses compare with a tolerance.
pub fn is_float_type(name: &str) -> bool {
    matches!(name, "float32" | "float64")
}

// One result: a parenthesized list or a single type expression. Prose after
// the type is left out.
const RESULT: &str = concat!(
    r"\([^()]*\)",
    r"|(?:\[[^\]]*\]|\*|<-[ \t]*|chan(?:<-)?[ \t]+|map\[[^\]]*\])*",
    r"(?:func[ \t]*\([^()]*\)(?:[ \t]*(?:\([^()]*\)|[A-Za-z_][\w.]*))?",
    r"|(?:struct|interface)[ \t]*\{[^{}]*\}",
    r"|[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)?)",
);

// Groups: 1 = name, 2 = parameters, 3 = optional result.
static FUNC_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\bfunc[ \t]+(?:\([^()]*\)[ \t]*)?([A-Za-z_]\w*)[ \t]*\(([^()]*)\)[ \t]*({RESULT})?"
    ))
    .unwrap()
});

static BARE_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b([A-Za-z_]\w*)[ \t]*\(([^()]*)\)[ \t]*({RESULT})?"
    ))
    .unwrap()
});

static PACKAGE_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*package[ \t]+[A-Za-z_]\w*").unwrap());

/// A signature located inside free-form text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureFragment {
    pub name: String,
    pub params: String,
    pub result: String,
}

/// Find the first signature-shaped fragment in `text`.
///
/// Occurrences introduced by `func` win over bare `Name(...)` matches.
pub fn find_signature_fragment(text: &str) -> Option<SignatureFragment> {
    [&*FUNC_SIGNATURE, &*BARE_SIGNATURE]
        .into_iter()
        .find_map(|pattern| first_non_keyword_match(pattern, text))
        .map(|caps| SignatureFragment {
            name: caps[1].to_string(),
            params: caps[2].trim().to_string(),
            result: caps.get(3).map(|m| clean_result(m.as_str())).unwrap_or_default(),
        })
}

// A keyword match restarts the search right after the keyword, so
// `if (ok) ... Check(v int)` still finds `Check`.
fn first_non_keyword_match<'t>(pattern: &Regex, text: &'t str) -> Option<Captures<'t>> {
    let mut start = 0;
    while let Some(caps) = pattern.captures_at(text, start) {
        let name = caps.get(1)?;
        if !is_keyword(name.as_str()) {
            return Some(caps);
        }
        start = name.end();
    }
    None
}

fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "break"
            | "case"
            | "chan"
            | "const"
            | "continue"
            | "default"
            | "defer"
            | "else"
            | "fallthrough"
            | "for"
            | "func"
            | "go"
            | "goto"
            | "if"
            | "import"
            | "interface"
            | "map"
            | "package"
            | "range"
            | "return"
            | "select"
            | "struct"
            | "switch"
            | "type"
            | "var"
    )
}

fn clean_result(raw: &str) -> String {
    let without_comment = raw.split("//").next().unwrap_or(raw);
    without_comment.trim().to_string()
}

/// True when the text already declares its package.
pub fn has_package_clause(text: &str) -> bool {
    PACKAGE_CLAUSE.is_match(text)
}
