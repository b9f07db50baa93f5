//! Heuristic symbol mining from visible source text.
//!
//! The editor gives us a screenful of code in an unknown language, so
//! extraction is a battery of language-agnostic regexes rather than a
//! parser: declaration keywords, dotted member access, identifier shapes
//! (camelCase, PascalCase, snake_case), decorators and import lines. A
//! reserved-word stoplist then drops the tokens every language shares.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// `def name`, `class Name`, `fn name`, `let name` and friends.
static DECLARATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:fn|def|func|function|class|struct|enum|trait|impl|interface|type|let|var|val|const|namespace|module|package|record|protocol)\s+([A-Za-z_][A-Za-z0-9_]*)",
    )
    .unwrap()
});

/// The member side of dotted access: `name` in `self.name`.
static MEMBER_ACCESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.([A-Za-z_][A-Za-z0-9_]*)").unwrap());

/// The owner side of dotted access: `config` in `config.port`.
static OWNER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\.").unwrap());

static CAMEL_CASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z][a-z0-9]*[A-Z][A-Za-z0-9_]*").unwrap());

/// Needs a second hump so ordinary capitalized words don't match.
static PASCAL_CASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z0-9]+(?:[A-Z][A-Za-z0-9]*)+").unwrap());

static SNAKE_CASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z][a-z0-9]*(?:_[a-z0-9]+)+").unwrap());

/// `@decorator` and `#[attribute]` heads.
static DECORATOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[@#]\[?([A-Za-z_][A-Za-z0-9_]*)").unwrap());

/// Import targets, captured with their separators for later splitting:
/// `std::collections::HashMap`, `app.routes`, `react`.
static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:import|use|from|require|include|using)\s+([A-Za-z_][A-Za-z0-9_.:/]*)")
        .unwrap()
});

/// Keywords shared across the mainstream languages. Anything here is
/// syntax, not vocabulary, no matter how often it appears on screen.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "and", "args", "array", "assert", "async", "await", "base", "bool",
    "boolean", "break", "byte", "case", "catch", "char", "class", "const", "continue",
    "debugger", "def", "default", "defer", "del", "delete", "die", "do", "double", "echo",
    "elif", "else", "elsif", "enum", "eval", "except", "exec", "export", "extends",
    "extern", "final", "finally", "float", "fn", "for", "foreach", "from", "func",
    "function", "global", "goto", "impl", "implements", "import", "include", "inline",
    "instanceof", "int", "interface", "internal", "lambda", "let", "local", "long",
    "loop", "match", "mod", "module", "mut", "namespace", "native", "new", "nil", "none",
    "not", "null", "nullptr", "object", "operator", "override", "package", "pass",
    "print", "println", "private", "protected", "pub", "public", "raise", "readonly",
    "record", "ref", "require", "return", "sealed", "self", "short", "signed", "sizeof",
    "static", "str", "strict", "string", "struct", "super", "switch", "synchronized",
    "template", "then", "this", "throw", "throws", "trait", "transient", "true", "try",
    "typedef", "typeof", "uint", "undefined", "union", "unsafe", "unsigned", "until",
    "use", "using", "val", "var", "virtual", "void", "volatile", "when", "where",
    "while", "with", "yield", "false",
];

static RESERVED_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| RESERVED_WORDS.iter().copied().collect());

/// Pulls candidate symbols out of a block of source text.
///
/// Order reflects how the token was found: declarations first, then
/// member access, identifier shapes, decorators and imports. Duplicates
/// are dropped case-insensitively with the first spelling kept.
///
/// # Arguments
/// * `code` - Visible editor text in any language
///
/// # Returns
/// Filtered symbol list, ready for [`crate::cache::ContentCache`]
pub fn extract(code: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut symbols: Vec<String> = Vec::new();
    let mut push = |token: &str| {
        let token = token.trim();
        if !keep_symbol(token) {
            return;
        }
        if seen.insert(token.to_lowercase()) {
            symbols.push(token.to_string());
        }
    };

    for caps in DECLARATION_PATTERN.captures_iter(code) {
        if let Some(m) = caps.get(1) {
            push(m.as_str());
        }
    }
    for caps in MEMBER_ACCESS_PATTERN.captures_iter(code) {
        if let Some(m) = caps.get(1) {
            push(m.as_str());
        }
    }
    for caps in OWNER_PATTERN.captures_iter(code) {
        if let Some(m) = caps.get(1) {
            push(m.as_str());
        }
    }
    for m in CAMEL_CASE_PATTERN.find_iter(code) {
        push(m.as_str());
    }
    for m in PASCAL_CASE_PATTERN.find_iter(code) {
        push(m.as_str());
    }
    for m in SNAKE_CASE_PATTERN.find_iter(code) {
        push(m.as_str());
    }
    for caps in DECORATOR_PATTERN.captures_iter(code) {
        if let Some(m) = caps.get(1) {
            push(m.as_str());
        }
    }
    for caps in IMPORT_PATTERN.captures_iter(code) {
        if let Some(m) = caps.get(1) {
            for segment in m.as_str().split(['.', ':', '/']) {
                push(segment);
            }
        }
    }

    symbols
}

/// Filters one candidate: long enough to matter, carries a letter, not an
/// all-caps constant, not a reserved word.
fn keep_symbol(token: &str) -> bool {
    if token.chars().count() < 3 {
        return false;
    }
    if !token.chars().any(|ch| ch.is_alphabetic()) {
        return false;
    }
    if token.chars().all(|ch| ch.is_ascii_digit()) {
        return false;
    }
    let all_upper = token
        .chars()
        .filter(|ch| ch.is_alphabetic())
        .all(|ch| ch.is_uppercase());
    if all_upper {
        return false;
    }
    !RESERVED_SET.contains(token.to_lowercase().as_str())
}

// ==== Tests ====
