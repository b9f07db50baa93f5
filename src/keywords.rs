//! Assembly of the final keyword list handed to the recognizer.
//!
//! Recognizer keyword boosting saturates quickly, so the list is a hard
//! 100 entries allocated between the two vocabulary kinds: symbols carry
//! most of the value (they are what dictation gets wrong) and get up to 70
//! slots; files fill the rest and inherit any slots symbols leave unused.
//! Within each kind, project-specific tokens outrank common English.

use std::collections::HashSet;

use crate::cache::ContentCache;
use crate::lexicon;

/// Hard ceiling on the keyword list.
pub const KEYWORD_BUDGET: usize = 100;

/// Most slots symbols may claim; the remainder is the files' floor.
pub const SYMBOL_SHARE: usize = 70;

/// Caps for the LLM-prompt variant, which tolerates far more context.
pub const PROMPT_FILE_CAP: usize = 100;
pub const PROMPT_SYMBOL_CAP: usize = 400;

const MIN_KEYWORD_LEN: usize = 2;
const MAX_KEYWORD_LEN: usize = 50;

/// The richer variant served to prompt assembly: uncapped by the keyword
/// budget and with file extensions intact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptContext {
    pub files: Vec<String>,
    pub symbols: Vec<String>,
}

impl PromptContext {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.symbols.is_empty()
    }
}

/// Builds the budgeted keyword list from one project's vocabulary.
///
/// Files are emitted first, without extensions; symbols follow verbatim.
/// A final pass drops degenerate entries and case-insensitive duplicates,
/// so the result can only come in under the budget, never over.
pub fn build_keywords(cache: &ContentCache) -> Vec<String> {
    let files = rank(merged_files(cache));
    let symbols = rank(cache.symbols.clone());

    let symbol_quota = symbols.len().min(SYMBOL_SHARE);
    let file_quota = files.len().min(KEYWORD_BUDGET - symbol_quota);

    let mut keywords = Vec::with_capacity(file_quota + symbol_quota);
    for name in files.iter().take(file_quota) {
        keywords.push(strip_extension(name));
    }
    keywords.extend(symbols.into_iter().take(symbol_quota));
    finalize(keywords)
}

/// Same merge and ranking as [`build_keywords`], with per-kind caps
/// instead of the shared budget.
pub fn build_prompt_context(cache: &ContentCache) -> PromptContext {
    let mut files = rank(merged_files(cache));
    files.truncate(PROMPT_FILE_CAP);
    let mut symbols = rank(cache.symbols.clone());
    symbols.truncate(PROMPT_SYMBOL_CAP);
    PromptContext { files, symbols }
}

/// Tab files first (the user is actively working in those), then explorer
/// entries, deduplicated case-insensitively.
fn merged_files(cache: &ContentCache) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(cache.tab_files.len() + cache.explorer_files.len());
    for name in cache.tab_files.iter().chain(cache.explorer_files.iter()) {
        if seen.insert(name.to_lowercase()) {
            merged.push(name.clone());
        }
    }
    merged
}

/// Stable sort: project-specific tokens first, longer entries before
/// shorter within the same class.
fn rank(mut items: Vec<String>) -> Vec<String> {
    items.sort_by_key(|item| {
        (
            lexicon::is_common_token(item),
            std::cmp::Reverse(item.chars().count()),
        )
    });
    items
}

/// `"app.component.ts"` becomes `"app.component"`; names without an
/// extension (including dotfiles) pass through unchanged.
fn strip_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[..idx].to_string(),
        _ => name.to_string(),
    }
}

fn finalize(keywords: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let trimmed = keyword.trim();
        let len = trimmed.chars().count();
        if len < MIN_KEYWORD_LEN || len > MAX_KEYWORD_LEN {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_string());
        }
    }
    out
}

// ==== Tests ====
