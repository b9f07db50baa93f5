//! Extraction of vocabulary from an editor's accessibility tree.
//!
//! Two strategies share the heuristics in this module:
//! - [`fast`] jumps straight to cached locations and reads them
//! - [`full`] walks the whole tree to rediscover those locations
//!
//! Both only ever read; neither assumes the tree holds still between
//! probes.

pub mod fast;
pub mod full;
pub mod symbols;

/// Maximum recursion depth for the full traversal. Editor trees run deep
/// (VS Code nests 20+ levels) but anything past this is decoration.
pub(crate) const MAX_TREE_DEPTH: usize = 35;

/// Nodes reporting more children than this are skipped outright rather
/// than enumerated; such counts are virtualized lists or degenerate nodes.
pub(crate) const MAX_CHILD_SCAN: usize = 128;

/// Depth window in which a tab strip plausibly lives. The title bar's tab
/// impostors sit above it; list rows inside widgets sit below.
pub(crate) const TAB_DEPTH_MIN: usize = 3;
pub(crate) const TAB_DEPTH_MAX: usize = 24;

/// How deep the fast path searches under the cached editor anchor for the
/// text leaf itself.
pub(crate) const CODE_SEARCH_DEPTH: usize = 12;

/// Explorer rows are short file or folder names; a long or comma-ridden
/// first child marks a status line or breadcrumb, not a file tree.
pub(crate) const MAX_EXPLORER_ROW_LEN: usize = 64;

/// File extensions that mark a node name as a source document.
const SOURCE_EXTENSIONS: &[&str] = &[
    "rs", "py", "js", "ts", "jsx", "tsx", "mjs", "cjs", "java", "kt", "kts", "go", "rb",
    "php", "c", "h", "cpp", "hpp", "cc", "hh", "cs", "swift", "m", "mm", "scala", "sh",
    "bash", "zsh", "ps1", "bat", "sql", "html", "htm", "css", "scss", "less", "json",
    "yaml", "yml", "toml", "ini", "xml", "md", "rst", "vue", "svelte", "astro", "dart",
    "lua", "r", "jl", "ex", "exs", "erl", "hs", "ml", "clj", "cljs", "groovy", "gradle",
    "proto", "zig", "nim", "v", "sv", "tf", "dockerfile", "makefile", "cmake",
];

/// Markers that identify editor text without needing a parser. One keyword
/// marker is decisive; bare punctuation needs several distinct kinds to
/// avoid flagging prose with parentheses.
const CODE_KEYWORD_MARKERS: &[&str] = &[
    "def ", "class ", "function ", "func ", "fn ", "import ", "export ", "#include",
    "return ", "const ", "public ", "private ", "=>",
];

const CODE_STRUCTURAL_MARKERS: &[char] = &['{', '}', ';', '=', '(', ')'];

/// Whether a node name carries a recognized source-file extension.
pub(crate) fn has_source_extension(name: &str) -> bool {
    let name = name.trim();
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        }
        _ => false,
    }
}

/// Cheap "is this source code" test for a control's text value.
pub(crate) fn looks_like_code(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    if CODE_KEYWORD_MARKERS
        .iter()
        .any(|marker| trimmed.contains(marker))
    {
        return true;
    }
    if trimmed.len() < 10 {
        return false;
    }
    let distinct = CODE_STRUCTURAL_MARKERS
        .iter()
        .filter(|&&marker| trimmed.contains(marker))
        .count();
    distinct >= 3
}

/// Whether a tab or explorer row label is worth recording.
pub(crate) fn plausible_item_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= 200
}

// ==== Tests ====
