//! Decides whether the focused process is an editor we know how to read.
//!
//! Extraction heuristics assume an editor-shaped accessibility tree (tab
//! strip, explorer tree, text editor control), so only a fixed allow-list
//! of editor processes is ever probed. Everything else is left alone.

/// Process identities of supported editors, matched against the lowercased
/// executable stem (no directory, no `.exe`).
const EDITOR_PROCESSES: &[&str] = &[
    "code",
    "code - insiders",
    "codium",
    "vscodium",
    "cursor",
    "windsurf",
    "devenv",
    "idea64",
    "pycharm64",
    "webstorm64",
    "goland64",
    "clion64",
    "rider64",
    "sublime_text",
    "notepad++",
];

/// Reduces a raw process identity to a comparable stem.
///
/// `"C:\\Program Files\\Microsoft VS Code\\Code.exe"` becomes `"code"`.
fn process_stem(process: &str) -> String {
    let file = process
        .rsplit(['\\', '/'])
        .next()
        .unwrap_or(process)
        .trim();
    let lower = file.to_lowercase();
    lower
        .strip_suffix(".exe")
        .unwrap_or(&lower)
        .trim()
        .to_string()
}

/// Whether a process identity belongs to a supported editor.
///
/// # Arguments
/// * `process` - Process name as reported by the adapter, with or without
///   a path or `.exe` suffix
pub fn is_supported_editor(process: &str) -> bool {
    let stem = process_stem(process);
    EDITOR_PROCESSES.iter().any(|editor| stem == *editor)
}

// ==== Tests ====
