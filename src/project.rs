//! Project identity derived from the focused window title.
//!
//! Editors conventionally title their windows `document - project - editor
//! name`, so the second-to-last segment is the best available project
//! identity without touching the filesystem. The derived name doubles as
//! the vocabulary cache's storage key, so it has to stay path-safe.

/// Longest accepted project name; anything longer falls back to the
/// sanitized full title, truncated.
const MAX_PROJECT_NAME_LEN: usize = 48;

/// Derives the project name for a window title.
///
/// Takes the second-to-last ` - ` segment when the title follows the
/// `document - project - editor` convention; otherwise sanitizes the full
/// title. The result is always safe to use as a file name.
///
/// # Arguments
/// * `title` - Full window title, e.g. `"main.py - myproject - Visual Studio Code"`
pub fn project_from_title(title: &str) -> String {
    let cleaned = strip_dirty_marker(title.trim());
    let segments: Vec<&str> = cleaned.split(" - ").collect();
    if segments.len() >= 2 {
        let candidate = segments[segments.len() - 2].trim();
        if is_path_safe(candidate) {
            return candidate.to_string();
        }
    }
    sanitize_project_name(cleaned)
}

/// Strips the leading unsaved-changes marker some editors prepend
/// (`"● main.py - ..."` in VS Code, `"* file"` elsewhere).
fn strip_dirty_marker(title: &str) -> &str {
    title.trim_start_matches(['●', '*', '•']).trim_start()
}

fn is_path_safe(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= MAX_PROJECT_NAME_LEN
        && name.chars().all(|ch| {
            ch.is_alphanumeric() || matches!(ch, '.' | '-' | '_' | '(' | ')' | ' ')
        })
}

/// Rewrites an arbitrary string into a safe storage key: path-hostile
/// characters become underscores, surrounding dots and whitespace are
/// dropped, and the result is length-capped. Never returns an empty string.
pub fn sanitize_project_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        if ch.is_alphanumeric() || matches!(ch, '.' | '-' | '_' | '(' | ')' | ' ') {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    let name: String = out
        .trim_matches(|ch: char| ch.is_whitespace() || ch == '.')
        .chars()
        .take(MAX_PROJECT_NAME_LEN)
        .collect();
    if name.is_empty() {
        return "untitled".to_string();
    }
    name
}

// ==== Tests ====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_vscode_title() {
        assert_eq!(
            project_from_title("main.py - myproject - Visual Studio Code"),
            "myproject"
        );
    }

    #[test]
    fn test_dirty_marker_stripped() {
        assert_eq!(
            project_from_title("● main.py - myproject - Visual Studio Code"),
            "myproject"
        );
        assert_eq!(
            project_from_title("* main.py - myproject - Visual Studio Code"),
            "myproject"
        );
    }

    #[test]
    fn test_two_segment_title_uses_first() {
        // No folder open: "document - editor" still yields the second-to-last
        // segment, which is the best identity the title offers.
        assert_eq!(
            project_from_title("myproject - Visual Studio Code"),
            "myproject"
        );
    }

    #[test]
    fn test_single_segment_falls_back_to_full_title() {
        assert_eq!(
            project_from_title("Visual Studio Code"),
            "Visual Studio Code"
        );
    }

    #[test]
    fn test_unsafe_segment_falls_back_to_sanitized_title() {
        let derived = project_from_title("doc - pro/ject:name - Code");
        assert!(!derived.contains('/'));
        assert!(!derived.contains(':'));
        assert_eq!(derived, "doc - pro_ject_name - Code");
    }

    #[test]
    fn test_overlong_segment_falls_back() {
        let long = "x".repeat(80);
        let title = format!("main.py - {} - Code", long);
        let derived = project_from_title(&title);
        assert!(derived.chars().count() <= MAX_PROJECT_NAME_LEN);
    }

    #[test]
    fn test_sanitize_never_empty() {
        assert_eq!(sanitize_project_name(""), "untitled");
        assert_eq!(sanitize_project_name("   "), "untitled");
        assert_eq!(sanitize_project_name("///"), "___");
    }

    #[test]
    fn test_sanitize_trims_dots_and_spaces() {
        assert_eq!(sanitize_project_name("  .config.  "), "config");
        assert_eq!(sanitize_project_name("my project"), "my project");
    }
}
