//! The cheap extraction path: follow cached index paths, read, leave.
//!
//! Touches a handful of nodes instead of walking the tree. A miss never
//! escalates here; it just reports failure so the caller can fall back to
//! the full traversal, except for a tab path that resolves to something
//! that clearly is not a tab strip, which is nulled on the spot.

use log::debug;

use crate::cache::{ExtractionResult, PathCache, MAX_EXPLORER_FILES, MAX_TAB_FILES};
use crate::tree::{IndexPath, NodeId, NodeRole, UiTree};

use super::{
    has_source_extension, looks_like_code, plausible_item_name, CODE_SEARCH_DEPTH,
    MAX_CHILD_SCAN,
};

enum TabRead {
    Tabs(Vec<String>),
    /// The path resolved, but nothing under it has the tab role anymore.
    NotTabs,
    Unreachable,
}

struct CodeHit {
    focused: bool,
    text: String,
}

/// Reads whatever the cached paths still point at.
///
/// # Returns
/// `None` when neither tabs nor code were found; the caller should fall
/// back to a full traversal. Partial results (tabs without code, code
/// without explorer) are still returned.
pub fn extract(
    tree: &dyn UiTree,
    root: NodeId,
    cache: &mut PathCache,
) -> Option<ExtractionResult> {
    let mut result = ExtractionResult::default();

    if let Some(path) = cache.tab_container.clone() {
        match read_tabs(tree, root, &path) {
            TabRead::Tabs(names) => result.tabs = names,
            TabRead::NotTabs => {
                debug!("Cached tab path {} no longer points at tabs", path);
                cache.tab_container = None;
            }
            TabRead::Unreachable => {}
        }
    }

    if let Some(path) = cache.explorer_container.clone() {
        if let Some(items) = read_explorer(tree, root, &path) {
            result.explorer_items = items;
        }
    }

    if let Some(path) = cache.code_editor.clone() {
        if let Ok(anchor) = path.resolve(tree, root) {
            let mut best: Option<CodeHit> = None;
            find_code_leaf(tree, anchor, 0, &mut best);
            result.code_text = best.map(|hit| hit.text);
        }
    }

    if result.usable() {
        Some(result)
    } else {
        None
    }
}

fn read_tabs(tree: &dyn UiTree, root: NodeId, path: &IndexPath) -> TabRead {
    let Ok(container) = path.resolve(tree, root) else {
        return TabRead::Unreachable;
    };
    let Ok(count) = tree.child_count(container) else {
        return TabRead::Unreachable;
    };
    if count > MAX_CHILD_SCAN {
        return TabRead::Unreachable;
    }
    let mut names = Vec::new();
    let mut tab_items = 0usize;
    for index in 0..count {
        let Ok(child) = tree.child(container, index) else {
            continue;
        };
        if tree.role(child) != Ok(NodeRole::TabItem) {
            continue;
        }
        tab_items += 1;
        if names.len() >= MAX_TAB_FILES {
            continue;
        }
        if let Ok(name) = tree.name(child) {
            if plausible_item_name(&name) {
                names.push(name.trim().to_string());
            }
        }
    }
    if count > 0 && tab_items == 0 {
        return TabRead::NotTabs;
    }
    TabRead::Tabs(names)
}

fn read_explorer(tree: &dyn UiTree, root: NodeId, path: &IndexPath) -> Option<Vec<String>> {
    let container = path.resolve(tree, root).ok()?;
    let count = tree.child_count(container).ok()?;
    if count > MAX_CHILD_SCAN {
        return None;
    }
    let mut items = Vec::new();
    for index in 0..count {
        if items.len() >= MAX_EXPLORER_FILES {
            break;
        }
        let Ok(child) = tree.child(container, index) else {
            continue;
        };
        if tree.role(child) != Ok(NodeRole::TreeItem) {
            continue;
        }
        if let Ok(name) = tree.name(child) {
            if plausible_item_name(&name) {
                items.push(name.trim().to_string());
            }
        }
    }
    Some(items)
}

/// Bounded search under the cached anchor for the best on-screen text
/// leaf: focused beats unfocused, then longer text wins.
fn find_code_leaf(tree: &dyn UiTree, node: NodeId, depth: usize, best: &mut Option<CodeHit>) {
    if depth > CODE_SEARCH_DEPTH {
        return;
    }
    let state = tree.state(node).unwrap_or_default();
    if state.offscreen {
        return;
    }
    let Ok(role) = tree.role(node) else {
        return;
    };
    if role.is_text_bearing() {
        if let Ok(value) = tree.value(node) {
            if !value.trim().is_empty() {
                let named_source = tree
                    .name(node)
                    .map(|name| has_source_extension(&name))
                    .unwrap_or(false);
                if looks_like_code(&value) || named_source {
                    let candidate = CodeHit {
                        focused: state.focused,
                        text: value,
                    };
                    let wins = match best.as_ref() {
                        None => true,
                        Some(current) => {
                            (candidate.focused, candidate.text.len())
                                > (current.focused, current.text.len())
                        }
                    };
                    if wins {
                        *best = Some(candidate);
                    }
                }
            }
        }
        return;
    }
    let Ok(count) = tree.child_count(node) else {
        return;
    };
    if count > MAX_CHILD_SCAN {
        return;
    }
    for index in 0..count {
        if let Ok(child) = tree.child(node, index) {
            find_code_leaf(tree, child, depth + 1, best);
        }
    }
}

// ==== Tests ====
