//! Full-tree discovery traversal.
//!
//! Walks the window's whole accessibility tree once, collecting vocabulary
//! and rediscovering the three region locations the fast path depends on.
//! The walk is depth-first with hard bounds on depth, per-node fan-out and
//! wall-clock time; hitting any bound keeps whatever was found so far.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::cache::{DiscoveredPaths, ExtractionResult, MAX_EXPLORER_FILES, MAX_TAB_FILES};
use crate::tree::{IndexPath, NodeId, NodeRole, UiTree};

use super::{
    has_source_extension, looks_like_code, plausible_item_name, MAX_CHILD_SCAN,
    MAX_EXPLORER_ROW_LEN, MAX_TREE_DEPTH, TAB_DEPTH_MAX, TAB_DEPTH_MIN,
};

pub struct TraversalOutcome {
    pub result: ExtractionResult,
    pub paths: DiscoveredPaths,
    /// False when the wall-clock budget expired before the walk finished.
    pub complete: bool,
    pub nodes_visited: usize,
    pub elapsed: Duration,
}

/// Walks the tree under `root` within `budget`.
///
/// Exits early once all three regions are located and the vocabulary lists
/// are full; a timeout instead returns partial results with
/// `complete == false`.
pub fn traverse(tree: &dyn UiTree, root: NodeId, budget: Duration) -> TraversalOutcome {
    let started = Instant::now();
    let mut walker = Walker {
        tree,
        deadline: started + budget,
        tabs: Vec::new(),
        explorer: Vec::new(),
        code: None,
        paths: DiscoveredPaths::default(),
        timed_out: false,
        visited: 0,
    };
    let mut path: Vec<usize> = Vec::new();
    walker.walk(root, &mut path, 0);

    let elapsed = started.elapsed();
    if walker.timed_out {
        warn!(
            "Tree traversal hit its {:?} budget after {} nodes; keeping partial results",
            budget, walker.visited
        );
    }
    debug!(
        "Traversal visited {} nodes in {:?}: {} tabs, {} explorer items, code {}",
        walker.visited,
        elapsed,
        walker.tabs.len(),
        walker.explorer.len(),
        walker.code.is_some()
    );

    let (code_text, code_path) = match walker.code {
        Some(found) => (Some(found.text), Some(found.anchor)),
        None => (None, None),
    };
    let mut paths = walker.paths;
    paths.code_editor = code_path;

    TraversalOutcome {
        result: ExtractionResult {
            tabs: walker.tabs,
            explorer_items: walker.explorer,
            code_text,
            symbols: Vec::new(),
        },
        paths,
        complete: !walker.timed_out,
        nodes_visited: walker.visited,
        elapsed,
    }
}

struct FoundCode {
    text: String,
    /// Path of the leaf's parent; the fast path re-searches beneath it.
    anchor: IndexPath,
}

struct Walker<'a> {
    tree: &'a dyn UiTree,
    deadline: Instant,
    tabs: Vec<String>,
    explorer: Vec<String>,
    code: Option<FoundCode>,
    paths: DiscoveredPaths,
    timed_out: bool,
    visited: usize,
}

impl<'a> Walker<'a> {
    fn walk(&mut self, node: NodeId, path: &mut Vec<usize>, depth: usize) {
        if Instant::now() >= self.deadline {
            self.timed_out = true;
            return;
        }
        if depth > MAX_TREE_DEPTH || self.sufficient() {
            return;
        }
        self.visited += 1;

        let Ok(role) = self.tree.role(node) else {
            return;
        };
        match role {
            NodeRole::TabItem => self.note_tab(node, path, depth),
            NodeRole::TreeItem => self.note_explorer_row(node),
            role if role.is_text_bearing() => self.note_code_candidate(node, path),
            _ => {}
        }
        if role.is_grouping() && self.paths.explorer_container.is_none() {
            self.probe_explorer_container(node, path);
        }

        let Ok(count) = self.tree.child_count(node) else {
            return;
        };
        if count > MAX_CHILD_SCAN {
            return;
        }
        for index in 0..count {
            if self.timed_out || self.sufficient() {
                return;
            }
            let Ok(child) = self.tree.child(node, index) else {
                continue;
            };
            path.push(index);
            self.walk(child, path, depth + 1);
            path.pop();
        }
    }

    /// Everything found: stop walking, the rest of the tree is decoration.
    fn sufficient(&self) -> bool {
        self.tabs.len() >= MAX_TAB_FILES
            && self.explorer.len() >= MAX_EXPLORER_FILES
            && self.code.is_some()
    }

    fn note_tab(&mut self, node: NodeId, path: &[usize], depth: usize) {
        if self.paths.tab_container.is_none()
            && (TAB_DEPTH_MIN..=TAB_DEPTH_MAX).contains(&depth)
            && !path.is_empty()
        {
            self.paths.tab_container = Some(IndexPath::from(&path[..path.len() - 1]));
        }
        if self.tabs.len() >= MAX_TAB_FILES {
            return;
        }
        if let Ok(name) = self.tree.name(node) {
            if plausible_item_name(&name) {
                self.tabs.push(name.trim().to_string());
            }
        }
    }

    fn note_explorer_row(&mut self, node: NodeId) {
        if self.explorer.len() >= MAX_EXPLORER_FILES {
            return;
        }
        if let Ok(name) = self.tree.name(node) {
            if plausible_item_name(&name) {
                self.explorer.push(name.trim().to_string());
            }
        }
    }

    /// A container qualifies as the explorer when its first row is a short,
    /// comma-free tree item. Status bars and breadcrumb strips fail the
    /// shape test even when they reuse tree roles.
    fn probe_explorer_container(&mut self, node: NodeId, path: &[usize]) {
        let Ok(first) = self.tree.child(node, 0) else {
            return;
        };
        if self.tree.role(first) != Ok(NodeRole::TreeItem) {
            return;
        }
        let Ok(name) = self.tree.name(first) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_EXPLORER_ROW_LEN || name.contains(',') {
            return;
        }
        self.paths.explorer_container = Some(IndexPath::from(path));
    }

    /// Keeps the longest plausible code leaf seen so far; its parent
    /// becomes the editor anchor.
    fn note_code_candidate(&mut self, node: NodeId, path: &[usize]) {
        if path.is_empty() {
            return;
        }
        let Ok(value) = self.tree.value(node) else {
            return;
        };
        if value.trim().is_empty() {
            return;
        }
        if let Some(found) = &self.code {
            if value.len() <= found.text.len() {
                return;
            }
        }
        let named_source = self
            .tree
            .name(node)
            .map(|name| has_source_extension(&name))
            .unwrap_or(false);
        if looks_like_code(&value) || named_source {
            self.code = Some(FoundCode {
                text: value,
                anchor: IndexPath::from(&path[..path.len() - 1]),
            });
        }
    }
}

// ==== Tests ====
