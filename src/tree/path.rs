//! Index paths: the only durable way to point at a node.
//!
//! Node handles go stale whenever the editor redraws, so a cached location
//! is remembered as the sequence of child indices that reached it from the
//! window root. Re-resolving the path is cheap (one `child()` hop per
//! element) and failure at any hop simply means the location is gone.

use std::fmt;

use super::{NodeId, TreeResult, UiTree};

/// Sequence of child indices from a window root down to a node.
///
/// An empty path refers to the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexPath(Vec<usize>);

impl IndexPath {
    pub fn new() -> Self {
        IndexPath(Vec::new())
    }

    /// Number of hops from the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    /// Path to this node's parent, or `None` for the root.
    pub fn parent(&self) -> Option<IndexPath> {
        if self.0.is_empty() {
            return None;
        }
        Some(IndexPath(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Walk the path from `root`, one `child()` hop per element.
    ///
    /// # Returns
    /// The node the path currently points at, or the first hop's error if
    /// the structure underneath has changed.
    pub fn resolve(&self, tree: &dyn UiTree, root: NodeId) -> TreeResult<NodeId> {
        let mut node = root;
        for &index in &self.0 {
            node = tree.child(node, index)?;
        }
        Ok(node)
    }
}

impl From<Vec<usize>> for IndexPath {
    fn from(indices: Vec<usize>) -> Self {
        IndexPath(indices)
    }
}

impl From<&[usize]> for IndexPath {
    fn from(indices: &[usize]) -> Self {
        IndexPath(indices.to_vec())
    }
}

impl fmt::Display for IndexPath {
    /// Renders as `/3/0/7`; the bare root renders as `/`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

// ==== Tests ====
