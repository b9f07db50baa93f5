//! Read-only access to a foreign application's accessibility tree.
//!
//! The editor we extract vocabulary from is an uncontrolled process; the
//! only view into it is whatever the OS accessibility layer exposes. That
//! tree is owned by the editor and can be rearranged or torn down between
//! any two calls, so everything here is modeled as a narrow, fallible,
//! read-only capability:
//! - node handles are opaque and never cached across extraction passes
//! - every probe can fail and failure always means "no data", never a crash
//! - the only durable reference to a location is an [`IndexPath`]
//!
//! Platform bindings (UI Automation, AX, AT-SPI) live in the embedding
//! application; this crate only consumes the [`UiTree`] trait.

use thiserror::Error;

mod path;

pub use path::IndexPath;

#[cfg(test)]
pub(crate) mod fixture;

/// Opaque handle to a single node in the foreign tree.
///
/// Minted by the adapter and only meaningful to the adapter that produced
/// it. Handles are not stable across refreshes of the foreign process, so
/// the engine never stores one beyond a single extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Identity of a top-level window (e.g. an HWND on Windows).
///
/// Stable for the lifetime of the window, which is what the per-window
/// path cache is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// The window currently holding input focus, as reported by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: WindowId,
    /// Full window title, e.g. `"main.py - myproject - Visual Studio Code"`.
    pub title: String,
    /// Process identity of the owning application, e.g. `"Code.exe"`.
    pub process: String,
}

/// Control roles reduced to the handful the extractor probes for.
///
/// Adapters map their platform's control-type codes onto these; anything
/// the engine has no use for collapses to [`NodeRole::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// A single tab in a tab strip (one open file).
    TabItem,
    /// A row in a tree view (one project-explorer entry).
    TreeItem,
    Tree,
    List,
    Group,
    Pane,
    Document,
    Edit,
    Text,
    Other,
}

impl NodeRole {
    /// Container roles that can plausibly host the file explorer.
    pub fn is_grouping(self) -> bool {
        matches!(
            self,
            NodeRole::Tree | NodeRole::List | NodeRole::Group | NodeRole::Pane
        )
    }

    /// Roles whose value can carry visible source text.
    pub fn is_text_bearing(self) -> bool {
        matches!(self, NodeRole::Document | NodeRole::Edit | NodeRole::Text)
    }
}

/// Accessibility state bits the extractor cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeState {
    pub focused: bool,
    pub offscreen: bool,
}

/// Failure of a single probe against the foreign tree.
///
/// These are always transient from the engine's point of view: the foreign
/// process may be busy, or the node may have been destroyed mid-call.
/// Callers treat any variant as "this probe produced no data".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node no longer exists")]
    NodeGone,
    #[error("child index {index} out of range ({len} children)")]
    ChildOutOfRange { index: usize, len: usize },
    #[error("accessibility provider unavailable: {0}")]
    Unavailable(String),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// The accessibility capability the engine consumes.
///
/// All operations are read-only; the engine never mutates the foreign
/// tree. Implementations must tolerate being called from both the
/// foreground query path and the background refresh worker.
pub trait UiTree: Send + Sync {
    /// Window currently holding input focus, if any.
    fn focused_window(&self) -> Option<WindowInfo>;

    /// Root node of the given window's accessibility tree.
    fn window_root(&self, window: WindowId) -> TreeResult<NodeId>;

    fn role(&self, node: NodeId) -> TreeResult<NodeRole>;

    fn state(&self, node: NodeId) -> TreeResult<NodeState>;

    /// Accessible name (tab label, tree row label, control title).
    fn name(&self, node: NodeId) -> TreeResult<String>;

    /// Accessible value (for text controls, the visible text content).
    fn value(&self, node: NodeId) -> TreeResult<String>;

    fn child_count(&self, node: NodeId) -> TreeResult<usize>;

    fn child(&self, node: NodeId, index: usize) -> TreeResult<NodeId>;
}
