//! In-memory [`UiTree`] used by tests.
//!
//! Builds an editor-shaped tree that can be mutated mid-test (nodes
//! removed, roles changed, children shifted) to simulate the foreign
//! process redrawing underneath us. Every probe is counted so tests can
//! assert that cheap paths stay cheap, and an optional per-probe delay
//! simulates a slow accessibility provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{NodeId, NodeRole, NodeState, TreeError, TreeResult, UiTree, WindowId, WindowInfo};

struct FakeNode {
    role: NodeRole,
    state: NodeState,
    name: String,
    value: String,
    children: Vec<u64>,
    alive: bool,
}

struct WindowEntry {
    title: String,
    process: String,
    root: u64,
}

#[derive(Default)]
struct TreeData {
    nodes: HashMap<u64, FakeNode>,
    windows: HashMap<u64, WindowEntry>,
    focused: Option<u64>,
    next_id: u64,
}

pub(crate) struct FakeTree {
    data: Mutex<TreeData>,
    probes: AtomicUsize,
    probe_delay: Mutex<Option<Duration>>,
}

impl FakeTree {
    pub fn new() -> Self {
        FakeTree {
            data: Mutex::new(TreeData::default()),
            probes: AtomicUsize::new(0),
            probe_delay: Mutex::new(None),
        }
    }

    /// Creates a window plus its root pane node and focuses it.
    pub fn add_window(&self, id: u64, title: &str, process: &str) -> NodeId {
        let mut data = self.data.lock().unwrap();
        let root = data.next_id;
        data.next_id += 1;
        data.nodes.insert(
            root,
            FakeNode {
                role: NodeRole::Pane,
                state: NodeState::default(),
                name: title.to_string(),
                value: String::new(),
                children: Vec::new(),
                alive: true,
            },
        );
        data.windows.insert(
            id,
            WindowEntry {
                title: title.to_string(),
                process: process.to_string(),
                root,
            },
        );
        data.focused = Some(id);
        NodeId(root)
    }

    pub fn focus_window(&self, id: u64) {
        self.data.lock().unwrap().focused = Some(id);
    }

    pub fn clear_focus(&self) {
        self.data.lock().unwrap().focused = None;
    }

    pub fn set_title(&self, window: u64, title: &str) {
        if let Some(entry) = self.data.lock().unwrap().windows.get_mut(&window) {
            entry.title = title.to_string();
        }
    }

    pub fn add_node(&self, parent: NodeId, role: NodeRole, name: &str) -> NodeId {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id;
        data.next_id += 1;
        data.nodes.insert(
            id,
            FakeNode {
                role,
                state: NodeState::default(),
                name: name.to_string(),
                value: String::new(),
                children: Vec::new(),
                alive: true,
            },
        );
        if let Some(node) = data.nodes.get_mut(&parent.0) {
            node.children.push(id);
        }
        NodeId(id)
    }

    /// Inserts a child at `index`, shifting existing siblings right. Used to
    /// simulate the editor rearranging its layout under cached paths.
    pub fn insert_node_at(
        &self,
        parent: NodeId,
        index: usize,
        role: NodeRole,
        name: &str,
    ) -> NodeId {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id;
        data.next_id += 1;
        data.nodes.insert(
            id,
            FakeNode {
                role,
                state: NodeState::default(),
                name: name.to_string(),
                value: String::new(),
                children: Vec::new(),
                alive: true,
            },
        );
        if let Some(node) = data.nodes.get_mut(&parent.0) {
            let at = index.min(node.children.len());
            node.children.insert(at, id);
        }
        NodeId(id)
    }

    pub fn set_value(&self, node: NodeId, value: &str) {
        if let Some(n) = self.data.lock().unwrap().nodes.get_mut(&node.0) {
            n.value = value.to_string();
        }
    }

    pub fn set_state(&self, node: NodeId, focused: bool, offscreen: bool) {
        if let Some(n) = self.data.lock().unwrap().nodes.get_mut(&node.0) {
            n.state = NodeState { focused, offscreen };
        }
    }

    pub fn set_role(&self, node: NodeId, role: NodeRole) {
        if let Some(n) = self.data.lock().unwrap().nodes.get_mut(&node.0) {
            n.role = role;
        }
    }

    /// Marks the node dead and detaches it from its parent.
    pub fn remove_node(&self, node: NodeId) {
        let mut data = self.data.lock().unwrap();
        if let Some(n) = data.nodes.get_mut(&node.0) {
            n.alive = false;
        }
        for n in data.nodes.values_mut() {
            n.children.retain(|&c| c != node.0);
        }
    }

    /// Total probes served so far, across all trait methods.
    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    /// Adds an artificial delay to every probe, simulating a slow provider.
    pub fn set_probe_delay(&self, delay: Duration) {
        *self.probe_delay.lock().unwrap() = Some(delay);
    }

    fn probe(&self) {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let delay = *self.probe_delay.lock().unwrap();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
    }

    fn with_node<T>(&self, node: NodeId, f: impl FnOnce(&FakeNode) -> T) -> TreeResult<T> {
        let data = self.data.lock().unwrap();
        match data.nodes.get(&node.0) {
            Some(n) if n.alive => Ok(f(n)),
            _ => Err(TreeError::NodeGone),
        }
    }
}

impl UiTree for FakeTree {
    fn focused_window(&self) -> Option<WindowInfo> {
        self.probe();
        let data = self.data.lock().unwrap();
        let id = data.focused?;
        let entry = data.windows.get(&id)?;
        Some(WindowInfo {
            id: WindowId(id),
            title: entry.title.clone(),
            process: entry.process.clone(),
        })
    }

    fn window_root(&self, window: WindowId) -> TreeResult<NodeId> {
        self.probe();
        let data = self.data.lock().unwrap();
        data.windows
            .get(&window.0)
            .map(|entry| NodeId(entry.root))
            .ok_or(TreeError::NodeGone)
    }

    fn role(&self, node: NodeId) -> TreeResult<NodeRole> {
        self.probe();
        self.with_node(node, |n| n.role)
    }

    fn state(&self, node: NodeId) -> TreeResult<NodeState> {
        self.probe();
        self.with_node(node, |n| n.state)
    }

    fn name(&self, node: NodeId) -> TreeResult<String> {
        self.probe();
        self.with_node(node, |n| n.name.clone())
    }

    fn value(&self, node: NodeId) -> TreeResult<String> {
        self.probe();
        self.with_node(node, |n| n.value.clone())
    }

    fn child_count(&self, node: NodeId) -> TreeResult<usize> {
        self.probe();
        self.with_node(node, |n| n.children.len())
    }

    fn child(&self, node: NodeId, index: usize) -> TreeResult<NodeId> {
        self.probe();
        self.with_node(node, |n| {
            n.children
                .get(index)
                .copied()
                .map(NodeId)
                .ok_or(TreeError::ChildOutOfRange {
                    index,
                    len: n.children.len(),
                })
        })?
    }
}

/// Sample source text shown in the fixture's editor control.
pub(crate) const SAMPLE_CODE: &str = "import os\n\nclass AppServer:\n    def __init__(self):\n        self.port = 8080\n\n    def getUserName(self):\n        return self.name\n";

/// A ready-made VS Code-shaped window with handles to the interesting nodes.
pub(crate) struct EditorFixture {
    pub tree: Arc<FakeTree>,
    pub window: WindowId,
    pub root: NodeId,
    pub tab_strip: NodeId,
    pub explorer_list: NodeId,
    pub editor_group: NodeId,
    pub editor_leaf: NodeId,
    /// Index path of the tab container under the root.
    pub tab_path: super::IndexPath,
    /// Index path of the explorer container under the root.
    pub explorer_path: super::IndexPath,
    /// Index path of the editor leaf's parent group under the root.
    pub editor_path: super::IndexPath,
}

/// Builds the standard fixture tree:
///
/// ```text
/// root (Pane)
/// └─ 0 workbench (Group)
///    ├─ 0 titlebar (Pane) ── 0 title (Text)
///    ├─ 1 sidebar (Group)
///    │  ├─ 0 "EXPLORER" (Text)
///    │  └─ 1 folders (Tree) ── TreeItem rows
///    ├─ 2 editor-area (Group)
///    │  ├─ 0 tabs (List) ── TabItem per open file
///    │  └─ 1 editor (Group) ── 0 code (Edit, value = SAMPLE_CODE)
///    └─ 3 panel (Group) ── 40 status Text nodes
/// ```
///
/// The panel is pure decoration, there so the tree has the bulk of a real
/// editor window rather than just the three interesting regions.
pub(crate) fn editor_fixture() -> EditorFixture {
    let tree = Arc::new(FakeTree::new());
    let root = tree.add_window(1, "main.py - myproject - Visual Studio Code", "Code.exe");

    let workbench = tree.add_node(root, NodeRole::Group, "workbench");

    let titlebar = tree.add_node(workbench, NodeRole::Pane, "titlebar");
    tree.add_node(titlebar, NodeRole::Text, "main.py - myproject - Visual Studio Code");

    let sidebar = tree.add_node(workbench, NodeRole::Group, "sidebar");
    tree.add_node(sidebar, NodeRole::Text, "EXPLORER");
    let explorer_list = tree.add_node(sidebar, NodeRole::Tree, "folders");
    for row in ["src", "main.py", "utils.py", "tests", "README.md"] {
        tree.add_node(explorer_list, NodeRole::TreeItem, row);
    }

    let editor_area = tree.add_node(workbench, NodeRole::Group, "editor-area");
    let tab_strip = tree.add_node(editor_area, NodeRole::List, "tabs");
    for tab in ["main.py", "utils.py", "README.md"] {
        tree.add_node(tab_strip, NodeRole::TabItem, tab);
    }

    let editor_group = tree.add_node(editor_area, NodeRole::Group, "editor");
    let editor_leaf = tree.add_node(editor_group, NodeRole::Edit, "main.py");
    tree.set_value(editor_leaf, SAMPLE_CODE);
    tree.set_state(editor_leaf, true, false);

    let panel = tree.add_node(workbench, NodeRole::Group, "panel");
    for i in 0..40 {
        tree.add_node(panel, NodeRole::Text, &format!("status {}", i));
    }

    EditorFixture {
        tree,
        window: WindowId(1),
        root,
        tab_strip,
        explorer_list,
        editor_group,
        editor_leaf,
        tab_path: super::IndexPath::from(vec![0, 2, 0]),
        explorer_path: super::IndexPath::from(vec![0, 1, 1]),
        editor_path: super::IndexPath::from(vec![0, 2, 1]),
    }
}
