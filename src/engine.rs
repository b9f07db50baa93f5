//! The vocabulary engine: orchestration of validation, extraction,
//! caching and refresh.
//!
//! A query never waits on the accessibility tree if it can help it:
//! cached paths make extraction a handful of probes, stale vocabulary is
//! served while a background traversal rebuilds, and at most one
//! traversal runs at a time. The state lock is only ever held around map
//! reads and writes; every tree probe happens outside it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};

use crate::cache::store::CacheStore;
use crate::cache::{CacheStatus, ContentCache, ExtractionResult, PathCache};
use crate::config::EngineConfig;
use crate::extract::full::TraversalOutcome;
use crate::extract::{fast, full, symbols};
use crate::focus;
use crate::keywords::{self, PromptContext};
use crate::project::{project_from_title, sanitize_project_name};
use crate::tree::{NodeId, UiTree, WindowId, WindowInfo};
use crate::validate;

/// Counters exposed for diagnostics surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineStats {
    pub window_caches: usize,
    pub project_caches: usize,
    pub refresh_in_flight: bool,
    pub current_project: Option<String>,
}

struct CurrentContext {
    window: WindowId,
    project: String,
}

#[derive(Default)]
struct EngineState {
    /// Cached tree locations, one per editor window.
    path_caches: HashMap<WindowId, PathCache>,
    /// Extracted vocabulary, one per project.
    content_caches: HashMap<String, ContentCache>,
    current: Option<CurrentContext>,
}

/// Clears the refresh flag when a traversal ends, however it ends.
struct RefreshGuard(Arc<AtomicBool>);

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct VocabularyEngine {
    tree: Arc<dyn UiTree>,
    store: Arc<CacheStore>,
    state: Arc<Mutex<EngineState>>,
    refreshing: Arc<AtomicBool>,
    config: EngineConfig,
}

impl VocabularyEngine {
    pub fn new(tree: Arc<dyn UiTree>, config: EngineConfig) -> Result<Self> {
        let store = CacheStore::new(&config.storage_dir)?;
        info!(
            "Vocabulary engine ready (storage: {})",
            config.storage_dir.display()
        );
        Ok(VocabularyEngine {
            tree,
            store: Arc::new(store),
            state: Arc::new(Mutex::new(EngineState::default())),
            refreshing: Arc::new(AtomicBool::new(false)),
            config,
        })
    }

    /// Whether the foreground window belongs to a supported editor.
    pub fn is_editor_focused(&self) -> bool {
        self.tree
            .focused_window()
            .map(|window| focus::is_supported_editor(&window.process))
            .unwrap_or(false)
    }

    /// The budgeted keyword list for the focused editor's project, ready
    /// to hand to a recognizer. Empty when no supported editor is focused
    /// or nothing has been extracted yet.
    pub fn keywords(&self) -> Vec<String> {
        match self.current_vocabulary() {
            Some(cache) => keywords::build_keywords(&cache),
            None => Vec::new(),
        }
    }

    /// The richer file/symbol listing for prompt assembly.
    pub fn prompt_context(&self) -> PromptContext {
        match self.current_vocabulary() {
            Some(cache) => keywords::build_prompt_context(&cache),
            None => PromptContext::default(),
        }
    }

    /// Forgets one project's vocabulary, in memory and on disk.
    pub fn clear_project(&self, project: &str) -> Result<()> {
        let key = sanitize_project_name(project);
        {
            let mut state = self
                .state
                .lock()
                .map_err(|e| anyhow!("Lock error: {}", e))?;
            state.content_caches.remove(&key);
        }
        self.store.delete(&key)?;
        info!("Cleared vocabulary for '{}'", key);
        Ok(())
    }

    /// Forgets everything: all vocabulary, all cached paths, all files.
    pub fn clear_all(&self) -> Result<()> {
        {
            let mut state = self
                .state
                .lock()
                .map_err(|e| anyhow!("Lock error: {}", e))?;
            state.content_caches.clear();
            state.path_caches.clear();
            state.current = None;
        }
        self.store.delete_all()?;
        info!("Cleared all vocabulary caches");
        Ok(())
    }

    pub fn stats(&self) -> EngineStats {
        let (window_caches, project_caches, current_project) = match self.state.lock() {
            Ok(state) => (
                state.path_caches.len(),
                state.content_caches.len(),
                state.current.as_ref().map(|c| c.project.clone()),
            ),
            Err(_) => (0, 0, None),
        };
        EngineStats {
            window_caches,
            project_caches,
            refresh_in_flight: self.refreshing.load(Ordering::SeqCst),
            current_project,
        }
    }

    // ==== Query path ====

    /// Resolves the focused editor's project vocabulary, refreshing as
    /// necessary. This is the stale-while-revalidate core: it prefers
    /// answering now from whatever exists over answering late.
    fn current_vocabulary(&self) -> Option<ContentCache> {
        let window = self.tree.focused_window()?;
        if !focus::is_supported_editor(&window.process) {
            return None;
        }
        let project = project_from_title(&window.title);
        self.switch_context(&window, &project);

        let root = match self.tree.window_root(window.id) {
            Ok(root) => root,
            Err(e) => {
                debug!("Window root unavailable: {}", e);
                return self.snapshot(&project);
            }
        };

        // Clone the path cache out of the map; probing happens lock-free.
        let mut path_cache = {
            let Ok(state) = self.state.lock() else {
                return None;
            };
            state
                .path_caches
                .get(&window.id)
                .cloned()
                .unwrap_or_else(|| PathCache::new(window.id))
        };

        let status = validate::validate(
            self.tree.as_ref(),
            root,
            &mut path_cache,
            self.config.path_cache_ttl(),
        );

        match status {
            CacheStatus::Valid | CacheStatus::PartiallyValid => {
                let extraction = fast::extract(self.tree.as_ref(), root, &mut path_cache);
                self.store_path_cache(path_cache);
                match extraction {
                    Some(mut result) => {
                        if let Some(code) = &result.code_text {
                            result.symbols = symbols::extract(code);
                        }
                        if status == CacheStatus::PartiallyValid {
                            debug!("Scheduling repair traversal for window {:?}", window.id);
                            self.spawn_refresh(window.id, project.clone());
                        }
                        self.fold_content(&project, &result)
                            .or_else(|| self.snapshot(&project))
                    }
                    None => {
                        debug!("Fast extraction found nothing for '{}'", project);
                        self.refresh_or_traverse(window.id, root, &project)
                    }
                }
            }
            CacheStatus::Invalid => {
                info!(
                    "Discarding path cache for window {:?} after repeated failures",
                    window.id
                );
                self.drop_path_cache(window.id);
                self.refresh_or_traverse(window.id, root, &project)
            }
            CacheStatus::NotFound => {
                self.drop_path_cache(window.id);
                self.refresh_or_traverse(window.id, root, &project)
            }
        }
    }

    /// Fast path came up empty: serve stale data and freshen behind the
    /// query, or block on one traversal when there is nothing to serve.
    fn refresh_or_traverse(
        &self,
        window: WindowId,
        root: NodeId,
        project: &str,
    ) -> Option<ContentCache> {
        if let Some(stale) = self.snapshot(project) {
            self.spawn_refresh(window, project.to_string());
            return Some(stale);
        }
        let Some(guard) = self.begin_refresh() else {
            debug!(
                "Traversal already in flight; nothing cached yet for '{}'",
                project
            );
            return None;
        };
        let outcome = full::traverse(self.tree.as_ref(), root, self.config.traversal_budget());
        let snapshot = self.fold_traversal(window, project, outcome);
        drop(guard);
        snapshot
    }

    // ==== Background refresh ====

    /// Starts a traversal worker unless one is already running.
    fn spawn_refresh(&self, window: WindowId, project: String) {
        let Some(guard) = self.begin_refresh() else {
            return;
        };
        let engine = self.clone();
        let spawned = thread::Builder::new()
            .name("vocab-refresh".to_string())
            .spawn(move || {
                let _guard = guard;
                let root = match engine.tree.window_root(window) {
                    Ok(root) => root,
                    Err(e) => {
                        debug!("Refresh aborted, window root unavailable: {}", e);
                        return;
                    }
                };
                let outcome =
                    full::traverse(engine.tree.as_ref(), root, engine.config.traversal_budget());
                engine.fold_traversal(window, &project, outcome);
            });
        if let Err(e) = spawned {
            error!("Failed to spawn refresh worker: {}", e);
        }
    }

    /// Claims the single refresh slot. The returned guard frees it on drop,
    /// so a panicking traversal cannot wedge the engine.
    fn begin_refresh(&self) -> Option<RefreshGuard> {
        self.refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RefreshGuard(Arc::clone(&self.refreshing)))
    }

    /// Folds a traversal's findings into both cache layers and persists
    /// the vocabulary when it changed.
    fn fold_traversal(
        &self,
        window: WindowId,
        project: &str,
        outcome: TraversalOutcome,
    ) -> Option<ContentCache> {
        let mut result = outcome.result;
        if let Some(code) = &result.code_text {
            result.symbols = symbols::extract(code);
        }
        info!(
            "Traversal for '{}': {} tabs, {} explorer items, {} symbols in {:?}{}",
            project,
            result.tabs.len(),
            result.explorer_items.len(),
            result.symbols.len(),
            outcome.elapsed,
            if outcome.complete { "" } else { " (budget hit)" }
        );

        let (snapshot, changed) = {
            let Ok(mut state) = self.state.lock() else {
                return None;
            };
            if outcome.paths.any() {
                state
                    .path_caches
                    .entry(window)
                    .or_insert_with(|| PathCache::new(window))
                    .adopt(&outcome.paths);
            }
            if result.has_vocabulary() {
                let cache = state
                    .content_caches
                    .entry(project.to_string())
                    .or_insert_with(|| ContentCache::new(project));
                cache.absorb(&result);
                (Some(cache.clone()), true)
            } else {
                let existing = state
                    .content_caches
                    .get(project)
                    .filter(|cache| !cache.is_empty())
                    .cloned();
                (existing, false)
            }
        };

        if changed {
            if let Some(cache) = &snapshot {
                if let Err(e) = self.store.save(cache) {
                    warn!("Failed to persist vocabulary for '{}': {}", project, e);
                }
            }
        }
        snapshot
    }

    /// Folds a fast-path result into the content cache. Fast results are
    /// served from memory only; persistence belongs to traversals.
    fn fold_content(&self, project: &str, result: &ExtractionResult) -> Option<ContentCache> {
        if !result.has_vocabulary() {
            return self.snapshot(project);
        }
        let Ok(mut state) = self.state.lock() else {
            return None;
        };
        let cache = state
            .content_caches
            .entry(project.to_string())
            .or_insert_with(|| ContentCache::new(project));
        cache.absorb(result);
        Some(cache.clone())
    }

    // ==== Context bookkeeping ====

    /// Tracks the active (window, project) pair. First sight of a window
    /// seeds an empty path cache; first sight of a project pulls its
    /// persisted vocabulary off disk.
    fn switch_context(&self, window: &WindowInfo, project: &str) {
        let needs_load = {
            let Ok(mut state) = self.state.lock() else {
                return;
            };
            let same = state
                .current
                .as_ref()
                .map(|c| c.window == window.id && c.project == project)
                .unwrap_or(false);
            if same {
                return;
            }
            info!("Editor context: window {:?}, project '{}'", window.id, project);
            state.current = Some(CurrentContext {
                window: window.id,
                project: project.to_string(),
            });
            state
                .path_caches
                .entry(window.id)
                .or_insert_with(|| PathCache::new(window.id));
            !state.content_caches.contains_key(project)
        };

        if needs_load {
            let loaded = self
                .store
                .load(project)
                .unwrap_or_else(|| ContentCache::new(project));
            if let Ok(mut state) = self.state.lock() {
                state
                    .content_caches
                    .entry(project.to_string())
                    .or_insert(loaded);
            }
        }
    }

    /// Clone of the project's vocabulary, or `None` when nothing useful
    /// has ever been extracted for it.
    fn snapshot(&self, project: &str) -> Option<ContentCache> {
        let Ok(state) = self.state.lock() else {
            return None;
        };
        state
            .content_caches
            .get(project)
            .filter(|cache| !cache.is_empty())
            .cloned()
    }

    fn store_path_cache(&self, cache: PathCache) {
        if let Ok(mut state) = self.state.lock() {
            state.path_caches.insert(cache.window, cache);
        }
    }

    fn drop_path_cache(&self, window: WindowId) {
        if let Ok(mut state) = self.state.lock() {
            state.path_caches.remove(&window);
        }
    }
}

// ==== Tests ====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixture::{editor_fixture, EditorFixture, FakeTree};
    use crate::tree::NodeRole;
    use std::time::Duration;

    fn engine_for(fx: &EditorFixture) -> (tempfile::TempDir, VocabularyEngine) {
        let dir = tempfile::tempdir().unwrap();
        let tree: Arc<dyn UiTree> = fx.tree.clone();
        let config = EngineConfig {
            storage_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        (dir, VocabularyEngine::new(tree, config).unwrap())
    }

    fn wait_for_refresh(engine: &VocabularyEngine) {
        for _ in 0..200 {
            if !engine.stats().refresh_in_flight {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("background refresh never finished");
    }

    #[test]
    fn test_first_query_discovers_extracts_and_persists() {
        let fx = editor_fixture();
        let (dir, engine) = engine_for(&fx);

        let keywords = engine.keywords();
        assert!(keywords.contains(&"main".to_string()));
        assert!(keywords.contains(&"getUserName".to_string()));
        assert!(!keywords.contains(&"def".to_string()));
        assert!(!keywords.contains(&"self".to_string()));

        let stats = engine.stats();
        assert_eq!(stats.window_caches, 1);
        assert_eq!(stats.project_caches, 1);
        assert_eq!(stats.current_project.as_deref(), Some("myproject"));
        assert!(!stats.refresh_in_flight);
        assert!(dir.path().join("myproject.json").exists());
    }

    #[test]
    fn test_second_query_is_served_by_the_fast_path() {
        let fx = editor_fixture();
        let (_dir, engine) = engine_for(&fx);

        let first = engine.keywords();
        let probes_before = fx.tree.probes();
        let second = engine.keywords();
        let second_cost = fx.tree.probes() - probes_before;

        assert_eq!(first, second);
        // The warm query reads a few dozen nodes, not the whole tree.
        assert!(second_cost < 80, "warm query used {} probes", second_cost);
    }

    #[test]
    fn test_non_editor_focus_yields_nothing() {
        let fx = editor_fixture();
        let (_dir, engine) = engine_for(&fx);
        fx.tree.add_window(9, "inbox - Mail", "thunderbird.exe");
        fx.tree.focus_window(9);
        assert!(!engine.is_editor_focused());
        assert!(engine.keywords().is_empty());
        assert!(engine.prompt_context().is_empty());
    }

    #[test]
    fn test_no_focused_window_yields_nothing() {
        let fx = editor_fixture();
        let (_dir, engine) = engine_for(&fx);
        fx.tree.clear_focus();
        assert!(!engine.is_editor_focused());
        assert!(engine.keywords().is_empty());
    }

    #[test]
    fn test_stale_vocabulary_served_while_refresh_runs() {
        let fx = editor_fixture();
        let (_dir, engine) = engine_for(&fx);
        let warm = engine.keywords();
        assert!(!warm.is_empty());

        // The editor area collapses: fast extraction has nothing to read.
        fx.tree.remove_node(fx.tab_strip);
        fx.tree.remove_node(fx.editor_group);

        let served = engine.keywords();
        assert_eq!(served, warm);
        wait_for_refresh(&engine);

        // The surviving explorer keeps the vocabulary alive afterwards too.
        let after = engine.keywords();
        assert!(!after.is_empty());
        wait_for_refresh(&engine);
    }

    #[test]
    fn test_refresh_slot_is_single_flight() {
        let fx = editor_fixture();
        let (_dir, engine) = engine_for(&fx);
        let first = engine.begin_refresh();
        assert!(first.is_some());
        assert!(engine.begin_refresh().is_none());
        assert!(engine.stats().refresh_in_flight);
        drop(first);
        assert!(!engine.stats().refresh_in_flight);
        assert!(engine.begin_refresh().is_some());
    }

    #[test]
    fn test_condemned_path_cache_is_discarded() {
        let fx = editor_fixture();
        let (_dir, engine) = engine_for(&fx);
        engine.keywords();
        assert_eq!(engine.stats().window_caches, 1);

        // Tear the window down to its root; every validation now fails and
        // rediscovery finds nothing to adopt.
        let workbench = crate::tree::IndexPath::from(vec![0])
            .resolve(fx.tree.as_ref(), fx.root)
            .unwrap();
        fx.tree.remove_node(workbench);

        for _ in 0..3 {
            engine.keywords();
            wait_for_refresh(&engine);
        }
        assert_eq!(engine.stats().window_caches, 0);
    }

    #[test]
    fn test_persisted_vocabulary_survives_restart() {
        let fx = editor_fixture();
        let (dir, engine) = engine_for(&fx);
        let original = engine.keywords();
        assert!(!original.is_empty());
        drop(engine);

        // Same storage, new engine, and a window that no longer exposes
        // anything: the answer must come off disk.
        let workbench = crate::tree::IndexPath::from(vec![0])
            .resolve(fx.tree.as_ref(), fx.root)
            .unwrap();
        fx.tree.remove_node(workbench);
        let tree: Arc<dyn UiTree> = fx.tree.clone();
        let config = EngineConfig {
            storage_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let revived = VocabularyEngine::new(tree, config).unwrap();
        let served = revived.keywords();
        assert_eq!(served, original);
        wait_for_refresh(&revived);
    }

    #[test]
    fn test_clear_project_removes_memory_and_disk() {
        let fx = editor_fixture();
        let (dir, engine) = engine_for(&fx);
        engine.keywords();
        assert!(dir.path().join("myproject.json").exists());

        engine.clear_project("myproject").unwrap();
        assert!(!dir.path().join("myproject.json").exists());
        assert_eq!(engine.stats().project_caches, 0);
    }

    #[test]
    fn test_clear_all_resets_the_engine() {
        let fx = editor_fixture();
        let (dir, engine) = engine_for(&fx);
        engine.keywords();
        engine.clear_all().unwrap();
        let stats = engine.stats();
        assert_eq!(stats.window_caches, 0);
        assert_eq!(stats.project_caches, 0);
        assert_eq!(stats.current_project, None);
        assert!(!dir.path().join("myproject.json").exists());
    }

    #[test]
    fn test_empty_editor_window_yields_empty_list() {
        let tree = Arc::new(FakeTree::new());
        tree.add_window(1, "Untitled - Visual Studio Code", "Code.exe");
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig {
            storage_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let dyn_tree: Arc<dyn UiTree> = tree;
        let engine = VocabularyEngine::new(dyn_tree, config).unwrap();
        assert!(engine.is_editor_focused());
        assert!(engine.keywords().is_empty());
    }

    #[test]
    fn test_switching_windows_switches_projects() {
        let fx = editor_fixture();
        let (_dir, engine) = engine_for(&fx);
        engine.keywords();
        assert_eq!(
            engine.stats().current_project.as_deref(),
            Some("myproject")
        );

        let root2 = fx
            .tree
            .add_window(2, "lib.rs - otherproj - Visual Studio Code", "Code.exe");
        let area = fx.tree.add_node(root2, NodeRole::Group, "area");
        let inner = fx.tree.add_node(area, NodeRole::Group, "inner");
        let strip = fx.tree.add_node(inner, NodeRole::List, "tabs");
        fx.tree.add_node(strip, NodeRole::TabItem, "lib.rs");
        fx.tree.focus_window(2);

        let keywords = engine.keywords();
        assert!(keywords.contains(&"lib".to_string()));
        let stats = engine.stats();
        assert_eq!(stats.current_project.as_deref(), Some("otherproj"));
        assert_eq!(stats.project_caches, 2);

        // Flipping back restores the first project's vocabulary.
        fx.tree.focus_window(1);
        let back = engine.keywords();
        assert!(back.contains(&"getUserName".to_string()));
    }
}
