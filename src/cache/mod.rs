//! The two-layer cache behind vocabulary queries.
//!
//! - [`PathCache`]: per-window, in-memory only. Remembers *where* in the
//!   accessibility tree the interesting regions live, as index paths from
//!   the window root. Cheap to validate, cheap to discard.
//! - [`ContentCache`]: per-project, persisted as JSON. Remembers *what*
//!   was extracted (open files, explorer entries, code symbols) so a query
//!   can be answered from stale data while a refresh runs.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tree::{IndexPath, WindowId};

pub mod store;

/// Most recently seen open-file names kept per project.
pub const MAX_TAB_FILES: usize = 50;

/// Most recently seen project-explorer entries kept per project.
pub const MAX_EXPLORER_FILES: usize = 100;

/// Lifetime of a path cache. Editor layouts drift with updates and
/// extension changes, so even a never-failing cache is rebuilt daily.
pub const PATH_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Outcome of validating a [`PathCache`] against the live tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Tab path resolved and its children still look like tabs.
    Valid,
    /// Tab check failed but at least a cache exists; extraction continues
    /// on whatever sub-paths survived.
    PartiallyValid,
    /// Too many consecutive failures; the cache must be discarded.
    Invalid,
    /// No cache, an empty cache, or an expired one.
    NotFound,
}

/// Paths produced by a full traversal, ready to fold into a [`PathCache`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveredPaths {
    pub tab_container: Option<IndexPath>,
    pub explorer_container: Option<IndexPath>,
    pub code_editor: Option<IndexPath>,
}

impl DiscoveredPaths {
    pub fn any(&self) -> bool {
        self.tab_container.is_some()
            || self.explorer_container.is_some()
            || self.code_editor.is_some()
    }
}

/// Everything one extraction pass pulled out of the tree.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Open-file names read from the tab strip, in visual order.
    pub tabs: Vec<String>,
    /// Project-explorer entries, in visual order.
    pub explorer_items: Vec<String>,
    /// Visible source text of the editor control, if one was found.
    pub code_text: Option<String>,
    /// Symbols mined from `code_text`.
    pub symbols: Vec<String>,
}

impl ExtractionResult {
    /// Whether the fast path found enough to serve: tabs or code. An
    /// explorer listing alone is not worth skipping the full traversal for.
    pub fn usable(&self) -> bool {
        !self.tabs.is_empty() || self.code_text.is_some()
    }

    /// Whether folding this result into a content cache would change it.
    pub fn has_vocabulary(&self) -> bool {
        !self.tabs.is_empty() || !self.explorer_items.is_empty() || !self.symbols.is_empty()
    }
}

/// Cached tree locations for one editor window.
///
/// Never persisted: index paths are only meaningful against the live
/// window they were discovered in.
#[derive(Debug, Clone)]
pub struct PathCache {
    pub window: WindowId,
    pub tab_container: Option<IndexPath>,
    pub explorer_container: Option<IndexPath>,
    pub code_editor: Option<IndexPath>,
    /// Consecutive validation failures; reset on success or rediscovery.
    pub validation_failures: u32,
    created_at: Instant,
}

impl PathCache {
    pub fn new(window: WindowId) -> Self {
        PathCache {
            window,
            tab_container: None,
            explorer_container: None,
            code_editor: None,
            validation_failures: 0,
            created_at: Instant::now(),
        }
    }

    /// A cache is complete once it can feed the fast path: either the tab
    /// strip or the code editor is located. The explorer alone is not
    /// enough to answer a query.
    pub fn is_complete(&self) -> bool {
        self.tab_container.is_some() || self.code_editor.is_some()
    }

    pub fn has_any_path(&self) -> bool {
        self.tab_container.is_some()
            || self.explorer_container.is_some()
            || self.code_editor.is_some()
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }

    /// Folds freshly discovered paths in, keeping existing entries that the
    /// traversal did not rediscover. Any new path earns a clean slate of
    /// validation strikes.
    pub fn adopt(&mut self, discovered: &DiscoveredPaths) {
        if !discovered.any() {
            return;
        }
        if let Some(path) = &discovered.tab_container {
            self.tab_container = Some(path.clone());
        }
        if let Some(path) = &discovered.explorer_container {
            self.explorer_container = Some(path.clone());
        }
        if let Some(path) = &discovered.code_editor {
            self.code_editor = Some(path.clone());
        }
        self.validation_failures = 0;
    }

}

/// Extracted vocabulary for one project, keyed by sanitized project name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCache {
    pub project: String,
    /// Open-file names, most recently seen first.
    #[serde(default)]
    pub tab_files: Vec<String>,
    /// Explorer entries, most recently seen first.
    #[serde(default)]
    pub explorer_files: Vec<String>,
    /// Code symbols from the last successful extraction. Replaced
    /// wholesale each time, never merged.
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl ContentCache {
    pub fn new(project: &str) -> Self {
        ContentCache {
            project: project.to_string(),
            tab_files: Vec::new(),
            explorer_files: Vec::new(),
            symbols: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tab_files.is_empty() && self.explorer_files.is_empty() && self.symbols.is_empty()
    }

    /// Records an open-file name at the front of the recency list.
    pub fn note_tab_file(&mut self, name: &str) {
        push_recent(&mut self.tab_files, &self.explorer_files, name, MAX_TAB_FILES);
    }

    /// Records an explorer entry at the front of the recency list. Names
    /// already tracked as open files are skipped.
    pub fn note_explorer_file(&mut self, name: &str) {
        push_recent(
            &mut self.explorer_files,
            &self.tab_files,
            name,
            MAX_EXPLORER_FILES,
        );
    }

    /// Replaces the symbol set with this extraction's, deduplicated
    /// case-insensitively with first spellings kept.
    pub fn replace_symbols(&mut self, symbols: Vec<String>) {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let trimmed = symbol.trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(trimmed.to_lowercase()) {
                out.push(trimmed.to_string());
            }
        }
        self.symbols = out;
    }

    /// Folds one extraction pass into the cache and bumps `last_updated`.
    ///
    /// Files are inserted back-to-front so the first tab in visual order
    /// ends up most recent. Symbols are only replaced when the pass
    /// actually produced some; an extraction that never saw code must not
    /// wipe the previous set.
    pub fn absorb(&mut self, result: &ExtractionResult) {
        for name in result.tabs.iter().rev() {
            self.note_tab_file(name);
        }
        for name in result.explorer_items.iter().rev() {
            self.note_explorer_file(name);
        }
        if !result.symbols.is_empty() {
            self.replace_symbols(result.symbols.clone());
        }
        self.last_updated = Utc::now();
    }
}

/// Front-inserts `name` into `list` with move-to-front on re-mention,
/// oldest-entry eviction past `cap`, and case-insensitive suppression of
/// names already present in `other`.
fn push_recent(list: &mut Vec<String>, other: &[String], name: &str, cap: usize) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return;
    }
    let key = trimmed.to_lowercase();
    if other.iter().any(|entry| entry.to_lowercase() == key) {
        return;
    }
    if let Some(pos) = list.iter().position(|entry| entry.to_lowercase() == key) {
        let existing = list.remove(pos);
        list.insert(0, existing);
        return;
    }
    list.insert(0, trimmed.to_string());
    list.truncate(cap);
}

// ==== Tests ====
