//! Engine configuration.
//!
//! Everything has a sensible default so embedders can deserialize a
//! partial settings blob, or just use `EngineConfig::default()` with a
//! storage directory of their choosing.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::PATH_CACHE_TTL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory where per-project vocabulary files are stored.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
    /// Wall-clock budget for one full tree traversal, in milliseconds.
    #[serde(default = "default_traversal_budget_ms")]
    pub traversal_budget_ms: u64,
    /// Lifetime of cached tree locations, in seconds.
    #[serde(default = "default_path_cache_ttl_secs")]
    pub path_cache_ttl_secs: u64,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".editor-vocab")
}

fn default_traversal_budget_ms() -> u64 {
    5_000
}

fn default_path_cache_ttl_secs() -> u64 {
    PATH_CACHE_TTL.as_secs()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            storage_dir: default_storage_dir(),
            traversal_budget_ms: default_traversal_budget_ms(),
            path_cache_ttl_secs: default_path_cache_ttl_secs(),
        }
    }
}

impl EngineConfig {
    pub fn traversal_budget(&self) -> Duration {
        Duration::from_millis(self.traversal_budget_ms)
    }

    pub fn path_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.path_cache_ttl_secs)
    }
}

// ==== Tests ====
