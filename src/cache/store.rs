//! Durable storage for per-project vocabulary.
//!
//! One JSON file per project under the configured directory. Loading is
//! best-effort: a missing, unreadable, or corrupt file simply means the
//! project has no cache yet, and the next background extraction rewrites
//! it from scratch.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::{debug, warn};

use super::ContentCache;
use crate::project::sanitize_project_name;

pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Opens (and if needed creates) the storage directory.
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|e| {
            anyhow!("Failed to create cache directory {}: {}", dir.display(), e)
        })?;
        Ok(CacheStore {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, project: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", sanitize_project_name(project)))
    }

    /// Loads the cache for a project, or `None` if there is none to load.
    pub fn load(&self, project: &str) -> Option<ContentCache> {
        let path = self.path_for(project);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!("No cached vocabulary at {}", path.display());
                return None;
            }
        };
        match serde_json::from_str::<ContentCache>(&raw) {
            Ok(cache) => {
                debug!(
                    "Loaded vocabulary for '{}': {} tab files, {} explorer files, {} symbols",
                    project,
                    cache.tab_files.len(),
                    cache.explorer_files.len(),
                    cache.symbols.len()
                );
                Some(cache)
            }
            Err(e) => {
                warn!("Ignoring corrupt vocabulary cache {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, cache: &ContentCache) -> Result<()> {
        let path = self.path_for(&cache.project);
        let json = serde_json::to_string_pretty(cache)
            .map_err(|e| anyhow!("Failed to serialize vocabulary cache: {}", e))?;
        fs::write(&path, json)
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
        Ok(())
    }

    /// Removes one project's cache file. Missing files are not an error.
    pub fn delete(&self, project: &str) -> Result<()> {
        let path = self.path_for(project);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| anyhow!("Failed to delete {}: {}", path.display(), e))?;
        }
        Ok(())
    }

    /// Removes every cache file in the storage directory, including ones
    /// for projects not seen this session.
    pub fn delete_all(&self) -> Result<()> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| anyhow!("Failed to read {}: {}", self.dir.display(), e))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                if let Err(e) = fs::remove_file(&path) {
                    warn!("Failed to delete {}: {}", path.display(), e);
                }
            }
        }
        Ok(())
    }
}

// ==== Tests ====
