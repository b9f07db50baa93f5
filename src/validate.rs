//! Cheap per-query validation of a window's cached paths.
//!
//! The tab-strip check is the health proxy for the whole cache: it is a
//! few probes, and when it passes the layout almost certainly has not
//! moved. When it fails, the secondary paths are re-checked individually
//! and the survivors keep serving while a strike is recorded. Three
//! consecutive strikes condemn the cache.

use std::time::Duration;

use log::debug;

use crate::cache::{CacheStatus, PathCache};
use crate::tree::{IndexPath, NodeId, NodeRole, UiTree};

/// Consecutive failed validations after which a cache is condemned.
pub(crate) const MAX_VALIDATION_FAILURES: u32 = 3;

/// Children sampled when checking that a container still holds rows of
/// the expected role.
const VALIDATION_SAMPLE: usize = 5;

/// Grades the cache against the live tree, mutating it as it goes:
/// strikes accumulate on tab-check failure, and secondary paths that no
/// longer hold up are nulled so extraction stops consulting them.
pub fn validate(
    tree: &dyn UiTree,
    root: NodeId,
    cache: &mut PathCache,
    ttl: Duration,
) -> CacheStatus {
    if cache.is_expired(ttl) {
        debug!("Path cache for window {:?} expired", cache.window);
        return CacheStatus::NotFound;
    }
    if !cache.has_any_path() {
        return CacheStatus::NotFound;
    }

    if tab_strip_alive(tree, root, cache.tab_container.as_ref()) {
        cache.validation_failures = 0;
        return CacheStatus::Valid;
    }

    cache.validation_failures += 1;
    if cache.validation_failures >= MAX_VALIDATION_FAILURES {
        debug!(
            "Path cache for window {:?} condemned after {} consecutive failures",
            cache.window, cache.validation_failures
        );
        return CacheStatus::Invalid;
    }

    if let Some(path) = cache.explorer_container.clone() {
        if !explorer_alive(tree, root, &path) {
            debug!("Dropping dead explorer path {}", path);
            cache.explorer_container = None;
        }
    }
    if let Some(path) = cache.code_editor.clone() {
        if !anchor_alive(tree, root, &path) {
            debug!("Dropping dead editor anchor {}", path);
            cache.code_editor = None;
        }
    }
    CacheStatus::PartiallyValid
}

fn tab_strip_alive(tree: &dyn UiTree, root: NodeId, path: Option<&IndexPath>) -> bool {
    let Some(path) = path else {
        return false;
    };
    container_has_role(tree, root, path, NodeRole::TabItem)
}

fn explorer_alive(tree: &dyn UiTree, root: NodeId, path: &IndexPath) -> bool {
    container_has_role(tree, root, path, NodeRole::TreeItem)
}

/// The editor anchor check is deliberately lenient: anchors are interior
/// nodes whose subtree shape varies per editor, so resolvable-with-children
/// is as much as can be asked cheaply.
fn anchor_alive(tree: &dyn UiTree, root: NodeId, path: &IndexPath) -> bool {
    let Ok(node) = path.resolve(tree, root) else {
        return false;
    };
    matches!(tree.child_count(node), Ok(count) if count > 0)
}

fn container_has_role(
    tree: &dyn UiTree,
    root: NodeId,
    path: &IndexPath,
    role: NodeRole,
) -> bool {
    let Ok(container) = path.resolve(tree, root) else {
        return false;
    };
    let Ok(count) = tree.child_count(container) else {
        return false;
    };
    for index in 0..count.min(VALIDATION_SAMPLE) {
        let Ok(child) = tree.child(container, index) else {
            continue;
        };
        if tree.role(child) == Ok(role) {
            return true;
        }
    }
    false
}

// ==== Tests ====
