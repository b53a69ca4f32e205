//! # Subtree Delete
//!
//! Removes a toggle and all of its descendants, children before parents,
//! so a failure part way never leaves an orphan behind.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::domain::{StoreError, Toggle, ToggleError};
use crate::ports::ToggleStore;

/// Delete `root` and its subtree. Returns the number of removed toggles.
///
/// Descendants are discovered depth-first through `get_children` and
/// deleted in post-order by id; `root` itself goes last via
/// `delete_by_path`. Records already gone when their turn comes are
/// skipped and not counted.
///
/// # Errors
/// - `Internal`: the subtree is deeper than `max_depth` or revisits a node
/// - `Database`: a store call failed
pub fn delete_subtree<S: ToggleStore + ?Sized>(
    store: &S,
    root: &Toggle,
    max_depth: usize,
) -> Result<usize, ToggleError> {
    let descendants = collect_descendants(store, root, max_depth)?;

    let mut removed = 0;
    // Pre-order reversed puts every node after all of its descendants.
    for node in descendants.iter().rev() {
        match store.delete(&node.id) {
            Ok(()) => {
                debug!(toggle_id = %node.id, path = %node.path, "[toggles] Deleted descendant");
                removed += 1;
            }
            Err(StoreError::NotFound) => {
                debug!(path = %node.path, "[toggles] Descendant already gone");
            }
            Err(e) => return Err(e.into_toggle_error("error deleting toggle")),
        }
    }

    match store.delete_by_path(&root.path, &root.app_id) {
        Ok(()) => removed += 1,
        Err(StoreError::NotFound) => {}
        Err(e) => return Err(e.into_toggle_error("error deleting toggle")),
    }

    info!(
        app_id = %root.app_id,
        path = %root.path,
        "[toggles] Deleted subtree of {} toggles",
        removed
    );

    Ok(removed)
}

/// Descendants of `root` in depth-first pre-order, `root` excluded.
fn collect_descendants<S: ToggleStore + ?Sized>(
    store: &S,
    root: &Toggle,
    max_depth: usize,
) -> Result<Vec<Toggle>, ToggleError> {
    let mut out = Vec::new();
    let mut visited = HashSet::from([root.id]);
    let mut stack = vec![(root.id, 0usize)];

    while let Some((id, depth)) = stack.pop() {
        let children = store
            .get_children(&id)
            .map_err(|e| e.into_toggle_error("error fetching children"))?;
        if children.is_empty() {
            continue;
        }
        if depth + 1 > max_depth {
            return Err(ToggleError::internal(format!(
                "subtree below {} exceeds maximum depth {}",
                root.path, max_depth
            )));
        }

        for child in children {
            if !visited.insert(child.id) {
                return Err(ToggleError::internal(format!(
                    "toggle {} reached twice while deleting",
                    child.path
                )));
            }
            stack.push((child.id, depth + 1));
            out.push(child);
        }
    }

    Ok(out)
}
