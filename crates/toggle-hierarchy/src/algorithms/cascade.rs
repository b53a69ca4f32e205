//! # Cascade State Updater
//!
//! Writes one `enabled` value to a toggle and to every descendant.
//!
//! The value overwrites each descendant's own flag; prior per-node state is
//! lost. Nodes are written parent first, children fetched one level at a
//! time through `get_children`.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::domain::{AppId, CascadeReport, StoreError, ToggleError, ToggleId};
use crate::ports::{TimeSource, ToggleStore};

pub(crate) const FOREIGN_TOGGLE: &str = "toggle does not belong to this application";

/// Set `enabled` on `toggle_id` and all of its descendants.
///
/// # Errors
/// - `NotFound`: `toggle_id` does not exist
/// - `Validation`: the toggle, or any descendant, belongs to another app
/// - `Internal`: the subtree is deeper than `max_depth` or revisits a node
/// - `Database`: a store call failed
pub fn set_enabled_recursively<S, C>(
    store: &S,
    clock: &C,
    toggle_id: &ToggleId,
    enabled: bool,
    app_id: &AppId,
    max_depth: usize,
) -> Result<CascadeReport, ToggleError>
where
    S: ToggleStore + ?Sized,
    C: TimeSource + ?Sized,
{
    let root = store
        .get_by_id(toggle_id)
        .map_err(|e| e.into_toggle_error("error fetching toggle"))?
        .ok_or_else(|| ToggleError::not_found("toggle not found"))?;

    let mut report = CascadeReport::default();
    let mut visited = HashSet::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((mut node, depth)) = stack.pop() {
        if !node.belongs_to(app_id) {
            return Err(ToggleError::validation(FOREIGN_TOGGLE));
        }
        if depth > max_depth {
            return Err(ToggleError::internal(format!(
                "subtree below {} exceeds maximum depth {}",
                toggle_id, max_depth
            )));
        }
        if !visited.insert(node.id) {
            return Err(ToggleError::internal(format!(
                "toggle {} reached twice while cascading",
                node.id
            )));
        }

        node.set_enabled(enabled, clock.now());
        match store.update(&node) {
            Ok(()) => {}
            Err(StoreError::NotFound) => {
                return Err(ToggleError::not_found("toggle not found"));
            }
            Err(e) => return Err(e.into_toggle_error("error updating toggle")),
        }
        debug!(
            toggle_id = %node.id,
            path = %node.path,
            enabled,
            depth,
            "[toggles] Cascade updated node"
        );
        report.updated += 1;
        report.max_depth = report.max_depth.max(depth as u32);

        let children = store
            .get_children(&node.id)
            .map_err(|e| e.into_toggle_error("error fetching children"))?;
        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }

    info!(
        app_id = %app_id,
        toggle_id = %toggle_id,
        enabled,
        "[toggles] Cascaded to {} toggles",
        report.updated
    );

    Ok(report)
}
