//! # Hierarchy Renderer
//!
//! Turns a flat toggle collection into nested [`ToggleNode`] trees.
//! Each rendered `enabled` is the node's own flag AND its ancestor chain,
//! computed top-down in one pass.

use tracing::warn;

use crate::domain::{Toggle, ToggleNode};

use super::forest::ToggleForest;

/// Build the rendered forest for one application's toggles.
///
/// Roots are the level-0 toggles in input order. Toggles whose parent is
/// absent from `toggles` are not rendered.
pub fn build_tree(toggles: &[Toggle]) -> Vec<ToggleNode> {
    let forest = ToggleForest::new(toggles);

    if !forest.orphans().is_empty() {
        warn!(
            "[toggles] Skipping {} orphaned toggles while rendering",
            forest.orphans().len()
        );
    }

    forest
        .roots()
        .iter()
        .map(|root| render_node(&forest, root, true))
        .collect()
}

fn render_node(forest: &ToggleForest<'_>, toggle: &Toggle, ancestors_enabled: bool) -> ToggleNode {
    let enabled = toggle.enabled && ancestors_enabled;

    let children: Vec<ToggleNode> = forest
        .children_of(&toggle.id)
        .iter()
        .map(|child| render_node(forest, child, enabled))
        .collect();

    ToggleNode {
        id: toggle.id,
        value: toggle.value.clone(),
        enabled,
        toggles: (!children.is_empty()).then_some(children),
    }
}
