//! # Value Objects
//!
//! Rendered tree nodes and the reports returned by write algorithms.

use serde::{Deserialize, Serialize};

use super::entities::{Toggle, ToggleId};

/// One node of a rendered hierarchy.
///
/// `enabled` is the effective state (own flag AND every ancestor).
/// `toggles` is absent, not empty, for leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleNode {
    pub id: ToggleId,
    pub value: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggles: Option<Vec<ToggleNode>>,
}

impl ToggleNode {
    pub fn children(&self) -> &[ToggleNode] {
        self.toggles.as_deref().unwrap_or(&[])
    }
}

/// Result of a hierarchical create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    /// The terminal toggle carrying the caller's flags.
    pub toggle: Toggle,
    /// Ancestors (and the leaf) written by this call, root first.
    pub created: Vec<ToggleId>,
    /// Pre-existing ancestors reused as parents.
    pub reused: usize,
}

/// Result of a cascading enable/disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Nodes written, the starting node included.
    pub updated: usize,
    /// Deepest level below the starting node that was visited.
    pub max_depth: u32,
}
