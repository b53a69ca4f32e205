//! # Domain Invariants
//!
//! Structural rules every stored hierarchy must satisfy.
//!
//! | Invariant | Rule |
//! |-----------|------|
//! | Path chain | `path` is the `.`-join of ancestor values, root first |
//! | Unique path | `(app_id, path)` is unique |
//! | Parent link | parent has `level - 1`, the same app, and a path that is a strict prefix |
//! | Root | `parent_id` is null iff `level == 0` |
//! | No orphans | deleting a toggle deletes its whole subtree |

use super::entities::Toggle;
use super::errors::ToggleError;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Longest accepted path, in characters.
pub const DEFAULT_MAX_PATH_LENGTH: usize = 1000;

/// Deepest accepted path, in segments.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Longest accepted single segment, in characters.
pub const DEFAULT_MAX_SEGMENT_LENGTH: usize = 255;

/// Invariant: a root has level 0 and no parent, and vice versa.
pub fn invariant_root_consistent(toggle: &Toggle) -> Result<(), ToggleError> {
    if toggle.parent_id.is_none() != (toggle.level == 0) {
        return Err(ToggleError::internal(format!(
            "toggle {} at level {} has inconsistent parent reference",
            toggle.path, toggle.level
        )));
    }
    Ok(())
}

/// Invariant: `child` is correctly linked below `parent`.
pub fn invariant_parent_link(parent: &Toggle, child: &Toggle) -> Result<(), ToggleError> {
    if child.parent_id != Some(parent.id) {
        return Err(ToggleError::internal(format!(
            "toggle {} does not reference parent {}",
            child.path, parent.path
        )));
    }

    if child.app_id != parent.app_id {
        return Err(ToggleError::internal(format!(
            "toggle {} and parent {} belong to different applications",
            child.path, parent.path
        )));
    }

    if child.level != parent.level + 1 {
        return Err(ToggleError::internal(format!(
            "toggle {} has level {}, expected {}",
            child.path,
            child.level,
            parent.level + 1
        )));
    }

    let expected_prefix = format!("{}{}", parent.path, PATH_SEPARATOR);
    if child.path != format!("{}{}", expected_prefix, child.value) {
        return Err(ToggleError::internal(format!(
            "toggle path {} is not {} followed by its value",
            child.path, expected_prefix
        )));
    }

    Ok(())
}
