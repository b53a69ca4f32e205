//! # Effective Enablement Resolver
//!
//! A toggle is live iff its own flag is set and every ancestor is live.
//! Ancestors are fetched one store round-trip per level. For many toggles
//! at once, load the application into a `ToggleForest` instead.

use tracing::warn;

use crate::domain::Toggle;
use crate::ports::ToggleStore;

/// Walk the ancestor chain of `toggle` through the store.
///
/// A missing ancestor, a failed lookup or a chain longer than the toggle's
/// level resolves to `false` and is logged, never returned as an error.
pub fn is_effectively_enabled<S: ToggleStore + ?Sized>(store: &S, toggle: &Toggle) -> bool {
    if !toggle.enabled {
        return false;
    }

    let mut next = toggle.parent_id;
    let mut hops: u32 = 0;

    while let Some(parent_id) = next {
        hops += 1;
        if hops > toggle.level {
            warn!(
                toggle_id = %toggle.id,
                path = %toggle.path,
                "[toggles] Ancestor chain longer than level {}, treating as disabled",
                toggle.level
            );
            return false;
        }

        match store.get_by_id(&parent_id) {
            Ok(Some(parent)) => {
                if !parent.enabled {
                    return false;
                }
                next = parent.parent_id;
            }
            Ok(None) => {
                warn!(
                    toggle_id = %toggle.id,
                    parent_id = %parent_id,
                    "[toggles] Ancestor not found, treating {} as disabled",
                    toggle.path
                );
                return false;
            }
            Err(e) => {
                warn!(
                    toggle_id = %toggle.id,
                    parent_id = %parent_id,
                    "[toggles] Ancestor lookup failed ({}), treating {} as disabled",
                    e,
                    toggle.path
                );
                return false;
            }
        }
    }

    true
}
