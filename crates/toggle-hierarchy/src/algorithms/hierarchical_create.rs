//! # Hierarchical Create
//!
//! Materializes every missing prefix of a path as a toggle, reusing
//! prefixes that already exist.
//!
//! Only the terminal segment receives the caller's flags. New intermediate
//! nodes are enabled and editable so they never silently block the leaf.
//! Pre-existing nodes are never modified.

use tracing::debug;

use crate::domain::{
    invariant_parent_link, invariant_root_consistent, AppId, CreateOutcome, StoreError, Toggle,
    ToggleError, ToggleFlags,
};
use crate::ports::{TimeSource, ToggleStore};

use super::path_codec::path_prefixes;

/// Create the toggle addressed by `segments`, walking root to leaf.
///
/// # Errors
/// - `Validation`: no segments
/// - `AlreadyExists`: the terminal path exists, or was created concurrently
/// - `Internal`: an existing prefix is not linked to the previous one
/// - `Database`: a store call failed
pub fn create_toggle_hierarchy<S, C>(
    store: &S,
    clock: &C,
    segments: &[&str],
    flags: ToggleFlags,
    app_id: &AppId,
) -> Result<CreateOutcome, ToggleError>
where
    S: ToggleStore + ?Sized,
    C: TimeSource + ?Sized,
{
    let Some(last) = segments.len().checked_sub(1) else {
        return Err(ToggleError::validation("toggle path is required"));
    };

    let mut parent: Option<Toggle> = None;
    let mut created = Vec::new();
    let mut reused = 0;

    let prefixes = path_prefixes(segments);
    for (level, (segment, current_path)) in segments.iter().zip(prefixes).enumerate() {
        let is_terminal = level == last;

        let node = match lookup(store, &current_path, app_id)? {
            Some(_) if is_terminal => {
                return Err(ToggleError::already_exists("toggle already exists"));
            }
            Some(existing) => {
                debug!(
                    app_id = %app_id,
                    path = %current_path,
                    "[toggles] Reusing existing segment"
                );
                reused += 1;
                existing
            }
            None => {
                let node_flags = if is_terminal {
                    flags
                } else {
                    ToggleFlags::INTERMEDIATE
                };
                let toggle = Toggle::new(
                    *segment,
                    current_path.clone(),
                    level as u32,
                    parent.as_ref().map(|p| p.id),
                    app_id.clone(),
                    node_flags,
                    clock.now(),
                );

                match store.create(&toggle) {
                    Ok(()) => {
                        debug!(
                            app_id = %app_id,
                            path = %current_path,
                            toggle_id = %toggle.id,
                            "[toggles] Created segment at level {}",
                            level
                        );
                        created.push(toggle.id);
                        toggle
                    }
                    Err(StoreError::Conflict { .. }) if is_terminal => {
                        return Err(ToggleError::already_exists("toggle already exists"));
                    }
                    Err(StoreError::Conflict { .. }) => {
                        // Lost a race with another writer; adopt its node.
                        debug!(
                            app_id = %app_id,
                            path = %current_path,
                            "[toggles] Segment created concurrently, reusing"
                        );
                        reused += 1;
                        lookup(store, &current_path, app_id)?.ok_or_else(|| {
                            ToggleError::internal(format!(
                                "toggle {} conflicted but cannot be read back",
                                current_path
                            ))
                        })?
                    }
                    Err(e) => return Err(e.into_toggle_error("error creating toggle")),
                }
            }
        };

        invariant_root_consistent(&node)?;
        if let Some(parent) = &parent {
            invariant_parent_link(parent, &node)?;
        }
        parent = Some(node);
    }

    let toggle = parent.ok_or_else(|| ToggleError::internal("hierarchy walk produced no toggle"))?;

    Ok(CreateOutcome {
        toggle,
        created,
        reused,
    })
}

fn lookup<S: ToggleStore + ?Sized>(
    store: &S,
    path: &str,
    app_id: &AppId,
) -> Result<Option<Toggle>, ToggleError> {
    store
        .get_by_path(path, app_id)
        .map_err(|e| e.into_toggle_error("error checking toggle existence"))
}
