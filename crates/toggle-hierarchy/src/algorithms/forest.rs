//! # Toggle Forest
//!
//! In-memory index over a flat toggle collection (arena + index).
//!
//! A child is linked under its parent only when its `parent_id` matches and
//! its level is exactly one deeper, so the linked structure is acyclic by
//! construction. Records that cannot be linked are kept as orphans.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{Toggle, ToggleId};

/// Id-indexed view of one application's toggles.
#[derive(Debug)]
pub struct ToggleForest<'a> {
    by_id: HashMap<ToggleId, &'a Toggle>,
    children: HashMap<ToggleId, Vec<&'a Toggle>>,
    roots: Vec<&'a Toggle>,
    orphans: Vec<&'a Toggle>,
}

impl<'a> ToggleForest<'a> {
    /// Index `toggles`, keeping their relative order among siblings.
    pub fn new(toggles: &'a [Toggle]) -> Self {
        let by_id: HashMap<ToggleId, &'a Toggle> = toggles.iter().map(|t| (t.id, t)).collect();
        let mut children: HashMap<ToggleId, Vec<&'a Toggle>> = HashMap::new();
        let mut roots = Vec::new();
        let mut orphans = Vec::new();

        for toggle in toggles {
            if toggle.level == 0 {
                roots.push(toggle);
                continue;
            }
            match toggle.parent_id.and_then(|pid| by_id.get(&pid)) {
                Some(parent) if parent.level + 1 == toggle.level => {
                    children.entry(parent.id).or_default().push(toggle);
                }
                _ => orphans.push(toggle),
            }
        }

        Self {
            by_id,
            children,
            roots,
            orphans,
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: &ToggleId) -> Option<&'a Toggle> {
        self.by_id.get(id).copied()
    }

    /// Level-0 toggles.
    pub fn roots(&self) -> &[&'a Toggle] {
        &self.roots
    }

    pub fn children_of(&self, id: &ToggleId) -> &[&'a Toggle] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-root toggles whose parent is absent or at the wrong level.
    pub fn orphans(&self) -> &[&'a Toggle] {
        &self.orphans
    }

    /// In-memory ancestor walk; a missing ancestor resolves to `false`.
    pub fn is_effectively_enabled(&self, id: &ToggleId) -> bool {
        let mut current = self.get(id);
        let mut hops = 0;

        while let Some(toggle) = current {
            if !toggle.enabled {
                return false;
            }
            let Some(parent_id) = toggle.parent_id else {
                return true;
            };
            hops += 1;
            if hops > self.len() {
                return false;
            }
            current = self.get(&parent_id);
        }

        false
    }

    /// Linked descendants of `id`, every node after its own descendants.
    /// `id` itself is not included.
    pub fn descendants_post_order(&self, id: &ToggleId) -> Vec<&'a Toggle> {
        let mut pre_order = Vec::new();
        let mut stack: Vec<&'a Toggle> = self.children_of(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            pre_order.push(node);
            stack.extend(self.children_of(&node.id).iter().rev().copied());
        }
        pre_order.reverse();
        pre_order
    }

    /// Effective state of every toggle, keyed by path.
    pub fn effective_states(&self) -> BTreeMap<String, bool> {
        let mut states = BTreeMap::new();

        let mut stack: Vec<(&'a Toggle, bool)> = self.roots.iter().map(|r| (*r, true)).collect();
        while let Some((node, ancestors_enabled)) = stack.pop() {
            let effective = node.enabled && ancestors_enabled;
            states.insert(node.path.clone(), effective);
            stack.extend(self.children_of(&node.id).iter().map(|c| (*c, effective)));
        }

        for orphan in &self.orphans {
            states.insert(orphan.path.clone(), self.is_effectively_enabled(&orphan.id));
        }

        states
    }
}
