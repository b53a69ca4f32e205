//! # In-Memory Toggle Store
//!
//! `ToggleStore` backed by a `parking_lot::RwLock`-guarded map with a
//! unique `(app_id, path)` index. Suitable for embedded single-process use
//! and as the test double for the service.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{AppId, StoreError, Toggle, ToggleId};
use crate::ports::ToggleStore;

type PathKey = (AppId, String);

#[derive(Default)]
struct Inner {
    /// Record plus its insertion sequence.
    records: HashMap<ToggleId, (u64, Toggle)>,
    by_path: HashMap<PathKey, ToggleId>,
    next_seq: u64,
}

impl Inner {
    fn collect_sorted<F>(&self, filter: F) -> Vec<Toggle>
    where
        F: Fn(&Toggle) -> bool,
    {
        let mut hits: Vec<&(u64, Toggle)> =
            self.records.values().filter(|(_, t)| filter(t)).collect();
        hits.sort_by_key(|(seq, _)| *seq);
        hits.into_iter().map(|(_, t)| t.clone()).collect()
    }
}

/// In-memory toggle store.
#[derive(Default)]
pub struct InMemoryToggleStore {
    inner: RwLock<Inner>,
}

impl InMemoryToggleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all applications.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn key(app_id: &AppId, path: &str) -> PathKey {
    (app_id.clone(), path.to_string())
}

impl ToggleStore for InMemoryToggleStore {
    fn create(&self, toggle: &Toggle) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let path_key = key(&toggle.app_id, &toggle.path);

        if inner.by_path.contains_key(&path_key) || inner.records.contains_key(&toggle.id) {
            return Err(StoreError::Conflict {
                app_id: toggle.app_id.to_string(),
                path: toggle.path.clone(),
            });
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.by_path.insert(path_key, toggle.id);
        inner.records.insert(toggle.id, (seq, toggle.clone()));
        Ok(())
    }

    fn get_by_id(&self, id: &ToggleId) -> Result<Option<Toggle>, StoreError> {
        Ok(self.inner.read().records.get(id).map(|(_, t)| t.clone()))
    }

    fn get_by_path(&self, path: &str, app_id: &AppId) -> Result<Option<Toggle>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .by_path
            .get(&key(app_id, path))
            .and_then(|id| inner.records.get(id))
            .map(|(_, t)| t.clone()))
    }

    fn get_by_app_id(&self, app_id: &AppId) -> Result<Vec<Toggle>, StoreError> {
        Ok(self.inner.read().collect_sorted(|t| t.belongs_to(app_id)))
    }

    fn get_hierarchy_by_app_id(&self, app_id: &AppId) -> Result<Vec<Toggle>, StoreError> {
        let mut toggles = self.get_by_app_id(app_id)?;
        toggles.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.value.cmp(&b.value)));
        Ok(toggles)
    }

    fn update(&self, toggle: &Toggle) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let Some((seq, previous)) = inner.records.get(&toggle.id).cloned() else {
            return Err(StoreError::NotFound);
        };

        let old_key = key(&previous.app_id, &previous.path);
        let new_key = key(&toggle.app_id, &toggle.path);
        if old_key != new_key {
            if inner.by_path.contains_key(&new_key) {
                return Err(StoreError::Conflict {
                    app_id: toggle.app_id.to_string(),
                    path: toggle.path.clone(),
                });
            }
            inner.by_path.remove(&old_key);
            inner.by_path.insert(new_key, toggle.id);
        }

        inner.records.insert(toggle.id, (seq, toggle.clone()));
        Ok(())
    }

    fn delete(&self, id: &ToggleId) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let (_, removed) = inner.records.remove(id).ok_or(StoreError::NotFound)?;
        inner.by_path.remove(&key(&removed.app_id, &removed.path));
        Ok(())
    }

    fn delete_by_path(&self, path: &str, app_id: &AppId) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let id = inner
            .by_path
            .remove(&key(app_id, path))
            .ok_or(StoreError::NotFound)?;
        inner.records.remove(&id);
        Ok(())
    }

    fn exists(&self, path: &str, app_id: &AppId) -> Result<bool, StoreError> {
        Ok(self.inner.read().by_path.contains_key(&key(app_id, path)))
    }

    fn get_children(&self, parent_id: &ToggleId) -> Result<Vec<Toggle>, StoreError> {
        Ok(self
            .inner
            .read()
            .collect_sorted(|t| t.parent_id.as_ref() == Some(parent_id)))
    }
}
