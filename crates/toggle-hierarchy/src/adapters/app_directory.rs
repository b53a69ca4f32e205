//! # In-Memory Application Directory
//!
//! Set of registered application ids.

use std::collections::HashSet;

use parking_lot::RwLock;

use crate::domain::{AppId, StoreError};
use crate::ports::ApplicationDirectory;

#[derive(Default)]
pub struct InMemoryApplicationDirectory {
    apps: RwLock<HashSet<AppId>>,
}

impl InMemoryApplicationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_apps<I: IntoIterator<Item = AppId>>(apps: I) -> Self {
        Self {
            apps: RwLock::new(apps.into_iter().collect()),
        }
    }

    /// Returns `false` if the application was already registered.
    pub fn register(&self, app_id: AppId) -> bool {
        self.apps.write().insert(app_id)
    }

    pub fn remove(&self, app_id: &AppId) -> bool {
        self.apps.write().remove(app_id)
    }
}

impl ApplicationDirectory for InMemoryApplicationDirectory {
    fn exists(&self, app_id: &AppId) -> Result<bool, StoreError> {
        Ok(self.apps.read().contains(app_id))
    }
}
