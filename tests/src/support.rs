//! # Test Support
//!
//! Service harness and a `ToggleStore` wrapper that injects failures.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use toggle_hierarchy::{
    AppId, FixedTimeSource, HierarchyConfig, InMemoryApplicationDirectory, InMemoryToggleStore,
    StoreError, Toggle, ToggleFlags, ToggleId, ToggleService, ToggleServiceDependencies,
    ToggleStore,
};

/// Application registered in every harness.
pub const APP: &str = "app-1";

/// Second registered application, for cross-app checks.
pub const OTHER_APP: &str = "app-2";

/// Clock start for every harness.
pub const T0: u64 = 1_700_000_000;

pub type HarnessService<S> =
    ToggleService<Arc<S>, Arc<InMemoryApplicationDirectory>, Arc<FixedTimeSource>>;

/// A service plus shared handles to its collaborators.
pub struct Harness<S: ToggleStore> {
    pub service: HarnessService<S>,
    pub store: Arc<S>,
    pub directory: Arc<InMemoryApplicationDirectory>,
    pub clock: Arc<FixedTimeSource>,
}

pub fn app_id(raw: &str) -> AppId {
    AppId::parse(raw).unwrap_or_else(|e| panic!("bad test app id {raw}: {e}"))
}

/// Harness over a plain in-memory store with default config.
pub fn harness() -> Harness<InMemoryToggleStore> {
    harness_with(InMemoryToggleStore::new(), HierarchyConfig::default())
}

pub fn harness_with<S: ToggleStore>(store: S, config: HierarchyConfig) -> Harness<S> {
    toggle_telemetry::init_test_tracing();

    let store = Arc::new(store);
    let directory = Arc::new(InMemoryApplicationDirectory::with_apps([
        app_id(APP),
        app_id(OTHER_APP),
    ]));
    let clock = Arc::new(FixedTimeSource::new(T0));

    let deps = ToggleServiceDependencies {
        store: Arc::clone(&store),
        directory: Arc::clone(&directory),
        clock: Arc::clone(&clock),
    };

    Harness {
        service: ToggleService::new(deps, config),
        store,
        directory,
        clock,
    }
}

/// Fetch a toggle by path, panicking if absent.
pub fn stored<S: ToggleStore>(store: &S, path: &str, app: &str) -> Toggle {
    store
        .get_by_path(path, &app_id(app))
        .ok()
        .flatten()
        .unwrap_or_else(|| panic!("toggle {path} missing for {app}"))
}

/// Insert a toggle directly, bypassing the service.
pub fn insert_raw<S: ToggleStore>(
    store: &S,
    parent: Option<&Toggle>,
    value: &str,
    enabled: bool,
    app: &str,
) -> Toggle {
    let (path, level) = match parent {
        Some(p) => (format!("{}.{}", p.path, value), p.level + 1),
        None => (value.to_string(), 0),
    };
    let toggle = Toggle::new(
        value,
        path,
        level,
        parent.map(|p| p.id),
        app_id(app),
        ToggleFlags::new(enabled, true),
        T0,
    );
    if let Err(e) = store.create(&toggle) {
        panic!("raw insert of {} failed: {e}", toggle.path);
    }
    toggle
}

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Create,
    GetById,
    GetByPath,
    GetByAppId,
    GetHierarchy,
    Update,
    Delete,
    DeleteByPath,
    Exists,
    GetChildren,
}

/// `ToggleStore` wrapper that fails chosen operations and can simulate a
/// concurrent writer winning a create race.
#[derive(Default)]
pub struct FailingToggleStore {
    inner: InMemoryToggleStore,
    /// Remaining successful calls before an operation starts failing.
    budgets: Mutex<HashMap<StoreOp, usize>>,
    /// Paths whose next create loses to a competing insert.
    races: Mutex<HashSet<String>>,
}

impl FailingToggleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call to `op` from now on.
    pub fn fail(&self, op: StoreOp) {
        self.fail_after(op, 0);
    }

    /// Let `op` succeed `successes` more times, then fail.
    pub fn fail_after(&self, op: StoreOp, successes: usize) {
        self.budgets.lock().insert(op, successes);
    }

    pub fn heal(&self) {
        self.budgets.lock().clear();
    }

    /// The next create at `path` finds a record already inserted by
    /// "another writer" and gets a `Conflict`.
    pub fn race_on_create(&self, path: &str) {
        self.races.lock().insert(path.to_string());
    }

    pub fn inner(&self) -> &InMemoryToggleStore {
        &self.inner
    }

    fn check(&self, op: StoreOp) -> Result<(), StoreError> {
        let mut budgets = self.budgets.lock();
        match budgets.get_mut(&op) {
            Some(0) => Err(StoreError::Unavailable(format!("injected {op:?} failure"))),
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl ToggleStore for FailingToggleStore {
    fn create(&self, toggle: &Toggle) -> Result<(), StoreError> {
        self.check(StoreOp::Create)?;
        if self.races.lock().remove(&toggle.path) {
            let competitor = Toggle {
                id: ToggleId::generate(),
                ..toggle.clone()
            };
            self.inner.create(&competitor)?;
            return Err(StoreError::Conflict {
                app_id: toggle.app_id.to_string(),
                path: toggle.path.clone(),
            });
        }
        self.inner.create(toggle)
    }

    fn get_by_id(&self, id: &ToggleId) -> Result<Option<Toggle>, StoreError> {
        self.check(StoreOp::GetById)?;
        self.inner.get_by_id(id)
    }

    fn get_by_path(&self, path: &str, app_id: &AppId) -> Result<Option<Toggle>, StoreError> {
        self.check(StoreOp::GetByPath)?;
        self.inner.get_by_path(path, app_id)
    }

    fn get_by_app_id(&self, app_id: &AppId) -> Result<Vec<Toggle>, StoreError> {
        self.check(StoreOp::GetByAppId)?;
        self.inner.get_by_app_id(app_id)
    }

    fn get_hierarchy_by_app_id(&self, app_id: &AppId) -> Result<Vec<Toggle>, StoreError> {
        self.check(StoreOp::GetHierarchy)?;
        self.inner.get_hierarchy_by_app_id(app_id)
    }

    fn update(&self, toggle: &Toggle) -> Result<(), StoreError> {
        self.check(StoreOp::Update)?;
        self.inner.update(toggle)
    }

    fn delete(&self, id: &ToggleId) -> Result<(), StoreError> {
        self.check(StoreOp::Delete)?;
        self.inner.delete(id)
    }

    fn delete_by_path(&self, path: &str, app_id: &AppId) -> Result<(), StoreError> {
        self.check(StoreOp::DeleteByPath)?;
        self.inner.delete_by_path(path, app_id)
    }

    fn exists(&self, path: &str, app_id: &AppId) -> Result<bool, StoreError> {
        self.check(StoreOp::Exists)?;
        self.inner.exists(path, app_id)
    }

    fn get_children(&self, parent_id: &ToggleId) -> Result<Vec<Toggle>, StoreError> {
        self.check(StoreOp::GetChildren)?;
        self.inner.get_children(parent_id)
    }
}
