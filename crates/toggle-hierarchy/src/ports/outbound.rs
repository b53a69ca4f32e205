//! # Outbound Ports
//!
//! Traits for the collaborators the core consumes: toggle persistence,
//! application existence, wall-clock time and write permission.
//!
//! All ports are synchronous. Every operation runs to completion on the
//! caller's thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::{AppId, StoreError, Timestamp, Toggle, ToggleId};

/// Toggle persistence.
///
/// Implementations must enforce the `(app_id, path)` unique key and report
/// violations as [`StoreError::Conflict`]. `delete` removes a single record;
/// callers resolve the cascade themselves.
pub trait ToggleStore: Send + Sync {
    /// Insert a new record.
    fn create(&self, toggle: &Toggle) -> Result<(), StoreError>;

    fn get_by_id(&self, id: &ToggleId) -> Result<Option<Toggle>, StoreError>;

    fn get_by_path(&self, path: &str, app_id: &AppId) -> Result<Option<Toggle>, StoreError>;

    /// Every toggle of an application, in storage order.
    fn get_by_app_id(&self, app_id: &AppId) -> Result<Vec<Toggle>, StoreError>;

    /// Every toggle of an application, ordered by `(level, value)`.
    fn get_hierarchy_by_app_id(&self, app_id: &AppId) -> Result<Vec<Toggle>, StoreError>;

    /// Replace an existing record. Unknown ids are [`StoreError::NotFound`].
    fn update(&self, toggle: &Toggle) -> Result<(), StoreError>;

    fn delete(&self, id: &ToggleId) -> Result<(), StoreError>;

    fn delete_by_path(&self, path: &str, app_id: &AppId) -> Result<(), StoreError>;

    fn exists(&self, path: &str, app_id: &AppId) -> Result<bool, StoreError>;

    /// Direct children of `parent_id`.
    fn get_children(&self, parent_id: &ToggleId) -> Result<Vec<Toggle>, StoreError>;
}

impl<T: ToggleStore + ?Sized> ToggleStore for Arc<T> {
    fn create(&self, toggle: &Toggle) -> Result<(), StoreError> {
        (**self).create(toggle)
    }

    fn get_by_id(&self, id: &ToggleId) -> Result<Option<Toggle>, StoreError> {
        (**self).get_by_id(id)
    }

    fn get_by_path(&self, path: &str, app_id: &AppId) -> Result<Option<Toggle>, StoreError> {
        (**self).get_by_path(path, app_id)
    }

    fn get_by_app_id(&self, app_id: &AppId) -> Result<Vec<Toggle>, StoreError> {
        (**self).get_by_app_id(app_id)
    }

    fn get_hierarchy_by_app_id(&self, app_id: &AppId) -> Result<Vec<Toggle>, StoreError> {
        (**self).get_hierarchy_by_app_id(app_id)
    }

    fn update(&self, toggle: &Toggle) -> Result<(), StoreError> {
        (**self).update(toggle)
    }

    fn delete(&self, id: &ToggleId) -> Result<(), StoreError> {
        (**self).delete(id)
    }

    fn delete_by_path(&self, path: &str, app_id: &AppId) -> Result<(), StoreError> {
        (**self).delete_by_path(path, app_id)
    }

    fn exists(&self, path: &str, app_id: &AppId) -> Result<bool, StoreError> {
        (**self).exists(path, app_id)
    }

    fn get_children(&self, parent_id: &ToggleId) -> Result<Vec<Toggle>, StoreError> {
        (**self).get_children(parent_id)
    }
}

/// Application existence check.
pub trait ApplicationDirectory: Send + Sync {
    fn exists(&self, app_id: &AppId) -> Result<bool, StoreError>;
}

impl<T: ApplicationDirectory + ?Sized> ApplicationDirectory for Arc<T> {
    fn exists(&self, app_id: &AppId) -> Result<bool, StoreError> {
        (**self).exists(app_id)
    }
}

/// Wall-clock time.
pub trait TimeSource: Send + Sync {
    /// Current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Time source returning a settable instant. For tests and replays.
#[derive(Debug, Default)]
pub struct FixedTimeSource {
    now: AtomicU64,
}

impl FixedTimeSource {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Write-permission check (`CanModify(user, application)`).
///
/// Team and role resolution live outside this crate.
pub trait ModifyPermission: Send + Sync {
    fn can_modify(&self, user_id: &str, app_id: &AppId) -> bool;
}

/// Permits every user on every application.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAllPermission;

impl ModifyPermission for AllowAllPermission {
    fn can_modify(&self, _user_id: &str, _app_id: &AppId) -> bool {
        true
    }
}
