//! # Per-Application Write Locks
//!
//! Advisory serialization of write use-cases within one application.
//! Writes to different applications never contend.
//!
//! An entry lives only while some caller holds or waits on it, so the map
//! is bounded by the number of in-flight writes, not by the number of
//! application ids ever seen.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::AppId;

type AppMutex = Arc<Mutex<()>>;

/// Registry of one mutex per application with in-flight writes.
#[derive(Default)]
pub struct AppLocks {
    enabled: bool,
    locks: Mutex<HashMap<AppId, AppMutex>>,
}

/// Keeps an entry alive while a write is in flight and prunes it on drop.
struct Lease<'a> {
    owner: &'a AppLocks,
    app_id: &'a AppId,
    handle: Option<AppMutex>,
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        let mut locks = self.owner.locks.lock();
        self.handle.take();
        // New handles are only cloned under the outer lock, so a count of
        // one here means nobody else holds or waits on this entry.
        let idle = locks
            .get(self.app_id)
            .is_some_and(|entry| Arc::strong_count(entry) == 1);
        if idle {
            locks.remove(self.app_id);
        }
    }
}

impl AppLocks {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` while holding the write lock of `app_id`.
    ///
    /// Runs `f` directly when serialization is off.
    pub fn run<R>(&self, app_id: &AppId, f: impl FnOnce() -> R) -> R {
        if !self.enabled {
            return f();
        }

        let lease = Lease {
            owner: self,
            app_id,
            handle: Some(Arc::clone(self.locks.lock().entry(app_id.clone()).or_default())),
        };
        let _guard = lease.handle.as_ref().map(|m| m.lock());
        f()
    }

    /// Number of applications with a write in flight.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
