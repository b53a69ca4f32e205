//! # Concurrency Flows
//!
//! Overlapping creates from several threads against one application.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use toggle_hierarchy::{
        HierarchyConfig, InMemoryToggleStore, ToggleLifecycleApi, ToggleStore,
    };
    use toggle_telemetry::{init_test_tracing, init_tracing, TelemetryConfig, TelemetryError};

    use crate::support::{app_id, harness_with, APP};

    const WRITERS: usize = 8;

    fn run_overlapping_creates(serialize: bool) {
        let config = HierarchyConfig {
            serialize_writes_per_app: serialize,
            ..HierarchyConfig::default()
        };
        let h = harness_with(InMemoryToggleStore::new(), config);

        thread::scope(|scope| {
            for i in 0..WRITERS {
                let service = &h.service;
                scope.spawn(move || {
                    service
                        .create_toggle(&format!("shared.mid.leaf{i}"), true, true, APP)
                        .unwrap();
                });
            }
        });

        let all = h.store.get_by_app_id(&app_id(APP)).unwrap();
        assert_eq!(all.len(), WRITERS + 2);

        let paths: HashSet<&str> = all.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths.len(), all.len());

        let mid = all.iter().find(|t| t.path == "shared.mid").unwrap();
        let leaves = h.store.get_children(&mid.id).unwrap();
        assert_eq!(leaves.len(), WRITERS);
    }

    #[test]
    fn test_overlapping_creates_with_app_lock() {
        run_overlapping_creates(true);
    }

    #[test]
    fn test_overlapping_creates_without_app_lock() {
        run_overlapping_creates(false);
    }

    #[test]
    fn test_cascade_and_reads_interleave() {
        let h = harness_with(InMemoryToggleStore::new(), HierarchyConfig::default());
        let root = h.service.create_toggle("r", true, true, APP).unwrap();
        for i in 0..16 {
            h.service.create_toggle(&format!("r.c{i}"), true, true, APP).unwrap();
        }
        let root_id = root.id.to_string();

        thread::scope(|scope| {
            let service = &h.service;
            let root_id = root_id.as_str();
            scope.spawn(move || {
                for round in 0..20 {
                    service
                        .update_enabled_recursively(root_id, round % 2 == 0, APP)
                        .unwrap();
                }
            });
            scope.spawn(move || {
                for _ in 0..20 {
                    let tree = service.get_toggle_hierarchy(APP).unwrap();
                    assert_eq!(tree[0].children().len(), 16);
                }
            });
        });

        // Last round (19) disables.
        let statuses = h.service.get_effective_statuses(APP).unwrap();
        assert!(statuses.values().all(|enabled| !enabled));
    }

    #[test]
    fn test_global_logging_installs_once() {
        init_test_tracing();
        let err = init_tracing(&TelemetryConfig::for_testing()).unwrap_err();
        assert_eq!(err, TelemetryError::AlreadyInitialized);
    }
}
