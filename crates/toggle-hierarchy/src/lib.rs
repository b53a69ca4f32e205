//! # Toggle Hierarchy
//!
//! Feature toggles organised as dotted paths (`billing.invoice.export`),
//! scoped per application, with cascading enable/disable semantics.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Semantics
//!
//! | Operation | Behaviour |
//! |-----------|-----------|
//! | Create | Materializes every missing ancestor (enabled, editable); only the leaf takes caller flags |
//! | Status | Own flag AND every ancestor's flag |
//! | Cascade | Writes one value to a node and all descendants, overwriting their own flags |
//! | Delete | Removes a node and its whole subtree, children first |
//! | Render | Nested `{id, value, enabled, toggles?}` with effective states |
//!
//! ## Module Structure
//!
//! ```text
//! toggle-hierarchy/
//! ├── domain/          # Toggle, ids, activation rules, tree node, errors, invariants
//! ├── algorithms/      # Path codec/validation, create, resolver, cascade, delete, renderer, forest
//! ├── ports/           # API trait (inbound) + store/directory/clock/permission traits (outbound)
//! ├── application/     # ToggleService orchestrating everything
//! ├── adapters/        # In-memory store and application directory
//! └── config.rs        # HierarchyConfig
//! ```
//!
//! ## Example
//!
//! ```
//! use toggle_hierarchy::{
//!     AppId, FixedTimeSource, HierarchyConfig, InMemoryApplicationDirectory,
//!     InMemoryToggleStore, ToggleLifecycleApi, ToggleService, ToggleServiceDependencies,
//! };
//!
//! let deps = ToggleServiceDependencies {
//!     store: InMemoryToggleStore::new(),
//!     directory: InMemoryApplicationDirectory::with_apps([AppId::parse("shop").unwrap()]),
//!     clock: FixedTimeSource::new(0),
//! };
//! let service = ToggleService::new(deps, HierarchyConfig::default());
//!
//! service.create_toggle("checkout.new_flow", true, true, "shop").unwrap();
//! service.update_toggle("checkout", false, "shop").unwrap();
//! assert!(!service.get_toggle_status("checkout.new_flow", "shop").unwrap());
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{InMemoryApplicationDirectory, InMemoryToggleStore};
pub use algorithms::{
    build_toggle_path, build_tree, create_toggle_hierarchy, delete_subtree,
    is_effectively_enabled, parse_toggle_path, set_enabled_recursively, validate_toggle_path,
    ToggleForest,
};
pub use application::{ToggleService, ToggleServiceDependencies};
pub use config::{ConfigError, HierarchyConfig};
pub use domain::{
    codes, ActivationRule, ActivationRuleKind, AppId, CascadeReport, CreateOutcome, ErrorPayload,
    FieldError, StoreError, Timestamp, Toggle, ToggleError, ToggleErrorKind, ToggleFlags,
    ToggleId, ToggleNode, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PATH_LENGTH, DEFAULT_MAX_SEGMENT_LENGTH,
    PATH_SEPARATOR,
};
pub use ports::{
    AllowAllPermission, ApplicationDirectory, FixedTimeSource, ModifyPermission,
    SystemTimeSource, TimeSource, ToggleLifecycleApi, ToggleStore,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
