//! # Toggle Service
//!
//! The lifecycle façade implementing [`ToggleLifecycleApi`].
//!
//! ## Architecture
//!
//! This service:
//! 1. Validates raw caller input into domain ids and paths
//! 2. Checks application existence through `ApplicationDirectory`
//! 3. Delegates tree work to the `algorithms` module
//! 4. Normalizes every failure into a [`ToggleError`]
//! 5. Serializes writes per application when configured

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::algorithms::cascade::FOREIGN_TOGGLE;
use crate::algorithms::{
    build_tree, create_toggle_hierarchy, delete_subtree, is_effectively_enabled,
    parse_toggle_path, set_enabled_recursively, validate_toggle_path, ToggleForest,
};
use crate::config::HierarchyConfig;
use crate::domain::{
    ActivationRule, AppId, CascadeReport, FieldError, StoreError, Toggle, ToggleError,
    ToggleFlags, ToggleId, ToggleNode,
};
use crate::ports::{
    AllowAllPermission, ApplicationDirectory, ModifyPermission, TimeSource, ToggleLifecycleApi,
    ToggleStore,
};

use super::app_locks::AppLocks;

/// The toggle lifecycle service.
pub struct ToggleService<S, D, T>
where
    S: ToggleStore,
    D: ApplicationDirectory,
    T: TimeSource,
{
    /// Toggle persistence.
    pub(crate) store: S,
    /// Application existence checks.
    pub(crate) directory: D,
    /// Timestamps for created/updated records.
    pub(crate) clock: T,
    /// Write-permission policy consulted by `ensure_can_modify`.
    pub(crate) permission: Box<dyn ModifyPermission>,
    pub(crate) config: HierarchyConfig,
    pub(crate) locks: AppLocks,
}

/// Dependencies for ToggleService
pub struct ToggleServiceDependencies<S, D, T> {
    pub store: S,
    pub directory: D,
    pub clock: T,
}

impl<S, D, T> ToggleService<S, D, T>
where
    S: ToggleStore,
    D: ApplicationDirectory,
    T: TimeSource,
{
    /// Create a service with the allow-all permission policy.
    pub fn new(deps: ToggleServiceDependencies<S, D, T>, config: HierarchyConfig) -> Self {
        let locks = AppLocks::new(config.serialize_writes_per_app);
        Self {
            store: deps.store,
            directory: deps.directory,
            clock: deps.clock,
            permission: Box::new(AllowAllPermission),
            config,
            locks,
        }
    }

    /// Replace the write-permission policy.
    pub fn with_permission<P: ModifyPermission + 'static>(mut self, permission: P) -> Self {
        self.permission = Box::new(permission);
        self
    }

    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn ensure_application(&self, app_id: &AppId) -> Result<(), ToggleError> {
        match self.directory.exists(app_id) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ToggleError::not_found("application not found")),
            Err(e) => Err(e.into_toggle_error("error checking application")),
        }
    }

    fn find_by_path(&self, path: &str, app_id: &AppId) -> Result<Toggle, ToggleError> {
        self.store
            .get_by_path(path, app_id)
            .map_err(|e| e.into_toggle_error("error fetching toggle"))?
            .ok_or_else(|| ToggleError::not_found("toggle not found"))
    }

    /// Fetch a toggle by id and check it belongs to `app_id`.
    fn find_owned(&self, toggle_id: &ToggleId, app_id: &AppId) -> Result<Toggle, ToggleError> {
        let toggle = self
            .store
            .get_by_id(toggle_id)
            .map_err(|e| e.into_toggle_error("error fetching toggle"))?
            .ok_or_else(|| ToggleError::not_found("toggle not found"))?;

        if !toggle.belongs_to(app_id) {
            return Err(ToggleError::validation(FOREIGN_TOGGLE));
        }
        Ok(toggle)
    }

    fn persist(&self, toggle: &Toggle) -> Result<(), ToggleError> {
        match self.store.update(toggle) {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound) => Err(ToggleError::not_found("toggle not found")),
            Err(e) => Err(e.into_toggle_error("error updating toggle")),
        }
    }

    fn set_single_flag(&self, mut toggle: Toggle, enabled: bool) -> Result<(), ToggleError> {
        let changed = toggle.set_enabled(enabled, self.clock.now());
        self.persist(&toggle)?;
        info!(
            app_id = %toggle.app_id,
            path = %toggle.path,
            enabled,
            changed,
            "[toggles] Toggle updated"
        );
        Ok(())
    }
}

fn require_path(path: &str) -> Result<&str, ToggleError> {
    if path.trim().is_empty() {
        return Err(ToggleError::validation("toggle path is required"));
    }
    Ok(path)
}

/// Parse the id pair used by the by-id operations.
fn require_id_pair(toggle_id: &str, app_id: &str) -> Result<(ToggleId, AppId), ToggleError> {
    if toggle_id.trim().is_empty() || app_id.trim().is_empty() {
        return Err(ToggleError::validation(
            "toggle ID and application ID are required",
        ));
    }
    Ok((ToggleId::parse(toggle_id)?, AppId::parse(app_id)?))
}

impl<S, D, T> ToggleLifecycleApi for ToggleService<S, D, T>
where
    S: ToggleStore,
    D: ApplicationDirectory,
    T: TimeSource,
{
    fn create_toggle(
        &self,
        path: &str,
        enabled: bool,
        editable: bool,
        app_id: &str,
    ) -> Result<Toggle, ToggleError> {
        let path = require_path(path)?;
        let app_id = AppId::parse(app_id)?;
        validate_toggle_path(path, &self.config)?;
        self.ensure_application(&app_id)?;

        let outcome = self.locks.run(&app_id, || {
            let exists = self
                .store
                .exists(path, &app_id)
                .map_err(|e| e.into_toggle_error("error checking toggle existence"))?;
            if exists {
                return Err(ToggleError::already_exists("toggle already exists"));
            }

            let segments = parse_toggle_path(path);
            create_toggle_hierarchy(
                &self.store,
                &self.clock,
                &segments,
                ToggleFlags::new(enabled, editable),
                &app_id,
            )
        })?;

        info!(
            app_id = %app_id,
            path = %path,
            toggle_id = %outcome.toggle.id,
            "[toggles] Toggle created ({} new, {} reused)",
            outcome.created.len(),
            outcome.reused
        );
        Ok(outcome.toggle)
    }

    fn get_toggle_status(&self, path: &str, app_id: &str) -> Result<bool, ToggleError> {
        let path = require_path(path)?;
        let app_id = AppId::parse(app_id)?;
        let toggle = self.find_by_path(path, &app_id)?;
        Ok(is_effectively_enabled(&self.store, &toggle))
    }

    fn get_toggle_by_id(&self, toggle_id: &str, app_id: &str) -> Result<Toggle, ToggleError> {
        let (toggle_id, app_id) = require_id_pair(toggle_id, app_id)?;
        self.find_owned(&toggle_id, &app_id)
    }

    fn update_toggle(&self, path: &str, enabled: bool, app_id: &str) -> Result<(), ToggleError> {
        let path = require_path(path)?;
        let app_id = AppId::parse(app_id)?;

        self.locks.run(&app_id, || {
            let toggle = self.find_by_path(path, &app_id)?;
            self.set_single_flag(toggle, enabled)
        })
    }

    fn update_toggle_by_id(
        &self,
        toggle_id: &str,
        enabled: bool,
        app_id: &str,
    ) -> Result<(), ToggleError> {
        let (toggle_id, app_id) = require_id_pair(toggle_id, app_id)?;

        self.locks.run(&app_id, || {
            let toggle = self.find_owned(&toggle_id, &app_id)?;
            self.set_single_flag(toggle, enabled)
        })
    }

    fn update_enabled_recursively(
        &self,
        toggle_id: &str,
        enabled: bool,
        app_id: &str,
    ) -> Result<CascadeReport, ToggleError> {
        let (toggle_id, app_id) = require_id_pair(toggle_id, app_id)?;

        self.locks.run(&app_id, || {
            set_enabled_recursively(
                &self.store,
                &self.clock,
                &toggle_id,
                enabled,
                &app_id,
                self.config.max_depth,
            )
        })
    }

    fn delete_toggle(&self, path: &str, app_id: &str) -> Result<usize, ToggleError> {
        let path = require_path(path)?;
        let app_id = AppId::parse(app_id)?;

        self.locks.run(&app_id, || {
            let exists = self
                .store
                .exists(path, &app_id)
                .map_err(|e| e.into_toggle_error("error checking toggle existence"))?;
            if !exists {
                return Err(ToggleError::not_found("toggle not found"));
            }

            let root = self.find_by_path(path, &app_id)?;
            delete_subtree(&self.store, &root, self.config.max_depth)
        })
    }

    fn get_all_toggles_by_app(&self, app_id: &str) -> Result<Vec<Toggle>, ToggleError> {
        let app_id = AppId::parse(app_id)?;
        self.ensure_application(&app_id)?;

        self.store
            .get_hierarchy_by_app_id(&app_id)
            .map_err(|e| e.into_toggle_error("error fetching toggles"))
    }

    fn get_toggle_hierarchy(&self, app_id: &str) -> Result<Vec<ToggleNode>, ToggleError> {
        let app_id = AppId::parse(app_id)?;

        let toggles = self
            .store
            .get_hierarchy_by_app_id(&app_id)
            .map_err(|e| e.into_toggle_error("error fetching toggle hierarchy"))?;
        debug!(app_id = %app_id, "[toggles] Rendering {} toggles", toggles.len());

        Ok(build_tree(&toggles))
    }

    fn get_effective_statuses(&self, app_id: &str) -> Result<BTreeMap<String, bool>, ToggleError> {
        let app_id = AppId::parse(app_id)?;
        self.ensure_application(&app_id)?;

        let toggles = self
            .store
            .get_by_app_id(&app_id)
            .map_err(|e| e.into_toggle_error("error fetching toggles"))?;

        Ok(ToggleForest::new(&toggles).effective_states())
    }

    fn set_activation_rule(
        &self,
        toggle_id: &str,
        app_id: &str,
        rule: Option<ActivationRule>,
    ) -> Result<Toggle, ToggleError> {
        let (toggle_id, app_id) = require_id_pair(toggle_id, app_id)?;

        let toggle = self.locks.run(&app_id, || {
            let mut toggle = self.find_owned(&toggle_id, &app_id)?;
            toggle.set_activation_rule(rule, self.clock.now())?;
            self.persist(&toggle)?;
            Ok::<_, ToggleError>(toggle)
        })?;

        info!(
            app_id = %app_id,
            path = %toggle.path,
            has_rule = toggle.has_activation_rule,
            "[toggles] Activation rule updated"
        );
        Ok(toggle)
    }

    fn ensure_can_modify(&self, user_id: &str, app_id: &str) -> Result<(), ToggleError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ToggleError::Validation {
                message: "user ID is required".to_string(),
                details: vec![FieldError::new("user", "User ID is required")],
            });
        }
        let app_id = AppId::parse(app_id)?;

        if !self.permission.can_modify(user_id, &app_id) {
            debug!(app_id = %app_id, user_id, "[toggles] Write permission denied");
            return Err(ToggleError::Validation {
                message: "user cannot modify toggles of this application".to_string(),
                details: vec![FieldError::new(
                    "user",
                    "User does not have write access to this application",
                )],
            });
        }
        Ok(())
    }
}
