//! # Inbound Ports
//!
//! API trait defining what the toggle lifecycle can do.
//!
//! Inputs arrive as raw strings from calling layers (HTTP handlers, CLIs)
//! and are validated by the implementation.

use std::collections::BTreeMap;

use crate::domain::{ActivationRule, CascadeReport, Toggle, ToggleError, ToggleNode};

/// Toggle lifecycle API - inbound port.
pub trait ToggleLifecycleApi: Send + Sync {
    /// Create the toggle at `path`, materializing missing ancestors.
    ///
    /// # Errors
    /// - `Validation`: blank or malformed path, blank app id
    /// - `NotFound`: the application does not exist
    /// - `AlreadyExists`: the terminal path is already taken
    fn create_toggle(
        &self,
        path: &str,
        enabled: bool,
        editable: bool,
        app_id: &str,
    ) -> Result<Toggle, ToggleError>;

    /// Effective state of the toggle at `path` (own flag AND every ancestor).
    fn get_toggle_status(&self, path: &str, app_id: &str) -> Result<bool, ToggleError>;

    fn get_toggle_by_id(&self, toggle_id: &str, app_id: &str) -> Result<Toggle, ToggleError>;

    /// Set the local flag of a single toggle addressed by path.
    fn update_toggle(&self, path: &str, enabled: bool, app_id: &str) -> Result<(), ToggleError>;

    /// Set the local flag of a single toggle addressed by id.
    fn update_toggle_by_id(
        &self,
        toggle_id: &str,
        enabled: bool,
        app_id: &str,
    ) -> Result<(), ToggleError>;

    /// Set the local flag of a toggle and every descendant.
    fn update_enabled_recursively(
        &self,
        toggle_id: &str,
        enabled: bool,
        app_id: &str,
    ) -> Result<CascadeReport, ToggleError>;

    /// Delete the toggle at `path` and its subtree. Returns the number of
    /// removed toggles.
    fn delete_toggle(&self, path: &str, app_id: &str) -> Result<usize, ToggleError>;

    /// Every toggle of an application, ordered by level then value.
    fn get_all_toggles_by_app(&self, app_id: &str) -> Result<Vec<Toggle>, ToggleError>;

    /// Nested tree view with effective states.
    fn get_toggle_hierarchy(&self, app_id: &str) -> Result<Vec<ToggleNode>, ToggleError>;

    /// Effective state of every toggle of an application, keyed by path.
    fn get_effective_statuses(&self, app_id: &str) -> Result<BTreeMap<String, bool>, ToggleError>;

    /// Store or clear (`None`) the activation rule of a toggle.
    fn set_activation_rule(
        &self,
        toggle_id: &str,
        app_id: &str,
        rule: Option<ActivationRule>,
    ) -> Result<Toggle, ToggleError>;

    /// Check that `user_id` may write toggles of `app_id`.
    fn ensure_can_modify(&self, user_id: &str, app_id: &str) -> Result<(), ToggleError>;
}
