//! # Domain Entities
//!
//! The toggle record and its identifiers.
//!
//! Toggles are flat records linked by `parent_id`. Nothing here holds a
//! reference to another toggle; hierarchies are assembled on demand by
//! `algorithms::forest`.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::activation::ActivationRule;
use super::errors::{codes, FieldError, ToggleError};

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Opaque toggle identifier (UUID v7, time-ordered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToggleId(Uuid);

impl ToggleId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a caller-supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, ToggleError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ToggleError::Validation {
                message: "toggle ID is required".to_string(),
                details: vec![FieldError::new("id", "Toggle ID is required")
                    .with_code(codes::INVALID_TOGGLE)],
            });
        }

        Uuid::parse_str(trimmed).map(Self).map_err(|_| ToggleError::Validation {
            message: "invalid toggle ID format".to_string(),
            details: vec![FieldError::new("id", "Invalid toggle ID format")
                .with_code(codes::INVALID_TOGGLE)],
        })
    }
}

impl fmt::Display for ToggleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the owning application.
///
/// Applications live outside this crate; the id is only required to be
/// non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub fn parse(raw: &str) -> Result<Self, ToggleError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ToggleError::Validation {
                message: "application ID is required".to_string(),
                details: vec![FieldError::new("app_id", "Application ID is required")],
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-controlled flags of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleFlags {
    pub enabled: bool,
    pub editable: bool,
}

impl ToggleFlags {
    /// Flags given to ancestors materialized on the way to a new leaf.
    pub const INTERMEDIATE: ToggleFlags = ToggleFlags {
        enabled: true,
        editable: true,
    };

    pub fn new(enabled: bool, editable: bool) -> Self {
        Self { enabled, editable }
    }
}

/// A node in a per-application toggle forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    pub id: ToggleId,
    /// This node's own path segment.
    pub value: String,
    /// Full dotted path from the forest root.
    pub path: String,
    /// Depth, 0 for roots.
    pub level: u32,
    /// Local flag, independent of ancestors.
    pub enabled: bool,
    /// Advisory flag for presentation layers.
    pub editable: bool,
    pub parent_id: Option<ToggleId>,
    pub app_id: AppId,
    pub has_activation_rule: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_rule: Option<ActivationRule>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Toggle {
    /// Create a new toggle record with a fresh id.
    pub fn new(
        value: impl Into<String>,
        path: impl Into<String>,
        level: u32,
        parent_id: Option<ToggleId>,
        app_id: AppId,
        flags: ToggleFlags,
        now: Timestamp,
    ) -> Self {
        Self {
            id: ToggleId::generate(),
            value: value.into(),
            path: path.into(),
            level,
            enabled: flags.enabled,
            editable: flags.editable,
            parent_id,
            app_id,
            has_activation_rule: false,
            activation_rule: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn belongs_to(&self, app_id: &AppId) -> bool {
        &self.app_id == app_id
    }

    /// Set the local flag. Returns `true` if the value changed.
    pub fn set_enabled(&mut self, enabled: bool, now: Timestamp) -> bool {
        let changed = self.enabled != enabled;
        self.enabled = enabled;
        self.updated_at = now;
        changed
    }

    /// Replace or clear the activation rule. The rule is validated first.
    pub fn set_activation_rule(
        &mut self,
        rule: Option<ActivationRule>,
        now: Timestamp,
    ) -> Result<(), ToggleError> {
        if let Some(rule) = &rule {
            rule.validate()?;
        }
        self.has_activation_rule = rule.is_some();
        self.activation_rule = rule;
        self.updated_at = now;
        Ok(())
    }

    pub fn clear_activation_rule(&mut self, now: Timestamp) {
        self.activation_rule = None;
        self.has_activation_rule = false;
        self.updated_at = now;
    }
}
