//! # Activation Rules
//!
//! Optional targeting rule attached to a toggle. Rules are stored and
//! validated here; evaluating them against a request happens in client
//! libraries, so they never influence effective enablement.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{FieldError, ToggleError};

/// Supported rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationRuleKind {
    /// Enable for X% of requests.
    Percentage,
    /// Enable when a named request parameter matches.
    Parameter,
    /// Enable for specific users.
    UserId,
    /// Enable for specific IP addresses.
    Ip,
    /// Enable for specific countries.
    Country,
    /// Enable inside a time window.
    Time,
    /// Enable for canary releases.
    Canary,
}

impl ActivationRuleKind {
    pub const ALL: [ActivationRuleKind; 7] = [
        Self::Percentage,
        Self::Parameter,
        Self::UserId,
        Self::Ip,
        Self::Country,
        Self::Time,
        Self::Canary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Parameter => "parameter",
            Self::UserId => "user_id",
            Self::Ip => "ip",
            Self::Country => "country",
            Self::Time => "time",
            Self::Canary => "canary",
        }
    }
}

impl fmt::Display for ActivationRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A targeting rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRule {
    #[serde(rename = "type")]
    pub kind: ActivationRuleKind,
    pub value: String,
    /// Free-form, kind-specific settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl ActivationRule {
    pub fn new(kind: ActivationRuleKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            config: None,
        }
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    pub fn validate(&self) -> Result<(), ToggleError> {
        let value = self.value.trim();
        if value.is_empty() {
            return Err(ToggleError::Validation {
                message: format!("{} rule value is required", self.kind),
                details: vec![FieldError::new(
                    "activation_rule.value",
                    format!("Value is required for {} rules", self.kind),
                )],
            });
        }

        if self.kind == ActivationRuleKind::Percentage {
            let in_range = value
                .parse::<f64>()
                .map(|pct| (0.0..=100.0).contains(&pct))
                .unwrap_or(false);
            if !in_range {
                return Err(ToggleError::Validation {
                    message: "percentage rule value must be between 0 and 100".to_string(),
                    details: vec![FieldError::new(
                        "activation_rule.value",
                        format!("'{}' is not a percentage between 0 and 100", value),
                    )],
                });
            }
        }

        Ok(())
    }
}
