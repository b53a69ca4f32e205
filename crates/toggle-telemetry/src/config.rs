//! Telemetry configuration.

use serde::{Deserialize, Serialize};
use std::env;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Fallback filter when `RUST_LOG` is unset (trace, debug, info, warn, error,
    /// or a full `EnvFilter` directive)
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,

    /// Include the event target (module path)
    pub with_target: bool,

    /// Write events to stdout at all
    pub console_output: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "toggle-hierarchy".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_target: true,
            console_output: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TOGGLES_SERVICE_NAME`: Service name (default: toggle-hierarchy)
    /// - `TOGGLES_LOG_LEVEL`: Fallback log filter (default: info)
    /// - `TOGGLES_LOG_JSON`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            service_name: lookup("TOGGLES_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: lookup("TOGGLES_LOG_LEVEL").unwrap_or(defaults.log_level),
            json_logs: lookup("TOGGLES_LOG_JSON")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),
            ..defaults
        }
    }

    /// Quiet configuration for tests.
    pub fn for_testing() -> Self {
        Self {
            service_name: "toggle-tests".to_string(),
            log_level: "warn".to_string(),
            console_output: false,
            ..Self::default()
        }
    }
}
