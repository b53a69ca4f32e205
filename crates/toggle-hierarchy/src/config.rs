//! # Hierarchy Configuration
//!
//! Limits applied to toggle paths and to recursive hierarchy walks.
//!
//! ```toml
//! max_path_length = 1000
//! max_depth = 32
//! max_segment_length = 255
//! serialize_writes_per_app = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PATH_LENGTH, DEFAULT_MAX_SEGMENT_LENGTH};

/// Toggle hierarchy configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Maximum path length in characters.
    pub max_path_length: usize,

    /// Maximum number of segments in a path. Also bounds cascade and
    /// delete recursion.
    pub max_depth: usize,

    /// Maximum characters of a single segment.
    pub max_segment_length: usize,

    /// Hold a per-application lock for the duration of each write.
    pub serialize_writes_per_app: bool,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
            max_segment_length: DEFAULT_MAX_SEGMENT_LENGTH,
            serialize_writes_per_app: true,
        }
    }
}

impl HierarchyConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            max_path_length: 64,
            max_depth: 6,
            max_segment_length: 16,
            serialize_writes_per_app: true,
        }
    }

    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string. Missing keys
    /// take their default.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_path_length == 0 {
            return Err(ConfigError::Invalid("max_path_length must be > 0".into()));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be > 0".into()));
        }
        if self.max_segment_length == 0 {
            return Err(ConfigError::Invalid("max_segment_length must be > 0".into()));
        }
        if self.max_segment_length > self.max_path_length {
            return Err(ConfigError::Invalid(format!(
                "max_segment_length ({}) exceeds max_path_length ({})",
                self.max_segment_length, self.max_path_length
            )));
        }
        Ok(())
    }
}

/// Errors that can occur during config loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
