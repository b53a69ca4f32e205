//! # Domain Errors
//!
//! Error types for the toggle hierarchy.
//!
//! ## Taxonomy
//!
//! | Kind | Code | Raised when |
//! |------|------|-------------|
//! | Validation | T0001 | Missing or malformed input, cross-application access |
//! | NotFound | T0002 | Application or toggle absent |
//! | AlreadyExists | T0003 | Duplicate terminal path |
//! | Database | T0004 | A store operation failed |
//! | Internal | T0005 | Anything unclassified (corrupt hierarchy data) |
//!
//! `T0006` and `T0007` are detail codes carried by validation records for
//! path and toggle id problems.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Stable error codes exposed to calling layers.
pub mod codes {
    pub const VALIDATION: &str = "T0001";
    pub const NOT_FOUND: &str = "T0002";
    pub const ALREADY_EXISTS: &str = "T0003";
    pub const DATABASE: &str = "T0004";
    pub const INTERNAL: &str = "T0005";
    pub const INVALID_PATH: &str = "T0006";
    pub const INVALID_TOGGLE: &str = "T0007";
}

/// One per-field validation detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    /// Detail code (`T0006` for paths, `T0007` for toggle ids).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }
}

/// Errors returned by every toggle lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    /// Missing or malformed input, or an operation crossing application scope.
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    /// The application or toggle does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The terminal path already exists for the application.
    #[error("{0}")]
    AlreadyExists(String),

    /// A store operation failed. The message names the operation only.
    #[error("{0}")]
    Database(String),

    /// Unexpected condition, usually corrupt hierarchy data.
    #[error("{0}")]
    Internal(String),
}

/// Serialisable discriminant of [`ToggleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleErrorKind {
    Validation,
    NotFound,
    AlreadyExists,
    Database,
    Internal,
}

impl ToggleError {
    /// Validation error without per-field details.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Validation error built from accumulated field records.
    pub fn validation_failed(details: Vec<FieldError>) -> Self {
        Self::Validation {
            message: "validation failed".to_string(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn kind(&self) -> ToggleErrorKind {
        match self {
            Self::Validation { .. } => ToggleErrorKind::Validation,
            Self::NotFound(_) => ToggleErrorKind::NotFound,
            Self::AlreadyExists(_) => ToggleErrorKind::AlreadyExists,
            Self::Database(_) => ToggleErrorKind::Database,
            Self::Internal(_) => ToggleErrorKind::Internal,
        }
    }

    pub fn code(&self) -> &'static str {
        match self.kind() {
            ToggleErrorKind::Validation => codes::VALIDATION,
            ToggleErrorKind::NotFound => codes::NOT_FOUND,
            ToggleErrorKind::AlreadyExists => codes::ALREADY_EXISTS,
            ToggleErrorKind::Database => codes::DATABASE,
            ToggleErrorKind::Internal => codes::INTERNAL,
        }
    }

    pub fn details(&self) -> &[FieldError] {
        match self {
            Self::Validation { details, .. } => details,
            _ => &[],
        }
    }
}

/// Serializable error view for calling layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl From<&ToggleError> for ErrorPayload {
    fn from(err: &ToggleError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            details: err.details().to_vec(),
        }
    }
}

impl From<ToggleError> for ErrorPayload {
    fn from(err: ToggleError) -> Self {
        Self::from(&err)
    }
}

/// Errors reported by outbound store ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The record addressed by an update or delete does not exist.
    #[error("record not found")]
    NotFound,

    /// Unique `(app_id, path)` key violated.
    #[error("toggle path {path} already exists for application {app_id}")]
    Conflict { app_id: String, path: String },

    /// Backend failure (I/O, connection, lock poisoning).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Wrap a store failure into a `Database` error naming the failed operation.
    ///
    /// The backend detail is logged, never returned to the caller.
    pub fn into_toggle_error(self, operation: &str) -> ToggleError {
        error!("[toggles] {}: {}", operation, self);
        ToggleError::Database(operation.to_string())
    }
}
