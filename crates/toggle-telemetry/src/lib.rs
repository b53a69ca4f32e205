//! # Toggle Telemetry
//!
//! Structured logging setup for services embedding the toggle hierarchy.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use toggle_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_tracing(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUST_LOG` | unset | Filter directive, wins over the configured level |
//! | `TOGGLES_LOG_LEVEL` | `info` | Fallback filter |
//! | `TOGGLES_LOG_JSON` | `false` | JSON output |
//! | `TOGGLES_SERVICE_NAME` | `toggle-hierarchy` | Service name |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_test_tracing, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,

    #[error("Invalid configuration: {0}")]
    Config(String),
}
