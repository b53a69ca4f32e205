//! Global subscriber installation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level`. Returns
/// [`TelemetryError::AlreadyInitialized`] if a global subscriber exists.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    let (json_layer, pretty_layer) = match (config.console_output, config.json_logs) {
        (false, _) => (None, None),
        // JSON output for containers/production
        (true, true) => (
            Some(
                fmt::layer()
                    .json()
                    .with_target(config.with_target)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            ),
            None,
        ),
        // Pretty output for development
        (true, false) => (
            None,
            Some(
                fmt::layer()
                    .with_target(config.with_target)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_ansi(true),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInitialized)?;

    tracing::info!(
        service = %config.service_name,
        json = config.json_logs,
        "[toggles] Logging initialized"
    );

    Ok(())
}

/// Best-effort subscriber for test binaries, routed through the test
/// writer so output is captured per test. Safe to call repeatedly.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
