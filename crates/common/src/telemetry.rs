//! Telemetry initialization

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Initialize tracing for the hosting application
///
/// `RUST_LOG` wins over the configured level. Safe to call more than once;
/// repeat calls are ignored.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json_logging {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("telemetry already initialized");
    }
}
