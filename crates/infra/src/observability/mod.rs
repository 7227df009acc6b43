//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level when it is set. Calling
//! [`init_tracing`] more than once keeps the first subscriber.

use tracing_subscriber::EnvFilter;
use waypoint_domain::LoggingConfig;

/// Install the global fmt subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(waypoint_domain::constants::DEFAULT_LOG_LEVEL));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json {
        builder.json().with_current_span(false).try_init().is_ok()
    } else {
        builder.compact().try_init().is_ok()
    };

    if installed {
        tracing::debug!(level = %config.level, json = config.json, "tracing initialised");
    }
    installed
}
