//! Tracing subscriber setup shared by both binaries

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::LoggingConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `logging.level`. Calling this twice is harmless; the
/// second install is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
