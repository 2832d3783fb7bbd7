//! Structured logging setup

use crate::config::{LogConfig, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "bookstore_core=info,tower_http=info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`]. With `LOG_FORMAT=json` events are
/// emitted as flattened JSON objects so `message` sits at the top level.
pub fn init(config: &LogConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true);
            registry.with(fmt_layer).init();
        }
        LogFormat::Pretty => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }
}
