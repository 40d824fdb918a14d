//! Tracing initialisation for the `jex` binary.
//!
//! Logs go to stderr so stdout carries nothing but Ansible's output.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default verbosity when `RUST_LOG` is not set.
pub const DEFAULT_LEVEL: Level = Level::WARN;

/// Initialise the global tracing subscriber.
///
/// Respects `RUST_LOG` for fine-grained filtering and falls back to [`DEFAULT_LEVEL`].
/// Only the first call takes effect.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}
