//! Log output for the `tplb` binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when `RUST_LOG` is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install a stderr formatter filtered by `RUST_LOG`.
///
/// Records emitted through the `log` facade by the library crates are
/// forwarded to the same subscriber. Calling this more than once keeps the
/// first subscriber.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    if tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .is_err()
    {
        log::debug!("logging already initialised");
    }
}
