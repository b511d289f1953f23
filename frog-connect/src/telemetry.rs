//! Console tracing setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Registers a console tracing subscriber.
///
/// `RUST_LOG` takes precedence; `fallback` is used when it is not set.
/// Accepts any valid [`EnvFilter`] directive string (e.g. `"debug"`,
/// `"frog_connect=debug"`). Calling this more than once is a no-op.
pub fn init(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
