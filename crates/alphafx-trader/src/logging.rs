//! Structured logging initialization.

use crate::error::AppResult;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. `RUST_ENV=production`
/// switches to single-line JSON for log shippers; anything else gets a
/// compact human-readable format.
pub fn init_logging() -> AppResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,alphafx=debug"));

    let builder = fmt().with_env_filter(filter).with_target(true);

    match std::env::var("RUST_ENV").as_deref() {
        Ok("production") => builder.json().flatten_event(true).init(),
        _ => builder.compact().init(),
    }

    Ok(())
}
