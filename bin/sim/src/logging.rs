//! Subscriber setup for simulation runs.
//!
//! One registry serves both environments: the filter comes from `RUST_LOG`
//! or [`Environment::default_log_filter`], and exactly one formatting layer
//! is active. Development prints multi-line events with source locations so
//! each card evaluation can be followed. Production writes one flattened JSON
//! object per event.

use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

use crate::config::Environment;

/// Install the global subscriber for `env`.
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(env: Environment) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env.default_log_filter()));

    let (pretty, json) = if env.is_development() {
        let layer = fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true);
        (Some(layer), None)
    } else {
        let layer = fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .try_init()?;

    tracing::info!(environment = ?env, "Tracing initialized");
    Ok(())
}
