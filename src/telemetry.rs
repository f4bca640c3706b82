//! Structured logging setup for hosts embedding the board core.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directives could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber is already installed.
    #[error("subscriber already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` when the variable is unset.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init(default_filter: &str) -> Result<(), TelemetryError> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(build_filter(from_env.as_deref(), default_filter)?)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

fn build_filter(from_env: Option<&str>, default_filter: &str) -> Result<EnvFilter, TelemetryError> {
    Ok(EnvFilter::try_new(from_env.unwrap_or(default_filter))?)
}
