//! Tracing subscriber setup for the command-line tool

use crate::io::configuration::{DEFAULT_LOG_FILTER, LOG_FILTER_ENV};
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Errors emitted when configuring the tracing subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// `init_logging` already ran in this process
    #[error("logging has already been initialised")]
    AlreadyInitialised,
    /// Another global subscriber was installed first
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Build the log filter from a raw directive string, falling back to the default
pub fn build_filter(raw: Option<&str>) -> EnvFilter {
    raw.filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install a stderr fmt subscriber filtered by `RUST_LOG`
///
/// # Errors
///
/// Returns an error if logging was already initialised or another global
/// subscriber is installed
pub fn init_logging() -> Result<(), LoggingError> {
    INITIALISED
        .set(())
        .map_err(|()| LoggingError::AlreadyInitialised)?;

    let raw = std::env::var(LOG_FILTER_ENV).ok();
    let filter = build_filter(raw.as_deref());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal());

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
