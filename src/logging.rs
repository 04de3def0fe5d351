//! Logging configuration using the tracing ecosystem.
//!
//! Structured logs go to stdout with the level controlled by `RUST_LOG`;
//! request spans come from tower-http's `TraceLayer` on the router.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log filter if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "jirasheet=info,tower_http=info,warn";

/// Initialize the logging system.
///
/// # Log Levels
///
/// Configure via the `RUST_LOG` environment variable:
/// - `RUST_LOG=debug` - verbose output for debugging
/// - `RUST_LOG=jirasheet=debug` - debug only for jirasheet
///
/// # Errors
///
/// Returns an error if the tracing subscriber cannot be set.
pub fn init() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jirasheet starting up");

    Ok(())
}
