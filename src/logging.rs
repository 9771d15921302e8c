//! Tracing subscriber setup for the `shortlink` binary.
//!
//! Library code only emits events. `RUST_LOG` (mirrored in
//! [`Config::log_level`]) selects the filter and `LOG_FORMAT` picks text or
//! JSON lines. Output goes to stderr so command results on stdout stay
//! clean.

use std::io::IsTerminal as _;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter is malformed or a subscriber is already set.
pub fn init_logging(config: &Config) -> Result<()> {
    let filter = build_filter(&config.log_level)?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn build_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG directives '{directives}': {e}"))
}
