//! Logging setup
//!
//! The engine logs through `tracing`. Applications that want to see those
//! events install a subscriber once, either their own or the one built here.

use crate::config::TelemetryConfig;
use crate::error::{Result, SeqError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber described by `config`.
///
/// Returns `Ok(false)` when a global subscriber was already installed, which
/// makes the call safe to repeat from tests.
pub fn init_tracing(config: &TelemetryConfig) -> Result<bool> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.filter).map_err(|e| {
        SeqError::validation("init_tracing", "filter", &config.filter, e.to_string())
    })?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(config.with_target),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(config.with_target))
            .try_init()
    };

    Ok(installed.is_ok())
}
