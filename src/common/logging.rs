use tracing_subscriber::EnvFilter;
use crate::common::error::{InventoryError, Result};

/// Build the log filter: `RUST_LOG` when set, otherwise `default_directive`
pub fn build_filter(default_directive: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(default_directive).map_err(|e| {
        InventoryError::Config(format!("invalid log filter '{}': {}", default_directive, e))
    })
}

/// Install the global subscriber. Logs go to stderr so they never mix with shell output.
pub fn init_tracing(default_directive: &str) -> Result<()> {
    let filter = build_filter(default_directive)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| InventoryError::internal(format!("failed to install tracing subscriber: {}", e)))
}
