//! Log output for the driver.

use anyhow::Context;
use tracing::subscriber;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber and routes `log` records from the library
/// crates into it.
pub fn init() -> anyhow::Result<()> {
    LogTracer::init().context("failed to bridge log records")?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false));
    subscriber::set_global_default(registry).context("failed to install the log subscriber")?;
    Ok(())
}
