//! Tracing initialization.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] (default `info`, override with
//! `RUST_LOG`) and a fmt layer. Logs go to stderr so command output on stdout stays machine
//! readable.

use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing with console output.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    debug!("Telemetry initialized");
    Ok(())
}
