//! Connection pool construction.
//!
//! Every repository call issues one statement against a connection borrowed from a single
//! primary [`PgPool`]. Pool sizing and timeouts come from [`PoolSettings`], and statements that
//! run longer than `slow_statement_threshold_ms` are logged at WARN.

use crate::config::{Config, PoolSettings};
use sqlx::{
    ConnectOptions, PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::{str::FromStr, time::Duration};
use tracing::info;

/// Build pool options from settings. A zero idle timeout or lifetime means "never".
pub fn pool_options(settings: &PoolSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout((settings.idle_timeout_secs > 0).then(|| Duration::from_secs(settings.idle_timeout_secs)))
        .max_lifetime((settings.max_lifetime_secs > 0).then(|| Duration::from_secs(settings.max_lifetime_secs)))
}

/// Parse the configured URL and attach slow-statement logging.
pub fn connect_options(config: &Config) -> Result<PgConnectOptions, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.database.url)?
        .log_slow_statements(log::LevelFilter::Warn, Duration::from_millis(config.slow_statement_threshold_ms));
    Ok(options)
}

/// Open the main connection pool.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let settings = &config.database.pool;
    info!(
        max_connections = settings.max_connections,
        min_connections = settings.min_connections,
        "Connecting to database"
    );

    pool_options(settings).connect_with(connect_options(config)?).await
}
