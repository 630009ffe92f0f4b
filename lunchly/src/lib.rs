//! # lunchly: data access for a restaurant reservation tool
//!
//! `lunchly` is the persistence layer behind a small reservation manager. It stores customers and
//! their reservations in PostgreSQL and exposes typed repositories for reading, searching and
//! saving them. The HTTP front end lives elsewhere; [`errors::Error`] implements
//! `axum::response::IntoResponse` so route handlers can return repository failures directly.
//!
//! ## Architecture
//!
//! - The **database layer** ([`db`]) uses the repository pattern. [`db::handlers::Customers`] and
//!   [`db::handlers::Reservations`] each borrow a `PgConnection` and issue one parameterized SQL
//!   statement per call, mapping rows into records from [`db::models`].
//! - **Configuration** ([`config`]) is loaded from YAML and `LUNCHLY_*` environment variables.
//! - **Commands** ([`commands`]) back the `lunchly` binary, printing results as JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lunchly::db::handlers::{Customers, Repository};
//! use lunchly::db::models::customers::Customer;
//!
//! # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//! lunchly::migrator().run(&pool).await?;
//!
//! let mut conn = pool.acquire().await?;
//! let mut customers = Customers::new(&mut conn);
//!
//! let mut customer = Customer::new("Anna", "Smith", None, None);
//! let id = customers.save(&mut customer).await?;
//!
//! for top in customers.top_ten().await? {
//!     println!("{} ({} reservations)", top.full_name(), top.reservation_count);
//! }
//! # let _ = id;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod telemetry;
mod types;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use types::{CustomerId, ReservationId};

use sqlx::PgPool;
use tracing::info;

/// Get the database migrator for running migrations.
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connected application: configuration plus the main pool.
pub struct Application {
    pub config: Config,
    pub db: PgPool,
}

impl Application {
    /// Connect to the database and, unless disabled, apply pending migrations.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db = db::pool::connect(&config).await?;

        if config.run_migrations {
            migrator().run(&db).await?;
            info!("Database migrations up to date");
        }

        Ok(Self { config, db })
    }

    /// Run one command and return its JSON output.
    pub async fn run(&self, command: config::Command) -> errors::Result<serde_json::Value> {
        commands::run(&self.db, command).await
    }

    pub async fn close(self) {
        self.db.close().await;
    }
}
