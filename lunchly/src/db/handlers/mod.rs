//! Repository implementations for database access.
//!
//! Each repository:
//! - Wraps a borrowed SQLx connection (or transaction)
//! - Provides strongly-typed CRUD operations
//! - Handles query construction and parameter binding
//! - Returns domain models from [`crate::db::models`]
//!
//! # Available Repositories
//!
//! - [`Customers`]: Customer records, name search and the busiest-customer ranking
//! - [`Reservations`]: Bookings, listed per customer or overall
//!
//! # Common Pattern
//!
//! ```ignore
//! use lunchly::db::handlers::{Customers, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Customers::new(&mut conn);
//!
//!     let customer = repo.get(1).await?;
//!     println!("{}", customer.full_name());
//!     Ok(())
//! }
//! ```
//!
//! Every method issues a single statement, so a pooled connection is enough; pass a transaction
//! instead when several calls have to commit together.

pub mod customers;
pub mod repository;
pub mod reservations;

pub use customers::Customers;
pub use repository::Repository;
pub use reservations::Reservations;
