//! Database record models matching table schemas.
//!
//! Each entity has three shapes:
//!
//! - a plain record ([`customers::Customer`], [`reservations::Reservation`]) whose `id` is `None`
//!   until it has been saved
//! - create/update requests consumed by the repositories
//! - a `*DBResponse` returned by the repositories, which always carries an ID
//!
//! Records convert into requests with `From<&Record>`, and responses convert back into records
//! with `From<Response>`.

pub mod customers;
pub mod reservations;
