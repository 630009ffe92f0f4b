//! Database models for reservations.

use crate::db::errors::DbError;
use crate::types::{CustomerId, ReservationId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A booking held by a single customer.
///
/// `id` is `None` until the reservation has been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Option<ReservationId>,
    pub customer_id: CustomerId,
    pub start_at: NaiveDateTime,
    pub num_guests: i32,
    pub notes: String,
}

impl Reservation {
    /// Build an unsaved reservation, rejecting parties smaller than one guest.
    pub fn new(customer_id: CustomerId, start_at: NaiveDateTime, num_guests: i32, notes: Option<String>) -> Result<Self, DbError> {
        let reservation = Self {
            id: None,
            customer_id,
            start_at,
            num_guests,
            notes: notes.unwrap_or_default(),
        };
        reservation.validate()?;
        Ok(reservation)
    }

    /// Fields are public, so this runs again on every save.
    pub fn validate(&self) -> Result<(), DbError> {
        if self.num_guests < 1 {
            return Err(DbError::InvalidInput {
                entity: "reservation",
                message: "Must have at least 1 guest".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl From<ReservationDBResponse> for Reservation {
    fn from(db: ReservationDBResponse) -> Self {
        Self {
            id: Some(db.id),
            customer_id: db.customer_id,
            start_at: db.start_at,
            num_guests: db.num_guests,
            notes: db.notes,
        }
    }
}

/// Database request for creating a new reservation
#[derive(Debug, Clone)]
pub struct ReservationCreateDBRequest {
    pub customer_id: CustomerId,
    pub start_at: NaiveDateTime,
    pub num_guests: i32,
    pub notes: String,
}

impl From<&Reservation> for ReservationCreateDBRequest {
    fn from(reservation: &Reservation) -> Self {
        Self {
            customer_id: reservation.customer_id,
            start_at: reservation.start_at,
            num_guests: reservation.num_guests,
            notes: reservation.notes.clone(),
        }
    }
}

/// Database request for updating a reservation
#[derive(Debug, Clone)]
pub struct ReservationUpdateDBRequest {
    pub customer_id: CustomerId,
    pub start_at: NaiveDateTime,
    pub num_guests: i32,
    pub notes: String,
}

impl From<&Reservation> for ReservationUpdateDBRequest {
    fn from(reservation: &Reservation) -> Self {
        Self {
            customer_id: reservation.customer_id,
            start_at: reservation.start_at,
            num_guests: reservation.num_guests,
            notes: reservation.notes.clone(),
        }
    }
}

/// Database response for a reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDBResponse {
    pub id: ReservationId,
    pub customer_id: CustomerId,
    pub start_at: NaiveDateTime,
    pub num_guests: i32,
    pub notes: String,
}
