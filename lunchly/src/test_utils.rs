//! Shared fixtures for database-backed tests.

use crate::db::{
    handlers::{Customers, Repository, Reservations},
    models::{
        customers::{CustomerCreateDBRequest, CustomerDBResponse},
        reservations::{ReservationCreateDBRequest, ReservationDBResponse},
    },
};
use crate::types::CustomerId;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use sqlx::PgConnection;

/// 19:00 on 2024-05-01, shifted by `days`
pub fn start_at(days: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(19, 0, 0))
        .expect("valid fixture date")
        + Duration::days(days)
}

pub async fn create_test_customer(conn: &mut PgConnection, first_name: &str, last_name: &str) -> CustomerDBResponse {
    Customers::new(conn)
        .create(&CustomerCreateDBRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: None,
            notes: String::new(),
        })
        .await
        .expect("Failed to create test customer")
}

pub async fn create_test_reservation(
    conn: &mut PgConnection,
    customer_id: CustomerId,
    start_at: NaiveDateTime,
    num_guests: i32,
) -> ReservationDBResponse {
    Reservations::new(conn)
        .create(&ReservationCreateDBRequest {
            customer_id,
            start_at,
            num_guests,
            notes: String::new(),
        })
        .await
        .expect("Failed to create test reservation")
}
