//! Database repository for reservations.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{Repository, check_paging},
    models::reservations::{Reservation, ReservationCreateDBRequest, ReservationDBResponse, ReservationUpdateDBRequest},
};
use crate::types::{CustomerId, ReservationId};
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgConnection};
use std::collections::HashMap;
use tracing::instrument;

/// Filter for listing reservations
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub skip: i64,
    /// `None` lists every reservation
    pub limit: Option<i64>,
    pub customer_id: Option<CustomerId>,
}

impl ReservationFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip,
            limit: Some(limit),
            customer_id: None,
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct ReservationRow {
    pub id: ReservationId,
    pub customer_id: CustomerId,
    pub start_at: NaiveDateTime,
    pub num_guests: i32,
    pub notes: String,
}

impl From<ReservationRow> for ReservationDBResponse {
    fn from(row: ReservationRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            start_at: row.start_at,
            num_guests: row.num_guests,
            notes: row.notes,
        }
    }
}

pub struct Reservations<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Reservations<'c> {
    type CreateRequest = ReservationCreateDBRequest;
    type UpdateRequest = ReservationUpdateDBRequest;
    type Response = ReservationDBResponse;
    type Id = ReservationId;
    type Filter = ReservationFilter;

    #[instrument(skip(self, request), fields(customer_id = request.customer_id, num_guests = request.num_guests), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let reservation = sqlx::query_as::<_, ReservationRow>(
            r#"
            INSERT INTO reservations (customer_id, start_at, num_guests, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_id, start_at, num_guests, notes
            "#,
        )
        .bind(request.customer_id)
        .bind(request.start_at)
        .bind(request.num_guests)
        .bind(&request.notes)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(ReservationDBResponse::from(reservation))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let reservation = sqlx::query_as::<_, ReservationRow>(
            "SELECT id, customer_id, start_at, num_guests, notes FROM reservations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(reservation.map(ReservationDBResponse::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<ReservationId>) -> Result<HashMap<Self::Id, ReservationDBResponse>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let reservations = sqlx::query_as::<_, ReservationRow>(
            "SELECT id, customer_id, start_at, num_guests, notes FROM reservations WHERE id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(reservations.into_iter().map(|r| (r.id, ReservationDBResponse::from(r))).collect())
    }

    #[instrument(skip(self, filter), fields(limit = ?filter.limit, skip = filter.skip, customer_id = ?filter.customer_id), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        check_paging("reservation", filter.skip, filter.limit)?;

        let reservations = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT id, customer_id, start_at, num_guests, notes
            FROM reservations
            WHERE ($1::INTEGER IS NULL OR customer_id = $1)
            ORDER BY start_at, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.customer_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(reservations.into_iter().map(ReservationDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let reservation = sqlx::query_as::<_, ReservationRow>(
            r#"
            UPDATE reservations SET
                customer_id = $2,
                start_at = $3,
                num_guests = $4,
                notes = $5
            WHERE id = $1
            RETURNING id, customer_id, start_at, num_guests, notes
            "#,
        )
        .bind(id)
        .bind(request.customer_id)
        .bind(request.start_at)
        .bind(request.num_guests)
        .bind(&request.notes)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or_else(|| DbError::not_found("reservation", id))?;

        Ok(ReservationDBResponse::from(reservation))
    }
}

impl<'c> Reservations<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Get a reservation by ID, failing with [`DbError::NotFound`] if there is none
    #[instrument(skip(self), err)]
    pub async fn get(&mut self, id: ReservationId) -> Result<ReservationDBResponse> {
        self.get_by_id(id).await?.ok_or_else(|| DbError::not_found("reservation", id))
    }

    /// Reservations held by one customer, earliest first
    #[instrument(skip(self), err)]
    pub async fn list_for_customer(&mut self, customer_id: CustomerId) -> Result<Vec<ReservationDBResponse>> {
        self.list(&ReservationFilter::all().for_customer(customer_id)).await
    }

    /// Validate, then insert the reservation if it has no ID yet (recording the generated ID on
    /// it), otherwise overwrite the stored row.
    #[instrument(skip(self, reservation), fields(reservation_id = ?reservation.id), err)]
    pub async fn save(&mut self, reservation: &mut Reservation) -> Result<ReservationId> {
        reservation.validate()?;

        match reservation.id {
            None => {
                let created = self.create(&ReservationCreateDBRequest::from(&*reservation)).await?;
                reservation.id = Some(created.id);
                Ok(created.id)
            }
            Some(id) => {
                self.update(id, &ReservationUpdateDBRequest::from(&*reservation)).await?;
                Ok(id)
            }
        }
    }
}
