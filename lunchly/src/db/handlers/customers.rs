//! Database repository for customers.

use crate::db::{
    errors::{DbError, Result},
    handlers::{
        repository::{Repository, check_paging},
        reservations::Reservations,
    },
    models::{
        customers::{Customer, CustomerCreateDBRequest, CustomerDBResponse, CustomerUpdateDBRequest, TopCustomer},
        reservations::ReservationDBResponse,
    },
};
use crate::types::{CustomerId, escape_like};
use sqlx::{FromRow, PgConnection};
use std::collections::HashMap;
use tracing::instrument;

/// How many customers [`Customers::top_ten`] returns
pub const TOP_CUSTOMERS_LIMIT: i64 = 10;

/// Filter for listing customers
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    pub skip: i64,
    /// `None` lists every customer
    pub limit: Option<i64>,
}

impl CustomerFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit: Some(limit) }
    }

    pub fn all() -> Self {
        Self::default()
    }
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct CustomerRow {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, FromRow)]
struct CustomerCountRow {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub reservation_count: i64,
}

impl From<CustomerRow> for CustomerDBResponse {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            notes: row.notes,
        }
    }
}

impl From<CustomerCountRow> for TopCustomer {
    fn from(row: CustomerCountRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            reservation_count: row.reservation_count,
        }
    }
}

pub struct Customers<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Customers<'c> {
    type CreateRequest = CustomerCreateDBRequest;
    type UpdateRequest = CustomerUpdateDBRequest;
    type Response = CustomerDBResponse;
    type Id = CustomerId;
    type Filter = CustomerFilter;

    #[instrument(skip(self, request), fields(last_name = %request.last_name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let customer = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (first_name, last_name, phone, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, phone, notes
            "#,
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.phone)
        .bind(&request.notes)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(CustomerDBResponse::from(customer))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let customer = sqlx::query_as::<_, CustomerRow>("SELECT id, first_name, last_name, phone, notes FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(customer.map(CustomerDBResponse::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<CustomerId>) -> Result<HashMap<Self::Id, CustomerDBResponse>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let customers = sqlx::query_as::<_, CustomerRow>("SELECT id, first_name, last_name, phone, notes FROM customers WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(customers.into_iter().map(|c| (c.id, CustomerDBResponse::from(c))).collect())
    }

    #[instrument(skip(self, filter), fields(limit = ?filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        check_paging("customer", filter.skip, filter.limit)?;

        // LIMIT NULL is the same as no limit
        let customers = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, phone, notes
            FROM customers
            ORDER BY last_name, first_name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(customers.into_iter().map(CustomerDBResponse::from).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let customer = sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE customers SET
                first_name = $2,
                last_name = $3,
                phone = $4,
                notes = $5
            WHERE id = $1
            RETURNING id, first_name, last_name, phone, notes
            "#,
        )
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.phone)
        .bind(&request.notes)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or_else(|| DbError::not_found("customer", id))?;

        Ok(CustomerDBResponse::from(customer))
    }
}

impl<'c> Customers<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Get a customer by ID, failing with [`DbError::NotFound`] if there is none
    #[instrument(skip(self), err)]
    pub async fn get(&mut self, id: CustomerId) -> Result<CustomerDBResponse> {
        self.get_by_id(id).await?.ok_or_else(|| DbError::not_found("customer", id))
    }

    /// Case-insensitive substring search over "first_name last_name".
    ///
    /// The name is matched literally, so an empty string returns every customer.
    #[instrument(skip(self), err)]
    pub async fn search(&mut self, name: &str) -> Result<Vec<CustomerDBResponse>> {
        // Postgres text cannot hold NUL
        if name.contains('\0') {
            return Err(DbError::InvalidInput {
                entity: "customer search",
                message: "name must not contain NUL characters".to_string(),
            });
        }

        let pattern = format!("%{}%", escape_like(name));

        let customers = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, phone, notes
            FROM customers
            WHERE concat(first_name, ' ', last_name) ILIKE $1
            ORDER BY last_name, first_name, id
            "#,
        )
        .bind(pattern)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(customers.into_iter().map(CustomerDBResponse::from).collect())
    }

    /// Customers with the most reservations, busiest first. Customers without any
    /// reservations are never included.
    #[instrument(skip(self), err)]
    pub async fn top(&mut self, limit: i64) -> Result<Vec<TopCustomer>> {
        check_paging("customer", 0, Some(limit))?;

        let customers = sqlx::query_as::<_, CustomerCountRow>(
            r#"
            SELECT c.id, c.first_name, c.last_name, COUNT(r.id) AS reservation_count
            FROM customers c
            JOIN reservations r ON r.customer_id = c.id
            GROUP BY c.id
            ORDER BY reservation_count DESC, c.last_name, c.first_name, c.id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(customers.into_iter().map(TopCustomer::from).collect())
    }

    #[instrument(skip(self), err)]
    pub async fn top_ten(&mut self) -> Result<Vec<TopCustomer>> {
        self.top(TOP_CUSTOMERS_LIMIT).await
    }

    /// Insert the customer if it has no ID yet (recording the generated ID on it), otherwise
    /// overwrite the stored row.
    #[instrument(skip(self, customer), fields(customer_id = ?customer.id), err)]
    pub async fn save(&mut self, customer: &mut Customer) -> Result<CustomerId> {
        match customer.id {
            None => {
                let created = self.create(&CustomerCreateDBRequest::from(&*customer)).await?;
                customer.id = Some(created.id);
                Ok(created.id)
            }
            Some(id) => {
                self.update(id, &CustomerUpdateDBRequest::from(&*customer)).await?;
                Ok(id)
            }
        }
    }

    /// All reservations held by the given customer, earliest first
    #[instrument(skip(self), err)]
    pub async fn get_reservations(&mut self, customer_id: CustomerId) -> Result<Vec<ReservationDBResponse>> {
        Reservations::new(&mut *self.db).list_for_customer(customer_id).await
    }
}
