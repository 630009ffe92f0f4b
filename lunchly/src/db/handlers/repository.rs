//! Base repository trait for database operations.

use std::collections::HashMap;

/// Contains the Repository trait.
///
/// A repository is a data access layer for a postgres table. It provides methods for creating,
/// reading and updating entities, as well as listing them with simple filters. Rows are never
/// deleted through a repository.
use crate::db::errors::{DbError, Result};

/// Base repository trait providing common database operations
///
/// This trait has separate associated types for create requests, update requests, and responses.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// Get lots of entities by their IDs, keyed by ID
    async fn get_bulk(&mut self, ids: Vec<Self::Id>) -> Result<HashMap<Self::Id, Self::Response>>;

    /// List entities with filtering and pagination
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Update an entity by ID, failing with `NotFound` if no row has that ID
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;
}

/// Reject negative paging values, which Postgres refuses in LIMIT and OFFSET.
pub(crate) fn check_paging(entity: &'static str, skip: i64, limit: Option<i64>) -> Result<()> {
    if skip < 0 {
        return Err(DbError::InvalidInput {
            entity,
            message: format!("skip must not be negative (got {skip})"),
        });
    }
    if let Some(limit) = limit.filter(|limit| *limit < 0) {
        return Err(DbError::InvalidInput {
            entity,
            message: format!("limit must not be negative (got {limit})"),
        });
    }
    Ok(())
}
