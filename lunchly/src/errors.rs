use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Invalid request data or business rule violation
    #[error("{message}")]
    BadRequest { message: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::Database(db_err) => match db_err {
                DbError::NotFound { .. } => StatusCode::NOT_FOUND,
                DbError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } => message.clone(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound { .. } | DbError::InvalidInput { .. } => db_err.to_string(),
                DbError::UniqueViolation { .. } => "Resource already exists".to_string(),
                DbError::ForeignKeyViolation { table, .. } => match table.as_deref() {
                    Some("reservations") => "No such customer for this reservation".to_string(),
                    _ => "Invalid reference to related resource".to_string(),
                },
                DbError::CheckViolation { constraint, .. } => match constraint.as_deref() {
                    Some("reservations_num_guests_check") => "Must have at least 1 guest".to_string(),
                    _ => "Invalid data provided".to_string(),
                },
                DbError::Other(_) => "Database error occurred".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(DbError::NotFound { .. } | DbError::InvalidInput { .. }) | Error::BadRequest { .. } => {
                tracing::debug!("Client error: {}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
        }

        (self.status_code(), self.user_message()).into_response()
    }
}

/// Type alias for application results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_404_with_message() {
        let err = Error::from(DbError::not_found("customer", 12));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "No such customer: 12");
    }

    #[test]
    fn test_validation_errors_are_400() {
        let err = Error::from(DbError::InvalidInput {
            entity: "reservation",
            message: "Must have at least 1 guest".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = Error::from(DbError::CheckViolation {
            constraint: Some("reservations_num_guests_check".to_string()),
            table: Some("reservations".to_string()),
            message: "new row violates check constraint".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "Must have at least 1 guest");

        let err = Error::BadRequest {
            message: "bad timestamp".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "bad timestamp");
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = Error::from(DbError::UniqueViolation {
            constraint: None,
            table: Some("customers".to_string()),
            message: "duplicate key".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_errors_do_not_leak_details() {
        let err = Error::from(DbError::Other(anyhow::anyhow!("connection refused to 10.0.0.5")));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "Database error occurred");

        let err = Error::Other(anyhow::anyhow!("secret detail"));
        assert_eq!(err.user_message(), "Internal server error");
    }

    #[test]
    fn test_into_response_carries_status() {
        let response = Error::from(DbError::not_found("reservation", 3)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
