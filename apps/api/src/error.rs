//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally POS                              │
//! │                                                                         │
//! │  Handler returns Result<_, ApiError>                                   │
//! │         │                                                               │
//! │         ├── StoreError::Rejected(CoreError) ─┐                          │
//! │         ├── StoreError::Storage(DbError) ────┤                          │
//! │         ├── DbError ─────────────────────────┼──► ApiError { code, .. } │
//! │         ├── CoreError / ValidationError ─────┤          │               │
//! │         └── Json / Query / Path rejection ───┘          │               │
//! │                                                         ▼               │
//! │                              code.status()  +  { "status": false,       │
//! │                                                  "message": "..." }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Mapping
//! | ErrorCode            | HTTP |
//! |----------------------|------|
//! | `ValidationError`    | 400  |
//! | `NotFound`           | 404  |
//! | `InsufficientStock`  | 409  |
//! | `Conflict`           | 409  |
//! | `DatabaseError`      | 500  |
//!
//! Storage failures are logged with their detail; the client only sees a
//! generic message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use tally_core::{CoreError, ValidationError};
use tally_db::{DbError, StoreError};

use crate::response::Envelope;

/// API error returned from handlers.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Machine-readable error code, decides the HTTP status
    pub code: ErrorCode,

    /// Human-readable error message for the envelope
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Not enough stock to complete a checkout (409)
    InsufficientStock,

    /// Constraint conflict, e.g. deleting a product that has sales (409)
    Conflict,

    /// Database operation failed (500)
    DatabaseError,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InsufficientStock | ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(Envelope::<()>::error(self.message))).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::UniqueViolation { field, value } => {
                ApiError::new(ErrorCode::Conflict, format!("{field} '{value}' already exists"))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::new(
                    ErrorCode::Conflict,
                    "Resource is still referenced by other records",
                )
            }
            DbError::CheckViolation { message } => {
                tracing::warn!("Check constraint violation: {}", message);
                ApiError::new(ErrorCode::Conflict, "Update violates a data constraint")
            }
            DbError::Busy(e) => {
                tracing::error!("Database busy: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database is busy, try again")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::CategoryNotFound(id) => ApiError::not_found("Category", id),
            err @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(e) => e.into(),
            StoreError::Storage(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::validation("Invalid request body")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected query string");
        ApiError::validation("Invalid query parameters")
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected path parameter");
        ApiError::validation("Invalid ID")
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (
                ValidationError::required("items").into(),
                StatusCode::BAD_REQUEST,
            ),
            (CoreError::ProductNotFound(7).into(), StatusCode::NOT_FOUND),
            (
                CoreError::InsufficientStock {
                    product_id: 3,
                    product_name: "Indomie".into(),
                    available: 3,
                    requested: 5,
                }
                .into(),
                StatusCode::CONFLICT,
            ),
            (
                DbError::ForeignKeyViolation {
                    message: "FOREIGN KEY constraint failed".into(),
                }
                .into(),
                StatusCode::CONFLICT,
            ),
            (
                StoreError::Storage(DbError::not_found("Transaction", 9)).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                DbError::QueryFailed("no such table: products".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err:?}");
        }
    }

    #[test]
    fn test_storage_detail_is_not_leaked() {
        let err: ApiError = DbError::QueryFailed("no such table: products".into()).into();
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_messages() {
        let err: ApiError = CoreError::ProductNotFound(7).into();
        assert_eq!(err.message, "Product not found: 7");

        let err: ApiError =
            StoreError::Rejected(CoreError::Validation(ValidationError::must_be_positive(
                "quantity",
            )))
            .into();
        assert_eq!(err.message, "quantity must be positive");
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
