//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Checkout rejections, missing references        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── CheckoutError    - CoreError | DbError from one checkout          │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - Status code + envelope the client sees         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → ApiError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant aborts the operation that produced it. During checkout the
/// surrounding database transaction is rolled back, so none of these errors
/// ever leaves a partial effect behind.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Referenced category does not exist.
    ///
    /// ## When This Occurs
    /// - Creating or updating a product with a stale `category_id`
    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    /// Insufficient stock to complete a checkout line.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout (product 3, qty: 5)
    ///      │
    ///      ▼
    /// Read live stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 3, available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Whole checkout rolled back, client sees 409
    /// ```
    #[error(
        "Insufficient stock for product '{product_name}' (id {product_id}): available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: i64,
        product_name: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before any store access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Arithmetic on the value would overflow.
    #[error("{field} exceeds the supported range")]
    Overflow { field: String },

    /// Report date range is missing or unparsable.
    #[error("Invalid date range: {reason}")]
    InvalidRange { reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a MustBePositive error for the given field.
    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }

    /// Creates an InvalidRange error.
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        ValidationError::InvalidRange {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
