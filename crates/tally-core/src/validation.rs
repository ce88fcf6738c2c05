//! # Validation Module
//!
//! Input validation for Tally POS. Everything here runs before any store
//! access, so a rejected request never opens a database transaction.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum)                                       │
//! │  └── JSON shape / path parameter types                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── names present and bounded                                         │
//! │  ├── price / stock not negative                                        │
//! │  └── cart non-empty, ids and quantities positive                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK (stock >= 0) constraints                         │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{CategoryInput, CheckoutItem, ProductInput};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a category or product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_name;
///
/// assert!(validate_name("name", "Electronics").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that an amount is zero or greater.
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates that an id or quantity is strictly positive.
pub fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::must_be_positive(field));
    }

    Ok(())
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates a category body.
pub fn validate_category_input(input: &CategoryInput) -> ValidationResult<()> {
    validate_name("name", &input.name)
}

/// Validates a product body.
///
/// ## Rules
/// - `name` required
/// - `price` and `stock` must not be negative
/// - `category_id`, when present, must be positive
///
/// Whether the category actually exists is checked by the caller against
/// the category store.
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_name("name", &input.name)?;
    validate_non_negative("price", input.price)?;
    validate_non_negative("stock", input.stock)?;

    if let Some(category_id) = input.category_id {
        validate_positive("category_id", category_id)?;
    }

    Ok(())
}

/// Validates a checkout cart.
///
/// ## User Workflow
/// ```text
/// POST /api/checkout { items: [...] }
///      │
///      ▼
/// validate_checkout_items ← THIS FUNCTION
///      │
///      ├── items empty?          → "items is required"
///      ├── product_id <= 0?      → "product_id must be positive"
///      ├── quantity <= 0?        → "quantity must be positive"
///      │
///      └── OK → open the checkout transaction
/// ```
///
/// Duplicate product ids are allowed; each entry is checked against stock
/// on its own, in order.
pub fn validate_checkout_items(items: &[CheckoutItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::required("items"));
    }

    for item in items {
        validate_positive("product_id", item.product_id)?;
        validate_positive("quantity", item.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
