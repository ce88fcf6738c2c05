//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Category     │◄ ─│    Product      │◄──│ TransactionDetail   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  product_id         │   │
//! │  │  name           │   │  name           │   │  product_name (❄)   │   │
//! │  │  description    │   │  price / stock  │   │  quantity/subtotal  │   │
//! │  └─────────────────┘   │  category_id?   │   └──────────┬──────────┘   │
//! │     weak (SET NULL)    └─────────────────┘              │ owned         │
//! │                                              ┌──────────▼──────────┐   │
//! │                                              │    Transaction      │   │
//! │                                              │  total_amount       │   │
//! │                                              │  created_at         │   │
//! │                                              └─────────────────────┘   │
//! │                                                                         │
//! │  ❄ = snapshot frozen at sale time                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identities are database-assigned integers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or replacing a category (id is assigned by the store).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,

    /// Display name, snapshotted onto transaction details at sale time.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: i64,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Weak reference to a category; cleared when the category is deleted.
    pub category_id: Option<i64>,

    /// Name of the referenced category (joined, empty when there is none).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub category_name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or replacing a product (id is assigned by the store).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
}

// =============================================================================
// Checkout
// =============================================================================

/// One cart entry submitted for checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl CheckoutItem {
    pub fn new(product_id: i64, quantity: i64) -> Self {
        CheckoutItem {
            product_id,
            quantity,
        }
    }
}

/// Request body for `POST /api/checkout`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A persisted, completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::new(self.total_amount)
    }

    /// Checks that the total equals the sum of the detail subtotals.
    pub fn is_consistent(&self) -> bool {
        let sum: i64 = self.details.iter().map(|d| d.subtotal).sum();
        !self.details.is_empty() && sum == self.total_amount
    }
}

/// A line item of a transaction.
/// Uses snapshot pattern to freeze the product name at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at sale time × quantity.
    pub subtotal: i64,
}

// =============================================================================
// Reports
// =============================================================================

/// Aggregate sales over a report window. Derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub total_revenue: i64,
    pub total_transactions: i64,
    /// `null` when no detail lines fall in the window.
    pub best_selling_product: Option<BestSellingProduct>,
}

impl SalesReport {
    /// A report over a window with no transactions.
    pub fn empty() -> Self {
        SalesReport::default()
    }
}

/// The product with the highest summed quantity in a report window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BestSellingProduct {
    pub name: String,
    pub qty_sold: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: i64, subtotal: i64) -> TransactionDetail {
        TransactionDetail {
            id,
            transaction_id: 1,
            product_id: id,
            product_name: format!("Product {id}"),
            quantity: 1,
            subtotal,
        }
    }

    #[test]
    fn test_transaction_consistency() {
        let mut tx = Transaction {
            id: 1,
            total_amount: 30_015_000,
            created_at: Utc::now(),
            details: vec![detail(1, 30_000_000), detail(3, 15_000)],
        };
        assert!(tx.is_consistent());

        tx.total_amount += 1;
        assert!(!tx.is_consistent());

        tx.details.clear();
        tx.total_amount = 0;
        assert!(!tx.is_consistent());
    }

    #[test]
    fn test_empty_report_serializes_null_best_seller() {
        let json = serde_json::to_value(SalesReport::empty()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total_revenue": 0,
                "total_transactions": 0,
                "best_selling_product": null
            })
        );
    }

    #[test]
    fn test_checkout_request_defaults_to_empty_items() {
        let req: CheckoutRequest = serde_json::from_str("{}").unwrap();
        assert!(req.items.is_empty());

        let req: CheckoutRequest =
            serde_json::from_str(r#"{"items":[{"product_id":1,"quantity":2}]}"#).unwrap();
        assert_eq!(req.items, vec![CheckoutItem::new(1, 2)]);
    }
}
