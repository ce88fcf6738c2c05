//! # Checkout Module
//!
//! Pure pricing and stock rules for a single checkout.
//!
//! ## Where This Fits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout (one DB transaction)                       │
//! │                                                                         │
//! │  for each cart entry, IN ORDER:                                        │
//! │                                                                         │
//! │   tally-db                      tally-core (THIS MODULE)               │
//! │   ────────                      ────────────────────────               │
//! │   SELECT name, price, stock ──► StockSnapshot                          │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                                 CheckoutPlan::add_line                  │
//! │                                 ├── stock < qty?  → InsufficientStock  │
//! │                                 ├── price × qty   → checked subtotal   │
//! │                                 └── total + sub   → checked total      │
//! │                                      │                                  │
//! │   UPDATE products SET stock ◄────────┘                                  │
//! │   = stock - qty                                                         │
//! │                                                                         │
//! │  then: INSERT transaction(total) + details(lines)  → COMMIT            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The plan never touches storage. The caller reads a fresh snapshot for
//! every entry *after* applying the previous decrement, which is what makes
//! repeated entries for the same product see the reduced stock.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Stock Snapshot
// =============================================================================

/// The live state of a product as read inside the checkout transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockSnapshot {
    pub product_id: i64,
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

// =============================================================================
// Pending Detail
// =============================================================================

/// A priced line waiting to be written as a transaction detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDetail {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub subtotal: i64,
}

// =============================================================================
// Checkout Plan
// =============================================================================

/// Accumulates priced lines and the running total of one checkout.
#[derive(Debug, Clone, Default)]
pub struct CheckoutPlan {
    lines: Vec<PendingDetail>,
    total: Money,
}

impl CheckoutPlan {
    /// Creates an empty plan sized for `capacity` cart entries.
    pub fn with_capacity(capacity: usize) -> Self {
        CheckoutPlan {
            lines: Vec::with_capacity(capacity),
            total: Money::zero(),
        }
    }

    /// Prices one cart entry against the product's live stock.
    ///
    /// ## Errors
    /// - [`CoreError::InsufficientStock`] when `snapshot.stock < quantity`
    /// - [`ValidationError::Overflow`] when the subtotal or running total
    ///   does not fit in an `i64`
    ///
    /// On error the plan is left unchanged.
    pub fn add_line(
        &mut self,
        snapshot: &StockSnapshot,
        quantity: i64,
    ) -> CoreResult<&PendingDetail> {
        if snapshot.stock < quantity {
            return Err(CoreError::InsufficientStock {
                product_id: snapshot.product_id,
                product_name: snapshot.name.clone(),
                available: snapshot.stock,
                requested: quantity,
            });
        }

        let subtotal = Money::new(snapshot.price)
            .checked_mul(quantity)
            .ok_or_else(|| ValidationError::Overflow {
                field: "subtotal".to_string(),
            })?;

        let total = self
            .total
            .checked_add(subtotal)
            .ok_or_else(|| ValidationError::Overflow {
                field: "total_amount".to_string(),
            })?;

        self.total = total;
        self.lines.push(PendingDetail {
            product_id: snapshot.product_id,
            product_name: snapshot.name.clone(),
            quantity,
            subtotal: subtotal.amount(),
        });

        let index = self.lines.len() - 1;
        Ok(&self.lines[index])
    }

    /// Sum of all line subtotals.
    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    /// The priced lines, in cart order.
    pub fn lines(&self) -> &[PendingDetail] {
        &self.lines
    }

    /// Consumes the plan, returning its lines.
    pub fn into_lines(self) -> Vec<PendingDetail> {
        self.lines
    }

    /// Checks if no lines have been added.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
