//! # Transaction Repository
//!
//! The atomic checkout engine and transaction lookups.
//!
//! ## Checkout Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 checkout(items)  (one sqlx transaction)                 │
//! │                                                                         │
//! │  validate_checkout_items ──✗──► Rejected(Validation)   (no BEGIN)      │
//! │       │                                                                 │
//! │  BEGIN IMMEDIATE  (write lock, queued behind other checkouts)          │
//! │       │                                                                 │
//! │  for item in items (input order):                                      │
//! │  │   SELECT id, name, price, stock ──✗──► Rejected(ProductNotFound)    │
//! │  │   plan.add_line(snapshot, qty)  ──✗──► Rejected(InsufficientStock)  │
//! │  │   UPDATE products                                                    │
//! │  │     SET stock = stock - qty                                          │
//! │  │     WHERE id = ? AND stock >= qty ──0 rows──► InsufficientStock     │
//! │       │                                                                 │
//! │  INSERT transactions (total_amount, created_at)                        │
//! │  INSERT transaction_details × N  (product_name snapshot)               │
//! │       │                                                                 │
//! │  COMMIT ──✗──► Storage(..)                                             │
//! │                                                                         │
//! │  Any ✗ after BEGIN → ROLLBACK: no stock change, no rows, nothing.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Checkouts take SQLite's write lock at `BEGIN`, so they run one after
//! another: each one reads stock the previous one committed. A checkout
//! waits up to the busy timeout for the lock; if it still can't get it, it
//! fails with `Storage(Busy)` and leaves nothing behind. The guarded
//! `UPDATE` re-checks stock at write time as well.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbResult, StoreError, StoreResult};
use crate::repository::{now_utc, timestamp_key, BEGIN_WRITE};
use tally_core::validation::validate_checkout_items;
use tally_core::{
    CheckoutItem, CheckoutPlan, CoreError, StockSnapshot, Transaction, TransactionDetail,
};

/// Header row of the `transactions` table.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    total_amount: i64,
    created_at: DateTime<Utc>,
}

/// Repository for checkout and transaction reads.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Converts a cart into a persisted transaction, atomically.
    ///
    /// ## Errors
    /// - `Rejected(Validation)` for an empty cart or non-positive id/quantity
    /// - `Rejected(ProductNotFound)` for an unknown product
    /// - `Rejected(InsufficientStock)` when any line exceeds live stock
    /// - `Storage(..)` for database failures
    ///
    /// On every error path no stock changes and no transaction rows exist.
    pub async fn checkout(&self, items: &[CheckoutItem]) -> StoreResult<Transaction> {
        self.checkout_at(items, now_utc()).await
    }

    /// Like [`checkout`](Self::checkout), stamping the transaction with
    /// `created_at` instead of the current time. Used to backfill history.
    pub async fn checkout_at(
        &self,
        items: &[CheckoutItem],
        created_at: DateTime<Utc>,
    ) -> StoreResult<Transaction> {
        validate_checkout_items(items)?;

        debug!(lines = items.len(), "Starting checkout");

        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;

        match apply_checkout(&mut tx, items, created_at).await {
            Ok(transaction) => {
                tx.commit().await?;
                info!(
                    transaction_id = transaction.id,
                    total_amount = transaction.total_amount,
                    lines = transaction.details.len(),
                    "Checkout committed"
                );
                Ok(transaction)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Checkout rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Gets a transaction with its detail lines, in insertion order.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let mut tx = self.pool.begin().await?;

        let header = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, product_name, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(Transaction {
            id: header.id,
            total_amount: header.total_amount,
            created_at: header.created_at,
            details,
        }))
    }

    /// Counts persisted transactions (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Checkout Steps
// =============================================================================

/// Runs every checkout statement on the open transaction's connection.
async fn apply_checkout(
    conn: &mut SqliteConnection,
    items: &[CheckoutItem],
    created_at: DateTime<Utc>,
) -> StoreResult<Transaction> {
    let stamp = timestamp_key(created_at);
    let touched = timestamp_key(now_utc());
    let mut plan = CheckoutPlan::with_capacity(items.len());

    for item in items {
        let snapshot = sqlx::query_as::<_, StockSnapshot>(
            "SELECT id AS product_id, name, price, stock FROM products WHERE id = ?1",
        )
        .bind(item.product_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(CoreError::ProductNotFound(item.product_id))?;

        if let Err(err) = plan.add_line(&snapshot, item.quantity) {
            debug!(product_id = item.product_id, error = %err, "Checkout rejected");
            return Err(err.into());
        }

        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - ?2, updated_at = ?3
            WHERE id = ?1 AND stock >= ?2
            "#,
        )
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(&touched)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Rejected(CoreError::InsufficientStock {
                product_id: snapshot.product_id,
                product_name: snapshot.name,
                available: snapshot.stock,
                requested: item.quantity,
            }));
        }
    }

    let total_amount = plan.total().amount();

    let transaction_id = sqlx::query(
        "INSERT INTO transactions (total_amount, created_at) VALUES (?1, ?2)",
    )
    .bind(total_amount)
    .bind(&stamp)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    let mut details = Vec::with_capacity(plan.lines().len());
    for line in plan.into_lines() {
        let detail_id = sqlx::query(
            r#"
            INSERT INTO transaction_details
                (transaction_id, product_id, product_name, quantity, subtotal)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(transaction_id)
        .bind(line.product_id)
        .bind(&line.product_name)
        .bind(line.quantity)
        .bind(line.subtotal)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        details.push(TransactionDetail {
            id: detail_id,
            transaction_id,
            product_id: line.product_id,
            product_name: line.product_name,
            quantity: line.quantity,
            subtotal: line.subtotal,
        });
    }

    Ok(Transaction {
        id: transaction_id,
        total_amount,
        created_at,
        details,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
