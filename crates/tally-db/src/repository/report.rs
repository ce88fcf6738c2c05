//! # Report Repository
//!
//! Sales aggregates over calendar-day windows.
//!
//! ## Aggregates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  window [start 00:00Z, end+1 00:00Z)                                   │
//! │                                                                         │
//! │  transactions in window                                                │
//! │  ├── total_revenue      = SUM(total_amount)      (0 when none)         │
//! │  └── total_transactions = COUNT(*)                                     │
//! │                                                                         │
//! │  transaction_details of those transactions                             │
//! │  └── best_selling_product = product with MAX(SUM(quantity))            │
//! │        name: CURRENT product name                                      │
//! │        ties: lowest product id                                         │
//! │        null when no lines                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both queries run in one read transaction, so a checkout committing in
//! between is either fully counted or not at all.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::timestamp_key;
use tally_core::{BestSellingProduct, ReportWindow, SalesReport};

#[derive(Debug, sqlx::FromRow)]
struct Totals {
    total_revenue: i64,
    total_transactions: i64,
}

/// Repository for read-only sales reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Report for the current UTC calendar day.
    pub async fn daily(&self) -> DbResult<SalesReport> {
        self.summarize(&ReportWindow::today()).await
    }

    /// Report over an inclusive range of calendar days.
    ///
    /// A window whose start is after its end yields an empty report.
    pub async fn summarize(&self, window: &ReportWindow) -> DbResult<SalesReport> {
        let start = timestamp_key(window.start_bound());
        let end = timestamp_key(window.end_bound());

        debug!(start = %window.start, end = %window.end, "Computing sales report");

        let mut tx = self.pool.begin().await?;

        let totals = sqlx::query_as::<_, Totals>(
            r#"
            SELECT
                COALESCE(SUM(total_amount), 0) AS total_revenue,
                COUNT(*) AS total_transactions
            FROM transactions
            WHERE created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_one(&mut *tx)
        .await?;

        let best_selling_product = sqlx::query_as::<_, BestSellingProduct>(
            r#"
            SELECT p.name AS name, SUM(d.quantity) AS qty_sold
            FROM transaction_details d
            JOIN transactions t ON t.id = d.transaction_id
            JOIN products p ON p.id = d.product_id
            WHERE t.created_at >= ?1 AND t.created_at < ?2
            GROUP BY p.id, p.name
            ORDER BY qty_sold DESC, p.id ASC
            LIMIT 1
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SalesReport {
            total_revenue: totals.total_revenue,
            total_transactions: totals.total_transactions,
            best_selling_product,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
