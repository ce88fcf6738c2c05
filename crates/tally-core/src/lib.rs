//! # tally-core: Pure Business Logic for Tally POS
//!
//! This crate contains the checkout and reporting rules of Tally POS as pure
//! functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (apps/api)                          │   │
//! │  │    /categories, /products, /api/checkout, /api/report           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │  report   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Plan    │  │  Window   │  │   │
//! │  │   │Transaction│  │  checked  │  │  Pending  │  │  UTC day  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, atomic checkout, reports     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Transaction, SalesReport)
//! - [`money`] - Money type with checked integer arithmetic
//! - [`checkout`] - Per-line stock check and pricing for a cart
//! - [`report`] - Calendar-date report windows
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::checkout::{CheckoutPlan, StockSnapshot};
//!
//! let phone = StockSnapshot {
//!     product_id: 1,
//!     name: "iPhone 15 Pro".to_string(),
//!     price: 15_000_000,
//!     stock: 50,
//! };
//!
//! let mut plan = CheckoutPlan::default();
//! plan.add_line(&phone, 2).unwrap();
//!
//! assert_eq!(plan.total().amount(), 30_000_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{CheckoutPlan, PendingDetail, StockSnapshot};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::ReportWindow;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a category or product name.
///
/// Matches the `VARCHAR(255)` width the schema has always used for names.
pub const MAX_NAME_LENGTH: usize = 255;

/// Date format accepted by range reports (`2026-02-01`).
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";
