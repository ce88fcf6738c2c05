//! # Repository Module
//!
//! Database repository implementations for Tally POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.transactions().checkout(&items)                            │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── checkout(&self, items)      ← one sqlx transaction                │
//! │  └── get_by_id(&self, id)                                              │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and name filter
//! - [`TransactionRepository`](transaction::TransactionRepository) - Atomic checkout, transaction lookup
//! - [`ReportRepository`](report::ReportRepository) - Sales aggregates
//!
//! ## Timestamps
//! Every timestamp is written through [`timestamp_key`]. The fixed-width
//! form keeps `created_at >= ? AND created_at < ?` correct under SQLite's
//! text comparison.
//!
//! ## Write Transactions
//! Transactions that read and then write open with [`BEGIN_WRITE`]. The
//! write lock is taken at `BEGIN`, so a second writer waits on the busy
//! timeout instead of failing when its read snapshot goes stale.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

pub mod category;
pub mod product;
pub mod report;
pub mod transaction;

/// Opening statement for read-then-write transactions.
pub(crate) const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

/// Formats a timestamp as fixed-width RFC3339 UTC text with microseconds.
///
/// `2026-02-01T09:30:00.000000Z`
pub fn timestamp_key(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// The current time, truncated to the precision [`timestamp_key`] stores.
pub(crate) fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Builds a `LIKE` pattern matching `needle` anywhere, escaping `%` and `_`.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_key_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let key = timestamp_key(whole);
        assert_eq!(key, "2026-02-01T00:00:00.000000Z");
        assert_eq!(timestamp_key(now_utc()).len(), key.len());
    }

    #[test]
    fn test_timestamp_keys_sort_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2026, 2, 1, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap();
        assert!(timestamp_key(earlier) < timestamp_key(later));
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("teh"), "%teh%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
