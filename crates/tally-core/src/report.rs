//! # Report Windows
//!
//! Calendar-date ranges for sales reports.
//!
//! ## Window Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportWindow { start: 2026-02-01, end: 2026-02-03 }                   │
//! │                                                                         │
//! │     start_bound()                                    end_bound()        │
//! │     2026-02-01T00:00:00Z                     2026-02-04T00:00:00Z       │
//! │          [━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━)               │
//! │          inclusive                                exclusive             │
//! │                                                                         │
//! │  Both dates are inclusive calendar days, evaluated in UTC.             │
//! │  A window whose start is after its end matches nothing.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::REPORT_DATE_FORMAT;

/// Earliest year a report date may name.
pub const MIN_REPORT_YEAR: i32 = 0;

/// Latest year a report date may name. Stored timestamps keep a four-digit
/// year, so later dates would not compare correctly.
pub const MAX_REPORT_YEAR: i32 = 9999;

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Creates a window; `start > end` is allowed and yields an empty report.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        ReportWindow { start, end }
    }

    /// A single-day window.
    pub fn for_day(day: NaiveDate) -> Self {
        ReportWindow::new(day, day)
    }

    /// The window for the current UTC day.
    pub fn today() -> Self {
        ReportWindow::for_day(Utc::now().date_naive())
    }

    /// Parses `YYYY-MM-DD` query values.
    ///
    /// ## Errors
    /// [`ValidationError::InvalidRange`] if either value is missing, empty,
    /// not a valid date, or outside years 0000 through 9999.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::report::ReportWindow;
    ///
    /// let window = ReportWindow::parse(Some("2026-02-01"), Some("2026-02-03")).unwrap();
    /// assert_eq!(window.start.to_string(), "2026-02-01");
    ///
    /// assert!(ReportWindow::parse(Some("2026-02-01"), None).is_err());
    /// ```
    pub fn parse(start: Option<&str>, end: Option<&str>) -> CoreResult<Self> {
        let start = parse_date("start_date", start)?;
        let end = parse_date("end_date", end)?;
        Ok(ReportWindow::new(start, end))
    }

    /// Inclusive lower bound: `start` at 00:00:00 UTC.
    pub fn start_bound(&self) -> DateTime<Utc> {
        midnight_utc(self.start)
    }

    /// Exclusive upper bound: the day after `end` at 00:00:00 UTC.
    ///
    /// A window ending on 9999-12-31 is capped at that day's last
    /// microsecond instead of rolling into year 10000.
    pub fn end_bound(&self) -> DateTime<Utc> {
        match self.end.succ_opt().filter(|next| next.year() <= MAX_REPORT_YEAR) {
            Some(next) => midnight_utc(next),
            None => self
                .end
                .and_hms_micro_opt(23, 59, 59, 999_999)
                .map(|last| Utc.from_utc_datetime(&last))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Checks whether `instant` falls inside the window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_bound() && instant < self.end_bound()
    }

    /// Checks if the window cannot match anything.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

fn parse_date(field: &str, value: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::invalid_range(format!("{field} is required")))?;

    let date = NaiveDate::parse_from_str(value, REPORT_DATE_FORMAT).map_err(|_| {
        ValidationError::invalid_range(format!("{field} must be a date formatted as YYYY-MM-DD"))
    })?;

    if !(MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&date.year()) {
        return Err(ValidationError::invalid_range(format!(
            "{field} must be between 0000-01-01 and 9999-12-31"
        )));
    }

    Ok(date)
}

fn midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&NaiveDateTime::new(day, NaiveTime::MIN))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, REPORT_DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_valid_window() {
        let window = ReportWindow::parse(Some("2026-02-01"), Some(" 2026-02-03 ")).unwrap();
        assert_eq!(window.start, date("2026-02-01"));
        assert_eq!(window.end, date("2026-02-03"));
        assert!(!window.is_empty());
    }

    #[test]
    fn test_parse_missing_or_bad_dates() {
        for (start, end) in [
            (None, Some("2026-02-03")),
            (Some("2026-02-01"), None),
            (Some(""), Some("2026-02-03")),
            (Some("02/01/2026"), Some("2026-02-03")),
            (Some("2026-02-30"), Some("2026-03-01")),
        ] {
            let err = ReportWindow::parse(start, end).unwrap_err();
            assert!(
                matches!(err, CoreError::Validation(ValidationError::InvalidRange { .. })),
                "expected InvalidRange for {start:?}..{end:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_years_beyond_four_digits() {
        for (start, end) in [
            (Some("2026-02-01"), Some("10000-01-01")),
            (Some("-0001-12-31"), Some("2026-02-01")),
        ] {
            let err = ReportWindow::parse(start, end).unwrap_err();
            assert!(
                matches!(err, CoreError::Validation(ValidationError::InvalidRange { .. })),
                "expected InvalidRange for {start:?}..{end:?}"
            );
        }

        let widest = ReportWindow::parse(Some("0000-01-01"), Some("9999-12-31")).unwrap();
        assert_eq!(widest.start.year(), 0);
        assert_eq!(widest.end.year(), 9999);
    }

    #[test]
    fn test_end_bound_stays_within_year_9999() {
        let window = ReportWindow::for_day(date("9999-12-31"));
        let bound = window.end_bound();
        assert_eq!(bound.year(), 9999);
        assert!(window.contains(Utc.with_ymd_and_hms(9999, 12, 31, 12, 0, 0).unwrap()));
        assert!(window.start_bound() < bound);
    }

    #[test]
    fn test_bounds_are_half_open_whole_days() {
        let window = ReportWindow::new(date("2026-02-01"), date("2026-02-03"));
        assert_eq!(window.start_bound().to_rfc3339(), "2026-02-01T00:00:00+00:00");
        assert_eq!(window.end_bound().to_rfc3339(), "2026-02-04T00:00:00+00:00");

        let first = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2026, 2, 3, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 2, 4, 0, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();

        assert!(window.contains(first));
        assert!(window.contains(last));
        assert!(!window.contains(after));
        assert!(!window.contains(before));
    }

    #[test]
    fn test_reversed_window_matches_nothing() {
        let window = ReportWindow::new(date("2026-02-05"), date("2026-02-01"));
        assert!(window.is_empty());
        let inside = Utc.with_ymd_and_hms(2026, 2, 3, 12, 0, 0).unwrap();
        assert!(!window.contains(inside));
    }

    #[test]
    fn test_single_day_window() {
        let window = ReportWindow::for_day(date("2026-02-01"));
        assert_eq!(window.start, window.end);
        assert!(window.contains(Utc.with_ymd_and_hms(2026, 2, 1, 12, 30, 0).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap()));
    }
}
