//! # Date Helpers
//!
//! Date formatting and report range arithmetic. Everything here is pure:
//! functions that care about "now" take it as a parameter, which is what
//! keeps the report aggregation deterministic under test.

use chrono::{DateTime, Datelike, Days, Months, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Formatting
// =============================================================================

/// Named date formats used across invoices, reports, and CSV columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateStyle {
    /// `1/31/2024`
    #[default]
    Short,
    /// `13:45:07`
    Time,
    /// `1/31/2024 13:45:07`
    DateTime,
    /// `2024-01-31T13:45:07.000Z`
    Iso,
    /// `2024-01`
    YearMonth,
    /// `2024-01-31`
    YearMonthDay,
}

/// Formats a timestamp according to the requested style.
pub fn format_date(date: DateTime<Utc>, style: DateStyle) -> String {
    let fmt = match style {
        DateStyle::Short => "%-m/%-d/%Y",
        DateStyle::Time => "%H:%M:%S",
        DateStyle::DateTime => "%-m/%-d/%Y %H:%M:%S",
        DateStyle::Iso => "%Y-%m-%dT%H:%M:%S%.3fZ",
        DateStyle::YearMonth => "%Y-%m",
        DateStyle::YearMonthDay => "%Y-%m-%d",
    };
    date.format(fmt).to_string()
}

/// Calendar-day grouping key (`2024-01-31`).
#[inline]
pub fn day_key(date: DateTime<Utc>) -> String {
    format_date(date, DateStyle::YearMonthDay)
}

/// Week-of-month ordinal, weeks starting on Sunday.
///
/// The first partial week counts as week 1, so the 1st of a month that
/// falls on a Saturday is still "Week 1".
pub fn week_of_month(date: DateTime<Utc>) -> u32 {
    let day = date.day();
    let weekday = date.weekday().num_days_from_sunday();
    (day + 6 - weekday).div_ceil(7)
}

// =============================================================================
// Report Ranges
// =============================================================================

/// The date-range selector on the Insights screen.
///
/// Each range has two jobs: a *filter* window over the sales collection,
/// and a *trend* axis of evenly spaced buckets. The trend axis is wider
/// than the filter window on purpose (7 days / 4 weeks / 6 months), so the
/// trend chart keeps its shape even when the filter is narrow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportRange {
    /// Today only.
    Daily,
    /// Trailing 7 days.
    #[default]
    Weekly,
    /// Trailing 1 month.
    Monthly,
}

impl ReportRange {
    /// Inclusive start of the filter window relative to `now`.
    pub fn filter_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ReportRange::Daily => start_of_day(now),
            ReportRange::Weekly => now.checked_sub_days(Days::new(7)).unwrap_or(now),
            ReportRange::Monthly => now.checked_sub_months(Months::new(1)).unwrap_or(now),
        }
    }

    /// First bucket of the trend axis relative to `now`.
    pub fn trend_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            // Last 7 days, aligned to midnight
            ReportRange::Daily => {
                start_of_day(now.checked_sub_days(Days::new(6)).unwrap_or(now))
            }
            // Last 4 weeks
            ReportRange::Weekly => now.checked_sub_days(Days::new(28)).unwrap_or(now),
            // Last 6 months
            ReportRange::Monthly => now.checked_sub_months(Months::new(5)).unwrap_or(now),
        }
    }

    /// Advances a trend cursor by one bucket.
    pub fn trend_step(self, current: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ReportRange::Daily => current.checked_add_days(Days::new(1)).unwrap_or(current),
            ReportRange::Weekly => current.checked_add_days(Days::new(7)).unwrap_or(current),
            ReportRange::Monthly => current
                .checked_add_months(Months::new(1))
                .unwrap_or(current),
        }
    }

    /// Axis label for a date under this range.
    ///
    /// Daily buckets read `1/31`, weekly buckets `Week 5, 1`, monthly
    /// buckets `Jan`. Sales map onto the axis through this same label, so
    /// a sale outside the seeded buckets simply has no bucket to land in.
    pub fn trend_label(self, date: DateTime<Utc>) -> String {
        match self {
            ReportRange::Daily => date.format("%-m/%-d").to_string(),
            ReportRange::Weekly => format!("Week {}, {}", week_of_month(date), date.month()),
            ReportRange::Monthly => date.format("%b").to_string(),
        }
    }
}

/// Midnight of the given day.
fn start_of_day(date: DateTime<Utc>) -> DateTime<Utc> {
    date.date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc()
}

// =============================================================================
// Unit Tests
// =============================================================================
