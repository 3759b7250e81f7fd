use chrono::{DateTime, Duration, Months, Utc};
use core_types::{TimeRange, Trade};

/// The inclusive lower bound of `range` relative to `now`, or `None` when the
/// window is unbounded.
///
/// Month and year windows use calendar arithmetic: the day-of-month is clamped to
/// the last valid day of the target month, so 31 March minus one month is
/// 28 (or 29) February.
pub fn range_start(range: TimeRange, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match range {
        TimeRange::OneWeek => now.checked_sub_signed(Duration::days(7)),
        TimeRange::OneMonth => now.checked_sub_months(Months::new(1)),
        TimeRange::ThreeMonths => now.checked_sub_months(Months::new(3)),
        TimeRange::SixMonths => now.checked_sub_months(Months::new(6)),
        TimeRange::OneYear => now.checked_sub_months(Months::new(12)),
        TimeRange::All => None,
    }
}

/// Keeps the trades whose timestamp is at or after the start of `range`.
///
/// There is no upper bound: trades stamped after `now` are kept as well.
pub fn filter_by_range(trades: &[Trade], range: TimeRange, now: DateTime<Utc>) -> Vec<&Trade> {
    match range_start(range, now) {
        Some(start) => trades.iter().filter(|t| t.timestamp >= start).collect(),
        None => trades.iter().collect(),
    }
}
