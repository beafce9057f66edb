//! Calendar arithmetic shared by the streak, statistics and menu rules.
//!
//! All calendar days are UTC days.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Half-open `[start, end)` range covering `date`.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(date);
    let end = date
        .checked_add_days(Days::new(1))
        .map_or(DateTime::<Utc>::MAX_UTC, start_of_day);
    (start, end)
}

/// The Monday on or after `today`.
///
/// A Monday maps to itself, so a menu published on a Monday applies to the
/// week that has just started.
pub fn upcoming_monday(today: NaiveDate) -> NaiveDate {
    let from_monday = u64::from(today.weekday().num_days_from_monday());
    let offset = (7 - from_monday) % 7;
    today.checked_add_days(Days::new(offset)).unwrap_or(today)
}
