use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::constants::DAYS_PER_WEEK;

/// Monday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Sunday of the week containing `date`.
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Duration::days(DAYS_PER_WEEK - 1)
}

pub fn is_monday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

/// Monday-based week starts covering `[start, end]`.
///
/// The first entry is the Monday on or before `start`, so it can precede the
/// interval. Returns an empty list when `start > end`.
pub fn each_week_of_interval(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    let last = start_of_week(end);
    let mut weeks = Vec::new();
    let mut current = start_of_week(start);
    while current <= last {
        weeks.push(current);
        current += Duration::days(DAYS_PER_WEEK);
    }
    weeks
}

/// Number of calendar days in `[start, end]`, counting both ends.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
