//! Day-granularity calendar helpers.
//!
//! Every analytic in this crate works on [`Day`] values, never on raw
//! timestamps. Timestamps are normalized with [`start_of_day`] at the model
//! boundary, so daylight-saving shifts and late-night logging cannot leak
//! into streak math.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};

/// A calendar day in the user's local calendar.
pub type Day = NaiveDate;

/// Normalize a timestamp to the calendar day it falls on in its own zone.
pub fn start_of_day<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Day {
    timestamp.date_naive()
}

/// Signed number of calendar days from `from` to `to`.
pub fn day_offset(from: Day, to: Day) -> i64 {
    (to - from).num_days()
}

/// Absolute number of calendar days separating two days.
pub fn days_between(a: Day, b: Day) -> i64 {
    day_offset(a, b).abs()
}

/// Step `day` by `n` whole calendar days, saturating at the representable range.
pub fn add_days(day: Day, n: i64) -> Day {
    let stepped = if n >= 0 {
        day.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        day.checked_sub_days(Days::new(n.unsigned_abs()))
    };
    stepped.unwrap_or(if n >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// The day before `day`.
pub fn previous_day(day: Day) -> Day {
    add_days(day, -1)
}

/// Inclusive ascending range of days. Empty when `start > end`.
pub fn date_range(start: Day, end: Day) -> DateRange {
    DateRange {
        next: (start <= end).then_some(start),
        end,
    }
}

/// Lazy iterator returned by [`date_range`].
///
/// Cloning yields an independent iterator from the same position, so a range
/// can be walked more than once.
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<Day>,
    end: Day,
}

impl Iterator for DateRange {
    type Item = Day;

    fn next(&mut self) -> Option<Day> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for DateRange {
    fn len(&self) -> usize {
        self.next
            .map(|d| day_offset(d, self.end) as usize + 1)
            .unwrap_or(0)
    }
}

/// Source of "today" for every calculation.
///
/// Analytics never read the system clock directly; callers pass a clock so
/// results are reproducible.
pub trait Clock {
    fn today(&self) -> Day;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Day {
        start_of_day(&Local::now())
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Day);

impl Clock for FixedClock {
    fn today(&self) -> Day {
        self.0
    }
}
