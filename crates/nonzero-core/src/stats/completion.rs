//! Trailing-window completion rates and averages.
//!
//! A window of `n` days ends today and starts `n - 1` days earlier; both
//! ends are inclusive.

use serde::{Deserialize, Serialize};

use super::series::DaySeries;
use crate::calendar::{add_days, date_range, DateRange, Day};
use crate::task::Task;

/// Windows reported by default: one week, one month, one quarter.
pub const STANDARD_WINDOWS: [u32; 3] = [7, 30, 90];

/// An inclusive trailing range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: Day,
    pub end: Day,
    pub days: u32,
}

impl Window {
    /// The `days`-day window ending on `today`.
    ///
    /// # Panics
    /// Panics if `days` is zero.
    pub fn trailing(today: Day, days: u32) -> Self {
        assert!(days > 0, "window must span at least one day");
        Self {
            start: add_days(today, -(i64::from(days) - 1)),
            end: today,
            days,
        }
    }

    pub fn contains(&self, day: Day) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn iter(&self) -> DateRange {
        date_range(self.start, self.end)
    }
}

/// One day of a task's window, for charts and heatmaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub day: Day,
    /// Logged value, 0.0 when nothing was logged
    pub value: f64,
    pub is_non_zero: bool,
}

/// Completion rate for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRate {
    pub days: u32,
    /// Fraction of days that were non-zero (0.0 to 1.0)
    pub rate: f64,
}

/// Fraction of the trailing `days` window that was non-zero.
///
/// # Panics
/// Panics if `days` is zero.
pub fn completion_rate(series: &DaySeries, today: Day, days: u32) -> f64 {
    let window = Window::trailing(today, days);
    let completed = series
        .non_zero_days()
        .range(window.start..=window.end)
        .count();
    completed as f64 / f64::from(days)
}

/// Completion rates for each of `windows`.
pub fn completion_rates(series: &DaySeries, today: Day, windows: &[u32]) -> Vec<WindowRate> {
    windows
        .iter()
        .map(|&days| WindowRate {
            days,
            rate: completion_rate(series, today, days),
        })
        .collect()
}

/// Mean logged value over the trailing `days` window, counting unlogged
/// days as zero. Returns 0.0 when nothing was logged in the window.
///
/// # Panics
/// Panics if `days` is zero.
pub fn average_value(task: &Task, today: Day, days: u32) -> f64 {
    let window = Window::trailing(today, days);
    let entries = task.entries_between(window.start, window.end);
    if entries.is_empty() {
        return 0.0;
    }
    let total: f64 = entries.iter().map(|e| e.value()).sum();
    total / f64::from(days)
}

/// Per-day values for the trailing `days` window, oldest first.
///
/// # Panics
/// Panics if `days` is zero.
pub fn window_days(task: &Task, today: Day, days: u32) -> Vec<DayCell> {
    Window::trailing(today, days)
        .iter()
        .map(|day| match task.entry_for(day) {
            Some(entry) => DayCell {
                day,
                value: entry.value(),
                is_non_zero: task.is_non_zero(entry),
            },
            None => DayCell {
                day,
                value: 0.0,
                is_non_zero: false,
            },
        })
        .collect()
}
