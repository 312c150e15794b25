//! Streak, comeback, and recovery metrics over a [`DaySeries`].
//!
//! The three comeback-flavoured metrics measure different things and are
//! not interchangeable:
//! - **comeback count**: how many times a run of misses was ended by a
//!   non-zero day (events)
//! - **days returned after miss**: how many non-zero days happened after
//!   the first miss (days)
//! - **recovery ratio**: comebacks per missed day between the first and last
//!   logged day (ratio, 0.0 to 1.0)

use serde::{Deserialize, Serialize};

use super::series::DaySeries;
use crate::calendar::{add_days, day_offset, previous_day, Day};

/// Default look-back for [`StreakAnalyzer::consecutive_missed_days`].
pub const MISSED_DAYS_LOOKBACK: u32 = 30;

/// All streak metrics for one series, as of one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub comeback_count: u32,
    pub days_returned_after_miss: u32,
    /// Comebacks per missed day (0.0 to 1.0)
    pub recovery_ratio: f64,
    pub total_non_zero_days: u32,
}

/// Computes streak metrics for a series relative to "today".
#[derive(Debug, Clone, Copy)]
pub struct StreakAnalyzer<'a> {
    series: &'a DaySeries,
    today: Day,
}

impl<'a> StreakAnalyzer<'a> {
    pub fn new(series: &'a DaySeries, today: Day) -> Self {
        Self { series, today }
    }

    /// Consecutive non-zero days ending today, or ending yesterday when today
    /// has not been completed yet.
    pub fn current_streak(&self) -> u32 {
        let anchor = if self.series.is_non_zero(self.today) {
            self.today
        } else {
            previous_day(self.today)
        };

        let mut expected = anchor;
        let mut streak = 0;
        for day in self.series.non_zero_days().range(..=anchor).rev() {
            if *day != expected {
                break;
            }
            streak += 1;
            expected = previous_day(expected);
        }
        streak
    }

    /// Longest run of consecutive non-zero days anywhere in the series.
    pub fn longest_streak(&self) -> u32 {
        let mut longest = 0;
        let mut current = 0;
        let mut previous: Option<Day> = None;

        for day in self.series.non_zero_days() {
            current = match previous {
                Some(prev) if day_offset(prev, *day) == 1 => current + 1,
                _ => 1,
            };
            longest = longest.max(current);
            previous = Some(*day);
        }
        longest
    }

    /// Number of non-zero days that directly follow one or more misses.
    pub fn comeback_count(&self) -> u32 {
        self.series
            .walk(self.today)
            .filter(|step| step.comeback_after.is_some())
            .count() as u32
    }

    /// Number of non-zero days on or after the first comeback, i.e. every
    /// day the habit was kept after it had been missed at least once.
    ///
    /// This is intentionally broader than "non-zero days directly after a
    /// zero day or gap"; that narrower count is [`Self::comeback_count`].
    pub fn days_returned_after_miss(&self) -> u32 {
        let mut seen_miss = false;
        let mut days = 0;
        for step in self.series.walk(self.today) {
            if step.missed {
                seen_miss = true;
            } else if step.non_zero && seen_miss {
                days += 1;
            }
        }
        days
    }

    /// Comebacks divided by missed days, counted from the first through the
    /// last logged day. Returns 0.0 when nothing was missed in that span.
    pub fn recovery_ratio(&self) -> f64 {
        let Some(last) = self.series.last_logged() else {
            return 0.0;
        };

        let mut missed = 0u32;
        let mut recovered = 0u32;
        for step in self.series.walk(last.min(self.today)) {
            if step.missed {
                missed += 1;
            }
            if step.comeback_after.is_some() {
                recovered += 1;
            }
        }

        if missed == 0 {
            0.0
        } else {
            recovered as f64 / missed as f64
        }
    }

    /// Misses counted backwards from `ending_on`, stopping at a non-zero day,
    /// at the series start, or after `lookback` days.
    pub fn consecutive_missed_days(&self, ending_on: Day, lookback: u32) -> u32 {
        let mut count = 0;
        let mut day = ending_on;
        while count < lookback && day >= self.series.start() && !self.series.is_non_zero(day) {
            count += 1;
            day = add_days(day, -1);
        }
        count
    }

    pub fn summary(&self) -> StreakSummary {
        let summary = StreakSummary {
            current_streak: self.current_streak(),
            longest_streak: self.longest_streak(),
            comeback_count: self.comeback_count(),
            days_returned_after_miss: self.days_returned_after_miss(),
            recovery_ratio: self.recovery_ratio(),
            total_non_zero_days: self.series.total_non_zero_days() as u32,
        };
        tracing::debug!(
            today = %self.today,
            current = summary.current_streak,
            longest = summary.longest_streak,
            comebacks = summary.comeback_count,
            "streak summary"
        );
        summary
    }
}
