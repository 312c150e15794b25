//! The day series every streak and resilience metric runs over.
//!
//! A series is a set of non-zero days, the set of days that carried any
//! observation at all, and the day the walk starts from. Per-task analytics
//! build one from a task's entries; the Day Score builds one from the
//! cross-task completion map. Both then share the same algorithms.

use std::collections::BTreeSet;

use crate::calendar::{date_range, DateRange, Day};
use crate::task::Task;

/// Non-zero and logged days plus a walk boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySeries {
    start: Day,
    logged: BTreeSet<Day>,
    non_zero: BTreeSet<Day>,
}

impl DaySeries {
    /// Build a series. Non-zero days are always logged days, and the start is
    /// pulled back to the first logged day if one predates it.
    pub fn new<L, N>(start: Day, logged: L, non_zero: N) -> Self
    where
        L: IntoIterator<Item = Day>,
        N: IntoIterator<Item = Day>,
    {
        let non_zero: BTreeSet<Day> = non_zero.into_iter().collect();
        let mut logged: BTreeSet<Day> = logged.into_iter().collect();
        logged.extend(non_zero.iter().copied());

        let start = logged.first().map_or(start, |first| start.min(*first));
        Self {
            start,
            logged,
            non_zero,
        }
    }

    /// A task's series: every entry is logged, entries meeting the minimum
    /// are non-zero, and the walk starts on the creation day.
    pub fn for_task(task: &Task) -> Self {
        let series = Self::new(
            task.created_on,
            task.entries().iter().map(|e| e.date()),
            task.non_zero_days(),
        );
        tracing::trace!(
            task_id = %task.id,
            logged = series.logged.len(),
            non_zero = series.non_zero.len(),
            "built task series"
        );
        series
    }

    pub fn start(&self) -> Day {
        self.start
    }

    pub fn non_zero_days(&self) -> &BTreeSet<Day> {
        &self.non_zero
    }

    pub fn is_non_zero(&self, day: Day) -> bool {
        self.non_zero.contains(&day)
    }

    pub fn is_logged(&self, day: Day) -> bool {
        self.logged.contains(&day)
    }

    pub fn first_logged(&self) -> Option<Day> {
        self.logged.first().copied()
    }

    pub fn last_logged(&self) -> Option<Day> {
        self.logged.last().copied()
    }

    pub fn total_non_zero_days(&self) -> usize {
        self.non_zero.len()
    }

    /// Walk every day from the start through `end`, classifying each one.
    pub fn walk(&self, end: Day) -> Walk<'_> {
        Walk {
            series: self,
            days: date_range(self.start, end),
            armed: false,
            missed: 0,
        }
    }
}

/// One day of a [`Walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStep {
    pub day: Day,
    pub non_zero: bool,
    /// A miss that counts: not non-zero, on or after the first logged day.
    pub missed: bool,
    /// Set on a non-zero day that ends a run of counted misses; holds the
    /// length of that run.
    pub comeback_after: Option<u32>,
}

/// Day-by-day iterator over a [`DaySeries`].
///
/// Days before the first logged day are not misses: tracking has not begun,
/// so nothing before it can be "come back" from.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    series: &'a DaySeries,
    days: DateRange,
    armed: bool,
    missed: u32,
}

impl Iterator for Walk<'_> {
    type Item = WalkStep;

    fn next(&mut self) -> Option<WalkStep> {
        let day = self.days.next()?;
        if self.series.is_logged(day) {
            self.armed = true;
        }

        let non_zero = self.series.is_non_zero(day);
        let mut step = WalkStep {
            day,
            non_zero,
            missed: false,
            comeback_after: None,
        };

        if non_zero {
            step.comeback_after = (self.missed > 0).then_some(self.missed);
            self.missed = 0;
        } else if self.armed {
            step.missed = true;
            self.missed += 1;
        }
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.days.size_hint()
    }
}
