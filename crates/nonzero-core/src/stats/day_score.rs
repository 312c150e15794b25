//! Day Score: an aggregate daily metric across all active tasks.
//!
//! A day is a non-zero day when the share of active tasks completed that day
//! reaches the configured criteria percentage. The resulting set of days is
//! fed through the same streak and resilience algorithms as a single task.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::completion::{completion_rate, completion_rates, WindowRate, STANDARD_WINDOWS};
use super::resilience::ResilienceCalculator;
use super::series::DaySeries;
use super::streak::{StreakAnalyzer, StreakSummary};
use crate::calendar::Day;
use crate::snapshot::TaskProvider;
use crate::task::Task;

/// Criteria used when none is configured.
pub const DEFAULT_DAY_SCORE_CRITERIA: u8 = 10;

/// Builds a [`DayScore`] for a fixed criteria percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayScoreAggregator {
    criteria: u8,
}

impl Default for DayScoreAggregator {
    fn default() -> Self {
        Self {
            criteria: DEFAULT_DAY_SCORE_CRITERIA,
        }
    }
}

impl DayScoreAggregator {
    /// # Panics
    /// Panics if `criteria` is above 100.
    pub fn new(criteria: u8) -> Self {
        assert!(criteria <= 100, "day score criteria must be 0-100, got {criteria}");
        Self { criteria }
    }

    pub fn criteria(&self) -> u8 {
        self.criteria
    }

    /// Aggregate the non-archived tasks of a provider.
    pub fn from_provider<P>(&self, provider: &P, today: Day) -> DayScore
    where
        P: TaskProvider + ?Sized,
    {
        self.aggregate(&provider.tasks(false), today)
    }

    /// Aggregate `tasks`, treating all of them as active. `today` only bounds
    /// the walk when there are no tasks to take a start day from.
    pub fn aggregate(&self, tasks: &[&Task], today: Day) -> DayScore {
        let mut completion_counts: BTreeMap<Day, usize> = BTreeMap::new();
        for task in tasks {
            for day in task.non_zero_days() {
                *completion_counts.entry(day).or_insert(0) += 1;
            }
        }

        let task_count = tasks.len();
        let non_zero = completion_counts
            .iter()
            .filter(|(_, count)| percentage(**count, task_count) >= u32::from(self.criteria))
            .map(|(day, _)| *day);

        let start = tasks.iter().map(|t| t.created_on).min().unwrap_or(today);
        let series = DaySeries::new(start, completion_counts.keys().copied(), non_zero);

        tracing::debug!(
            tasks = task_count,
            criteria = self.criteria,
            active_days = completion_counts.len(),
            non_zero_days = series.total_non_zero_days(),
            "aggregated day score"
        );

        DayScore {
            criteria: self.criteria,
            task_count,
            completion_counts,
            series,
        }
    }
}

/// `floor(completed * 100 / total)`, in integers so 29 of 100 is 29.
fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed * 100 / total) as u32
}

/// Derived Day Score data for one snapshot and criteria.
///
/// Recompute whenever entries, tasks, or criteria change.
#[derive(Debug, Clone)]
pub struct DayScore {
    criteria: u8,
    task_count: usize,
    completion_counts: BTreeMap<Day, usize>,
    series: DaySeries,
}

impl DayScore {
    pub fn criteria(&self) -> u8 {
        self.criteria
    }

    pub fn task_count(&self) -> usize {
        self.task_count
    }

    /// Number of active tasks completed on `day`.
    pub fn completed_on(&self, day: Day) -> usize {
        self.completion_counts.get(&day).copied().unwrap_or(0)
    }

    /// Percentage (0-100, floored) of active tasks completed on `day`.
    pub fn percentage_on(&self, day: Day) -> u32 {
        percentage(self.completed_on(day), self.task_count)
    }

    pub fn is_non_zero_day(&self, day: Day) -> bool {
        self.series.is_non_zero(day)
    }

    pub fn series(&self) -> &DaySeries {
        &self.series
    }

    pub fn total_non_zero_days(&self) -> usize {
        self.series.total_non_zero_days()
    }

    pub fn streaks(&self, today: Day) -> StreakAnalyzer<'_> {
        StreakAnalyzer::new(&self.series, today)
    }

    pub fn resilience_index(&self, today: Day) -> Option<f64> {
        ResilienceCalculator::new(&self.series, today).index()
    }

    /// # Panics
    /// Panics if `days` is zero.
    pub fn completion_rate(&self, today: Day, days: u32) -> f64 {
        completion_rate(&self.series, today, days)
    }

    pub fn report(&self, today: Day) -> DayScoreReport {
        DayScoreReport {
            today,
            criteria: self.criteria,
            active_tasks: self.task_count,
            today_percentage: self.percentage_on(today),
            today_is_non_zero: self.is_non_zero_day(today),
            streaks: self.streaks(today).summary(),
            resilience_index: self.resilience_index(today),
            completion_rates: completion_rates(&self.series, today, &STANDARD_WINDOWS),
        }
    }
}

/// Every Day Score metric as of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayScoreReport {
    pub today: Day,
    pub criteria: u8,
    pub active_tasks: usize,
    pub today_percentage: u32,
    pub today_is_non_zero: bool,
    #[serde(flatten)]
    pub streaks: StreakSummary,
    /// `None` when there has never been a comeback
    pub resilience_index: Option<f64>,
    pub completion_rates: Vec<WindowRate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskType;
    use chrono::NaiveDate;

    fn day(d: u32) -> Day {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    fn task(name: &str, done: &[u32]) -> Task {
        let mut task = Task::new(name, TaskType::Boolean, 1.0, day(1)).unwrap();
        for d in done {
            task.upsert_entry(day(*d), 1.0, None).unwrap();
        }
        task
    }

    #[test]
    fn integer_percentage_does_not_round_down_twice() {
        assert_eq!(percentage(29, 100), 29);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 66);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn half_completion_meets_fifty_but_not_fifty_one() {
        let a = task("A", &[5]);
        let b = task("B", &[]);
        let tasks = [&a, &b];

        let at_50 = DayScoreAggregator::new(50).aggregate(&tasks, day(5));
        assert!(at_50.is_non_zero_day(day(5)));
        assert_eq!(at_50.percentage_on(day(5)), 50);

        let at_51 = DayScoreAggregator::new(51).aggregate(&tasks, day(5));
        assert!(!at_51.is_non_zero_day(day(5)));
    }

    #[test]
    fn no_tasks_means_zero_score_and_no_streak() {
        let score = DayScoreAggregator::default().aggregate(&[], day(5));
        assert_eq!(score.percentage_on(day(5)), 0);
        assert_eq!(score.total_non_zero_days(), 0);
        assert_eq!(score.streaks(day(5)).current_streak(), 0);
        assert_eq!(score.resilience_index(day(5)), None);
    }

    #[test]
    fn sub_threshold_days_count_as_misses_for_comebacks() {
        // Three tasks, criteria 60: day 2 has one of three (33%) and is a miss.
        let a = task("A", &[1, 2, 3]);
        let b = task("B", &[1, 3]);
        let c = task("C", &[]);
        let score = DayScoreAggregator::new(60).aggregate(&[&a, &b, &c], day(3));

        assert!(score.is_non_zero_day(day(1)));
        assert!(!score.is_non_zero_day(day(2)));
        assert!(score.is_non_zero_day(day(3)));
        let streaks = score.streaks(day(3));
        assert_eq!(streaks.comeback_count(), 1);
        assert_eq!(streaks.current_streak(), 1);
        assert_eq!(streaks.longest_streak(), 1);
    }

    #[test]
    fn criteria_zero_still_requires_some_completion() {
        let a = task("A", &[2]);
        let score = DayScoreAggregator::new(0).aggregate(&[&a], day(3));
        assert!(score.is_non_zero_day(day(2)));
        assert!(!score.is_non_zero_day(day(3)));
    }

    #[test]
    #[should_panic(expected = "0-100")]
    fn criteria_above_hundred_panics() {
        DayScoreAggregator::new(101);
    }

    #[test]
    fn report_collects_metrics() {
        let a = task("A", &[1, 2, 4, 5]);
        let score = DayScoreAggregator::default().aggregate(&[&a], day(5));
        let report = score.report(day(5));

        assert_eq!(report.active_tasks, 1);
        assert_eq!(report.today_percentage, 100);
        assert!(report.today_is_non_zero);
        assert_eq!(report.streaks.current_streak, 2);
        assert_eq!(report.streaks.comeback_count, 1);
        assert_eq!(report.resilience_index, Some(1.0));
        assert_eq!(report.completion_rates.len(), 3);
    }
}
