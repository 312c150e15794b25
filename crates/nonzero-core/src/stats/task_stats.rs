//! Per-task analytics.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::completion::{
    average_value, completion_rate, completion_rates, window_days, DayCell, WindowRate,
    STANDARD_WINDOWS,
};
use super::resilience::{ComebackEvent, ResilienceCalculator};
use super::series::DaySeries;
use super::streak::{StreakAnalyzer, StreakSummary, MISSED_DAYS_LOOKBACK};
use crate::calendar::{previous_day, Clock, Day};
use crate::task::{Task, TaskType};

/// Analytics for one task as of one day.
///
/// Holds a series derived from the task's entries at construction; build a
/// new one after the task changes.
#[derive(Debug, Clone)]
pub struct TaskStats<'a> {
    task: &'a Task,
    series: DaySeries,
    today: Day,
}

impl<'a> TaskStats<'a> {
    pub fn new(task: &'a Task, today: Day) -> Self {
        Self {
            task,
            series: DaySeries::for_task(task),
            today,
        }
    }

    pub fn with_clock(task: &'a Task, clock: &dyn Clock) -> Self {
        Self::new(task, clock.today())
    }

    pub fn task(&self) -> &'a Task {
        self.task
    }

    pub fn today(&self) -> Day {
        self.today
    }

    pub fn series(&self) -> &DaySeries {
        &self.series
    }

    fn streaks(&self) -> StreakAnalyzer<'_> {
        StreakAnalyzer::new(&self.series, self.today)
    }

    pub fn current_streak(&self) -> u32 {
        self.streaks().current_streak()
    }

    pub fn longest_streak(&self) -> u32 {
        self.streaks().longest_streak()
    }

    pub fn comeback_count(&self) -> u32 {
        self.streaks().comeback_count()
    }

    pub fn days_returned_after_miss(&self) -> u32 {
        self.streaks().days_returned_after_miss()
    }

    pub fn recovery_ratio(&self) -> f64 {
        self.streaks().recovery_ratio()
    }

    pub fn resilience_index(&self) -> Option<f64> {
        ResilienceCalculator::new(&self.series, self.today).index()
    }

    pub fn comeback_events(&self) -> Vec<ComebackEvent> {
        ResilienceCalculator::new(&self.series, self.today).events()
    }

    /// Misses in a row ending yesterday, looking back at most 30 days and
    /// never before the task existed.
    pub fn missed_days_before_today(&self) -> u32 {
        self.streaks()
            .consecutive_missed_days(previous_day(self.today), MISSED_DAYS_LOOKBACK)
    }

    /// # Panics
    /// Panics if `days` is zero.
    pub fn completion_rate(&self, days: u32) -> f64 {
        completion_rate(&self.series, self.today, days)
    }

    /// # Panics
    /// Panics if `days` is zero.
    pub fn average_value(&self, days: u32) -> f64 {
        average_value(self.task, self.today, days)
    }

    /// # Panics
    /// Panics if `days` is zero.
    pub fn window(&self, days: u32) -> Vec<DayCell> {
        window_days(self.task, self.today, days)
    }

    pub fn report(&self) -> TaskReport {
        let report = TaskReport {
            task_id: self.task.id,
            name: self.task.name.clone(),
            task_type: self.task.task_type,
            today: self.today,
            completed_today: self.task.is_completed_on(self.today),
            streaks: self.streaks().summary(),
            resilience_index: self.resilience_index(),
            missed_days_before_today: self.missed_days_before_today(),
            completion_rates: completion_rates(&self.series, self.today, &STANDARD_WINDOWS),
            average_value_7: self.average_value(7),
            average_value_30: self.average_value(30),
        };
        tracing::debug!(task_id = %report.task_id, name = %report.name, "task report built");
        report
    }
}

/// Every per-task metric as of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    pub task_id: Uuid,
    pub name: String,
    pub task_type: TaskType,
    pub today: Day,
    pub completed_today: bool,
    #[serde(flatten)]
    pub streaks: StreakSummary,
    /// `None` when there has never been a comeback
    pub resilience_index: Option<f64>,
    pub missed_days_before_today: u32,
    pub completion_rates: Vec<WindowRate>,
    pub average_value_7: f64,
    pub average_value_30: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{add_days, FixedClock};
    use chrono::NaiveDate;

    fn today() -> Day {
        NaiveDate::from_ymd_opt(2024, 10, 15).unwrap()
    }

    fn ago(n: i64) -> Day {
        add_days(today(), -n)
    }

    #[test]
    fn fresh_task_has_empty_metrics() {
        let task = Task::new("Stretch", TaskType::Boolean, 1.0, today()).unwrap();
        let stats = TaskStats::with_clock(&task, &FixedClock(today()));
        assert_eq!(stats.current_streak(), 0);
        assert_eq!(stats.longest_streak(), 0);
        assert_eq!(stats.comeback_count(), 0);
        assert_eq!(stats.resilience_index(), None);
        assert_eq!(stats.missed_days_before_today(), 0);
    }

    #[test]
    fn missed_days_stop_at_creation() {
        let task = Task::new("Stretch", TaskType::Boolean, 1.0, ago(4)).unwrap();
        let stats = TaskStats::new(&task, today());
        assert_eq!(stats.missed_days_before_today(), 4);
    }

    #[test]
    fn report_matches_individual_queries() {
        let mut task = Task::new("Run", TaskType::Time, 20.0, ago(12)).unwrap();
        for (n, minutes) in [(12, 30.0), (11, 25.0), (8, 5.0), (7, 20.0), (1, 45.0)] {
            task.upsert_entry(ago(n), minutes, None).unwrap();
        }
        let stats = TaskStats::new(&task, today());
        let report = stats.report();

        assert_eq!(report.streaks.current_streak, stats.current_streak());
        assert_eq!(report.streaks.current_streak, 1);
        assert_eq!(report.streaks.longest_streak, 2);
        assert_eq!(report.streaks.comeback_count, 2);
        assert_eq!(report.resilience_index, stats.resilience_index());
        assert!(!report.completed_today);
        assert_eq!(report.missed_days_before_today, 0);
        assert_eq!(stats.window(7).len(), 7);
        assert_eq!(stats.comeback_events().len(), 2);
    }
}
