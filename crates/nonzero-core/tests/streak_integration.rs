//! Integration tests for per-task streak and resilience analytics.
//!
//! Builds tasks through the public API and checks the metrics a stats
//! screen would show.

use nonzero_core::calendar::add_days;
use nonzero_core::stats::{recency_weight, TaskStats};
use nonzero_core::{Day, Entry, FixedClock, Task, TaskType};

fn today() -> Day {
    Day::from_ymd_opt(2025, 3, 20).unwrap()
}

fn ago(n: i64) -> Day {
    add_days(today(), -n)
}

fn task_with(minimum: f64, created_ago: i64, values: &[(i64, f64)]) -> Task {
    let mut task = Task::new("Pushups", TaskType::Count, minimum, ago(created_ago)).unwrap();
    for (n, value) in values {
        task.add_entry(Entry::new(task.id, ago(*n), *value)).unwrap();
    }
    task
}

#[test]
fn test_pushups_scenario() {
    let task = task_with(5.0, 10, &[(9, 10.0), (5, 10.0), (0, 10.0)]);
    let stats = TaskStats::with_clock(&task, &FixedClock(today()));

    assert_eq!(stats.comeback_count(), 2);
    assert_eq!(stats.current_streak(), 1);
    assert_eq!(stats.longest_streak(), 1);

    let events = stats.comeback_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].day, ago(5));
    assert_eq!(events[0].missed_days, 3);
    assert!((events[0].weight - 0.5f64.powf(5.0 / 30.0)).abs() < 1e-12);
    assert_eq!(events[1].day, today());
    assert_eq!(events[1].missed_days, 4);
    assert_eq!(events[1].weight, 1.0);

    let w5 = recency_weight(5);
    let expected = (0.5 * w5 + 0.4 * 1.0) / (w5 + 1.0);
    let index = stats.resilience_index().unwrap();
    assert!((index - expected).abs() < 1e-12, "index was {index}");
}

#[test]
fn test_task_without_entries() {
    let task = task_with(1.0, 30, &[]);
    let stats = TaskStats::new(&task, today());

    assert_eq!(stats.current_streak(), 0);
    assert_eq!(stats.longest_streak(), 0);
    assert_eq!(stats.comeback_count(), 0);
    assert_eq!(stats.days_returned_after_miss(), 0);
    assert_eq!(stats.recovery_ratio(), 0.0);
    assert_eq!(stats.resilience_index(), None);
    assert_eq!(stats.completion_rate(7), 0.0);
    assert_eq!(stats.average_value(7), 0.0);
}

#[test]
fn test_logging_today_extends_streak() {
    let mut task = task_with(1.0, 30, &[(4, 1.0), (3, 1.0), (2, 1.0), (1, 1.0)]);
    let before = TaskStats::new(&task, today()).current_streak();
    assert_eq!(before, 4);

    task.upsert_entry(today(), 1.0, None).unwrap();
    let after = TaskStats::new(&task, today()).current_streak();
    assert_eq!(after, before + 1);
}

#[test]
fn test_sub_minimum_today_keeps_yesterdays_streak() {
    let task = task_with(5.0, 30, &[(2, 6.0), (1, 7.0), (0, 2.0)]);
    let stats = TaskStats::new(&task, today());
    assert_eq!(stats.current_streak(), 2);
}

#[test]
fn test_repeated_queries_are_identical() {
    let task = task_with(5.0, 40, &[(30, 8.0), (29, 1.0), (20, 9.0), (3, 5.0), (1, 5.0)]);
    let stats = TaskStats::new(&task, today());
    assert_eq!(stats.report(), stats.report());
    assert_eq!(
        TaskStats::new(&task, today()).report(),
        TaskStats::new(&task, today()).report()
    );
}

#[test]
fn test_recent_comebacks_weigh_more() {
    // Same shape of lapses: one-day-old comebacks versus sixty-day-old ones.
    let recent = task_with(1.0, 100, &[(3, 1.0), (1, 1.0)]);
    let stale = task_with(1.0, 100, &[(62, 1.0), (60, 1.0)]);

    let a = TaskStats::new(&recent, today());
    let b = TaskStats::new(&stale, today());
    assert_eq!(a.comeback_count(), b.comeback_count());

    let ea = a.comeback_events();
    let eb = b.comeback_events();
    assert_eq!(ea[0].missed_days, eb[0].missed_days);
    assert!(ea[0].weight > eb[0].weight);

    // A weighted mean of equal scores is the score itself, whatever the age.
    assert_eq!(a.resilience_index(), b.resilience_index());
}

#[test]
fn test_resilience_prefers_recent_fast_recovery() {
    // Same lapses in both (1, 5 and 60 days); A's quick lapse is the most
    // recent comeback, B's is the oldest.
    let a = task_with(1.0, 100, &[(70, 1.0), (64, 1.0), (3, 1.0), (1, 1.0)]);
    let b = task_with(1.0, 100, &[(70, 1.0), (68, 1.0), (7, 1.0), (1, 1.0)]);

    let ra = TaskStats::new(&a, today()).resilience_index().unwrap();
    let rb = TaskStats::new(&b, today()).resilience_index().unwrap();
    assert!(ra > rb, "{ra} should beat {rb}");
}

#[test]
fn test_completion_rate_three_of_seven() {
    let task = task_with(1.0, 30, &[(6, 1.0), (4, 1.0), (14, 1.0), (2, 0.0), (0, 1.0)]);
    let rate = TaskStats::new(&task, today()).completion_rate(7);
    assert!((rate - 3.0 / 7.0).abs() < 1e-9);
    assert!((rate - 0.4286).abs() < 1e-4);
}

#[test]
fn test_recovery_metrics_are_distinct() {
    // done, zero, done, done, gap, gap, done
    let task = task_with(1.0, 6, &[(6, 1.0), (5, 0.0), (4, 1.0), (3, 1.0), (0, 1.0)]);
    let stats = TaskStats::new(&task, today());

    assert_eq!(stats.comeback_count(), 2);
    assert_eq!(stats.days_returned_after_miss(), 3);
    // Misses on days 5, 2, 1; comebacks on days 4 and 0.
    assert!((stats.recovery_ratio() - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_backfilled_entry_before_creation_extends_the_walk() {
    let task = task_with(1.0, 2, &[(5, 1.0), (1, 1.0)]);
    let stats = TaskStats::new(&task, today());
    assert_eq!(stats.series().start(), ago(5));
    assert_eq!(stats.comeback_count(), 1);
}
