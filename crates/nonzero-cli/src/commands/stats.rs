use clap::Subcommand;
use nonzero_core::format;
use nonzero_core::stats::{StreakSummary, WindowRate};
use nonzero_core::{
    DayScoreAggregator, DayScoreReport, Task, TaskProvider, TaskReport, TaskStats, TaskType,
};
use uuid::Uuid;

use crate::context::Context;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Metrics for one task
    Task {
        /// Task name (case-insensitive) or id
        task: String,
    },
    /// Day Score metrics across all active tasks
    DayScore {
        /// Override the configured criteria percentage
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        criteria: Option<u8>,
    },
    /// Metrics for every active task
    All,
}

pub fn run(ctx: &Context, action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = ctx.load_snapshot()?;
    let clock = ctx.clock();

    match action {
        StatsAction::Task { task } => {
            let found = match task.parse::<Uuid>() {
                Ok(id) => snapshot.task_by_id(id),
                Err(_) => snapshot.task_by_name(&task),
            }
            .ok_or_else(|| format!("task not found: {task}"))?;

            let report = TaskStats::with_clock(found, clock.as_ref()).report();
            ctx.emit(&report, || render_task(found, &report))?;
        }
        StatsAction::DayScore { criteria } => {
            let criteria = criteria.unwrap_or(ctx.config.day_score.criteria);
            let today = clock.today();
            let report = DayScoreAggregator::new(criteria)
                .from_provider(&snapshot, today)
                .report(today);
            ctx.emit(&report, || render_day_score(&report))?;
        }
        StatsAction::All => {
            let tasks = snapshot.tasks(false);
            let reports: Vec<TaskReport> = tasks
                .iter()
                .map(|t| TaskStats::with_clock(t, clock.as_ref()).report())
                .collect();
            ctx.emit(&reports, || {
                if tasks.is_empty() {
                    return "No active tasks.".to_string();
                }
                tasks
                    .iter()
                    .zip(&reports)
                    .map(|(task, report)| render_task(task, report))
                    .collect::<Vec<_>>()
                    .join("\n\n")
            })?;
        }
    }
    Ok(())
}

fn render_task(task: &Task, report: &TaskReport) -> String {
    let mut lines = vec![format!("{} ({})", task.name, task.task_type)];
    lines.push(row(
        "Today",
        if report.completed_today { "done" } else { "not yet" },
    ));
    lines.extend(streak_rows(&report.streaks));
    lines.push(row("Resilience", &format::resilience(report.resilience_index)));
    lines.extend(rate_rows(&report.completion_rates));
    if task.task_type != TaskType::Boolean {
        lines.push(row("7-day average", &format::task_value(task, report.average_value_7)));
    }
    lines.join("\n")
}

fn render_day_score(report: &DayScoreReport) -> String {
    let mut lines = vec![format!(
        "Day Score ({} active tasks, criteria {}%)",
        report.active_tasks, report.criteria
    )];
    lines.push(row(
        "Today",
        &format!(
            "{}%{}",
            report.today_percentage,
            if report.today_is_non_zero { " (non-zero)" } else { "" }
        ),
    ));
    lines.extend(streak_rows(&report.streaks));
    lines.push(row("Resilience", &format::resilience(report.resilience_index)));
    lines.extend(rate_rows(&report.completion_rates));
    lines.join("\n")
}

fn streak_rows(streaks: &StreakSummary) -> Vec<String> {
    vec![
        row("Current streak", &format::streak(streaks.current_streak)),
        row("Longest streak", &format::streak(streaks.longest_streak)),
        row("Non-zero days", &streaks.total_non_zero_days.to_string()),
        row("Comebacks", &streaks.comeback_count.to_string()),
        row("Days returned", &streaks.days_returned_after_miss.to_string()),
        row("Recovery ratio", &format::percentage(streaks.recovery_ratio)),
    ]
}

fn rate_rows(rates: &[WindowRate]) -> Vec<String> {
    rates
        .iter()
        .map(|r| row(&format!("Last {} days", r.days), &format::percentage(r.rate)))
        .collect()
}

fn row(label: &str, value: &str) -> String {
    format!("  {:<16}{value}", format!("{label}:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_aligned() {
        assert_eq!(row("Comebacks", "2"), "  Comebacks:      2");
        assert_eq!(row("Recovery ratio", "40%"), "  Recovery ratio: 40%");
    }
}
