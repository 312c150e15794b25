//! Comeback nudges for tasks that have lapsed.
//!
//! Nothing is suggested for a task that is done today, was done yesterday,
//! or has not had a chance to be missed yet.

use serde::{Deserialize, Serialize};

use crate::calendar::{previous_day, Day};
use crate::stats::TaskStats;
use crate::task::{Task, TaskType};

/// An encouragement message for a lapsed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub task: String,
    pub missed_days: u32,
    pub message: String,
}

const PERFECT: &str = "You don't need perfect. Just one non-zero today.";
const TWO_DAYS: &str = "Two quiet days. Let's move again.";
const YESTERDAY_ZERO: &str = "Yesterday was zero. Today doesn't have to be.";

/// Suggest a comeback message for `task` as of `today`.
pub fn suggestion(task: &Task, today: Day) -> Option<Suggestion> {
    if task.is_completed_on(today) {
        return None;
    }

    let yesterday = previous_day(today);
    if task.is_completed_on(yesterday) {
        return None;
    }

    let missed_days = TaskStats::new(task, today).missed_days_before_today();
    if missed_days == 0 {
        return None;
    }

    // Logged something yesterday, just not enough.
    let fell_short = task.entry_for(yesterday).is_some_and(|e| e.value() > 0.0);

    let message = match (task.task_type, missed_days) {
        (_, 6..) => PERFECT.to_string(),
        (_, 3..=5) => format!(
            "{} days paused. No worries. Just start small.",
            spelled(missed_days)
        ),
        (_, 2) => TWO_DAYS.to_string(),
        (TaskType::Boolean, _) => YESTERDAY_ZERO.to_string(),
        (TaskType::Count, _) if fell_short => format!(
            "Almost there yesterday! Try {} today?",
            task.minimum_value() as i64
        ),
        (TaskType::Time, _) if fell_short => {
            format!("Almost there! Try {}m today?", task.minimum_value() as i64)
        }
        (TaskType::Count | TaskType::Time, _) => YESTERDAY_ZERO.to_string(),
    };

    tracing::debug!(task = %task.name, missed_days, "comeback suggestion");
    Some(Suggestion {
        task: task.name.clone(),
        missed_days,
        message,
    })
}

fn spelled(n: u32) -> &'static str {
    match n {
        3 => "Three",
        4 => "Four",
        _ => "Five",
    }
}
