//! Short human-readable renderings of values and metrics.

use crate::task::{Task, TaskType};

/// Shown for a metric that is undefined, such as a resilience index with no
/// comebacks yet.
pub const UNDEFINED: &str = "—";

/// `45m`, `1h`, `1h 5m`.
pub fn minutes(total: i64) -> String {
    if total < 60 {
        return format!("{total}m");
    }
    let (hours, rest) = (total / 60, total % 60);
    if rest > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{hours}h")
    }
}

/// A logged value in the task's own terms.
pub fn value(value: f64, task_type: TaskType, unit: Option<&str>) -> String {
    match task_type {
        TaskType::Boolean => if value >= 1.0 { "Yes" } else { "No" }.to_string(),
        TaskType::Count => {
            let count = value as i64;
            match unit {
                Some(unit) => format!("{count} {}", unit.to_lowercase()),
                None => count.to_string(),
            }
        }
        TaskType::Time => minutes(value as i64),
    }
}

pub fn task_value(task: &Task, v: f64) -> String {
    value(v, task.task_type, task.unit.as_deref())
}

/// `No streak`, `1 day`, `12 days`.
pub fn streak(days: u32) -> String {
    match days {
        0 => "No streak".to_string(),
        1 => "1 day".to_string(),
        n => format!("{n} days"),
    }
}

/// A 0.0-1.0 fraction as a whole percentage.
pub fn percentage(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// A resilience index as a percentage, or [`UNDEFINED`].
pub fn resilience(index: Option<f64>) -> String {
    index.map_or_else(|| UNDEFINED.to_string(), percentage)
}
