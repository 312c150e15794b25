//! Streak and resilience analytics.
//!
//! Every metric reduces to a [`DaySeries`]: a set of non-zero calendar days
//! plus a walk boundary. Per-task metrics build the series from one task's
//! entries; the [`DayScore`] builds it from all active tasks. The same
//! streak, comeback, and resilience code then runs over either.

mod completion;
mod day_score;
mod resilience;
mod series;
mod streak;
mod task_stats;

pub use completion::{
    average_value, completion_rate, completion_rates, window_days, DayCell, Window, WindowRate,
    STANDARD_WINDOWS,
};

pub use day_score::{DayScore, DayScoreAggregator, DayScoreReport, DEFAULT_DAY_SCORE_CRITERIA};

pub use resilience::{
    comeback_score, recency_weight, ComebackEvent, ResilienceCalculator, HALF_LIFE_DAYS,
    RECENCY_DECAY_BASE, SEVERITY_DECAY,
};

pub use series::{DaySeries, Walk, WalkStep};

pub use streak::{StreakAnalyzer, StreakSummary, MISSED_DAYS_LOOKBACK};

pub use task_stats::{TaskReport, TaskStats};
