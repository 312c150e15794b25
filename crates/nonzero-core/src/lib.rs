//! # NonZero Core Library
//!
//! Core logic for the NonZero habit tracker: the task and entry model and
//! the streak and resilience analytics computed from it. The CLI (and any
//! other front end) is a thin layer that loads a snapshot of tasks, picks a
//! "today", and renders what this crate computes.
//!
//! ## Architecture
//!
//! - **Calendar**: day-granularity helpers; all analytics work on calendar
//!   days, never raw timestamps
//! - **Task model**: habits with at most one entry per calendar day
//! - **Stats**: current/longest streaks, comebacks, recovery ratio,
//!   resilience index, completion rates, and the cross-task Day Score
//! - **Storage**: TOML configuration (Day Score criteria, snapshot path)
//!
//! Every calculation is a pure function of a snapshot and a day. Nothing is
//! cached between calls, and no global state is read.
//!
//! ## Key Components
//!
//! - [`Task`] / [`Entry`]: the data model
//! - [`TaskProvider`] / [`Snapshot`]: read-only access to tasks
//! - [`TaskStats`]: per-task metrics
//! - [`DayScoreAggregator`]: aggregate metrics across active tasks
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod coaching;
pub mod error;
pub mod format;
pub mod snapshot;
pub mod stats;
pub mod storage;
pub mod task;

pub use calendar::{Clock, Day, FixedClock, SystemClock};
pub use coaching::{suggestion, Suggestion};
pub use error::{ConfigError, CoreError, SnapshotError, ValidationError};
pub use snapshot::{Snapshot, TaskProvider};
pub use stats::{
    DayScore, DayScoreAggregator, DayScoreReport, DaySeries, StreakSummary, TaskReport, TaskStats,
};
pub use storage::Config;
pub use task::{Entry, Task, TaskType};
