//! Resilience index: a recency-weighted score of how quickly a habit is
//! resumed after it lapses.
//!
//! Each comeback scores `1 / (1 + (missed - 1) * 0.5)`, so a one-day lapse
//! scores 1.0 and longer lapses score progressively less. Scores are averaged
//! with weight `0.5 ^ (age / 30)`, giving a comeback from 30 days ago half
//! the say of one from today. No comebacks means no index.

use serde::{Deserialize, Serialize};

use super::series::DaySeries;
use crate::calendar::{day_offset, Day};

/// Days for a comeback's weight to halve.
pub const HALF_LIFE_DAYS: f64 = 30.0;

/// Base of the recency decay.
pub const RECENCY_DECAY_BASE: f64 = 0.5;

/// Score penalty per additional missed day.
pub const SEVERITY_DECAY: f64 = 0.5;

/// Score of a single comeback after `missed_days` consecutive misses.
pub fn comeback_score(missed_days: u32) -> f64 {
    let extra = missed_days.saturating_sub(1) as f64;
    1.0 / (1.0 + extra * SEVERITY_DECAY)
}

/// Weight of a comeback `age_days` before today.
pub fn recency_weight(age_days: i64) -> f64 {
    RECENCY_DECAY_BASE.powf(age_days as f64 / HALF_LIFE_DAYS)
}

/// One scored comeback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComebackEvent {
    pub day: Day,
    pub missed_days: u32,
    pub score: f64,
    pub weight: f64,
}

/// Scores the comebacks in a series as of "today".
#[derive(Debug, Clone, Copy)]
pub struct ResilienceCalculator<'a> {
    series: &'a DaySeries,
    today: Day,
}

impl<'a> ResilienceCalculator<'a> {
    pub fn new(series: &'a DaySeries, today: Day) -> Self {
        Self { series, today }
    }

    /// Every comeback from the series start through today, oldest first.
    pub fn events(&self) -> Vec<ComebackEvent> {
        self.series
            .walk(self.today)
            .filter_map(|step| {
                let missed_days = step.comeback_after?;
                Some(ComebackEvent {
                    day: step.day,
                    missed_days,
                    score: comeback_score(missed_days),
                    weight: recency_weight(day_offset(step.day, self.today)),
                })
            })
            .collect()
    }

    /// Weighted mean comeback score, or `None` when there were no comebacks.
    ///
    /// `None` is not a zero score and should be shown as "—".
    pub fn index(&self) -> Option<f64> {
        let (weighted_sum, weight_sum) = self
            .events()
            .iter()
            .fold((0.0, 0.0), |(ws, w), e| (ws + e.score * e.weight, w + e.weight));

        let index = (weight_sum > 0.0).then(|| weighted_sum / weight_sum);
        tracing::debug!(today = %self.today, ?index, "resilience index");
        index
    }
}
