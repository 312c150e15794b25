//! A single day's log for a task.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::calendar::{start_of_day, Day};

/// One logged value for one task on one calendar day.
///
/// The owning task is referenced by id only. The day is fixed at
/// construction; a task never holds two entries for the same day. Entries
/// are only deserialized as part of their task, which validates them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    id: Uuid,
    task_id: Uuid,
    date: Day,
    /// Boolean tasks store 0/1, count tasks a whole number, time tasks minutes.
    value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl Entry {
    /// Create an entry for an already-normalized day.
    pub fn new(task_id: Uuid, date: Day, value: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            date,
            value,
            note: None,
            created_at: Utc::now(),
        }
    }

    /// Create an entry from a raw timestamp, normalizing it to its calendar day.
    pub fn logged_at<Tz: TimeZone>(task_id: Uuid, timestamp: &DateTime<Tz>, value: f64) -> Self {
        Self::new(task_id, start_of_day(timestamp), value)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub(crate) fn with_identity(mut self, id: Uuid, created_at: DateTime<Utc>) -> Self {
        self.id = id;
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn task_id(&self) -> Uuid {
        self.task_id
    }

    pub fn date(&self) -> Day {
        self.date
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn update(&mut self, value: f64, note: Option<String>) {
        self.value = value;
        self.note = note;
    }
}
