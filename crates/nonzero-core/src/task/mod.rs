//! Habit definitions and their daily entries.
//!
//! A [`Task`] owns its [`Entry`] list, kept sorted by day with at most one
//! entry per calendar day. Entries point back at their task by id only.

mod entry;

pub use entry::Entry;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::calendar::Day;
use crate::error::ValidationError;

/// How a task's value is logged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Done or not done; stored as 0/1
    #[default]
    #[serde(alias = "Yes/No")]
    Boolean,
    /// A whole-number count (pages, cups, pushups)
    #[serde(alias = "Count")]
    Count,
    /// Minutes spent
    #[serde(alias = "duration", alias = "timer", alias = "Duration", alias = "Timer")]
    Time,
}

impl TaskType {
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskType::Boolean => "Yes/No",
            TaskType::Count => "Count",
            TaskType::Time => "Time",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A habit definition together with its logged entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub task_type: TaskType,
    /// Threshold a day's value must reach to count as non-zero.
    minimum_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_value: Option<f64>,
    /// Unit label for count tasks ("pages", "cups").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub created_on: Day,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub sort_order: i32,
    entries: Vec<Entry>,
}

impl Task {
    /// Create a task with no entries.
    ///
    /// # Errors
    /// Returns [`ValidationError::NegativeMinimum`] if `minimum_value < 0`.
    pub fn new(
        name: impl Into<String>,
        task_type: TaskType,
        minimum_value: f64,
        created_on: Day,
    ) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), name, task_type, minimum_value, created_on)
    }

    /// Create a task with a caller-chosen id.
    ///
    /// # Errors
    /// Returns [`ValidationError::NegativeMinimum`] if `minimum_value < 0`.
    pub fn with_id(
        id: Uuid,
        name: impl Into<String>,
        task_type: TaskType,
        minimum_value: f64,
        created_on: Day,
    ) -> Result<Self, ValidationError> {
        check_minimum(minimum_value)?;
        Ok(Self {
            id,
            name: name.into(),
            task_type,
            minimum_value,
            goal_value: None,
            unit: None,
            icon: None,
            created_on,
            is_archived: false,
            sort_order: 0,
            entries: Vec::new(),
        })
    }

    pub fn with_goal(mut self, goal: f64) -> Self {
        self.goal_value = Some(goal);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn archived(mut self, is_archived: bool) -> Self {
        self.is_archived = is_archived;
        self
    }

    pub fn minimum_value(&self) -> f64 {
        self.minimum_value
    }

    /// Change the non-zero threshold. Existing entries are re-evaluated
    /// against the new threshold on the next query.
    ///
    /// # Errors
    /// Returns [`ValidationError::NegativeMinimum`] if `minimum_value < 0`.
    pub fn set_minimum_value(&mut self, minimum_value: f64) -> Result<(), ValidationError> {
        check_minimum(minimum_value)?;
        self.minimum_value = minimum_value;
        Ok(())
    }

    /// Whether `value` reaches this task's minimum.
    pub fn meets_minimum(&self, value: f64) -> bool {
        value >= self.minimum_value
    }

    /// Whether an entry counts as a non-zero day for this task.
    pub fn is_non_zero(&self, entry: &Entry) -> bool {
        self.meets_minimum(entry.value())
    }

    /// All entries, ascending by day.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The entry logged on `day`, if any.
    pub fn entry_for(&self, day: Day) -> Option<&Entry> {
        self.entries
            .binary_search_by_key(&day, Entry::date)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Whether `day` has an entry that meets the minimum.
    pub fn is_completed_on(&self, day: Day) -> bool {
        self.entry_for(day).is_some_and(|e| self.is_non_zero(e))
    }

    /// Entries with `start <= day <= end`, ascending.
    pub fn entries_between(&self, start: Day, end: Day) -> &[Entry] {
        if start > end {
            return &[];
        }
        let lo = self.entries.partition_point(|e| e.date() < start);
        let hi = self.entries.partition_point(|e| e.date() <= end);
        &self.entries[lo..hi]
    }

    /// Days on which this task was non-zero, ascending.
    pub fn non_zero_days(&self) -> impl Iterator<Item = Day> + '_ {
        self.entries
            .iter()
            .filter(|e| self.is_non_zero(e))
            .map(Entry::date)
    }

    /// Add a new entry.
    ///
    /// # Errors
    /// Rejects entries for another task, negative values, and a second entry
    /// for a day that already has one.
    pub fn add_entry(&mut self, entry: Entry) -> Result<(), ValidationError> {
        if entry.task_id() != self.id {
            return Err(ValidationError::ForeignEntry {
                task: self.id,
                entry_task: entry.task_id(),
            });
        }
        check_value(entry.value())?;

        match self.entries.binary_search_by_key(&entry.date(), Entry::date) {
            Ok(_) => Err(ValidationError::DuplicateDay {
                task: self.name.clone(),
                day: entry.date(),
            }),
            Err(idx) => {
                self.entries.insert(idx, entry);
                Ok(())
            }
        }
    }

    /// Log `value` for `day`, replacing the value and note of an existing
    /// entry or creating a new one.
    ///
    /// # Errors
    /// Returns [`ValidationError::NegativeValue`] if `value < 0`.
    pub fn upsert_entry(
        &mut self,
        day: Day,
        value: f64,
        note: Option<String>,
    ) -> Result<&Entry, ValidationError> {
        check_value(value)?;

        let idx = match self.entries.binary_search_by_key(&day, Entry::date) {
            Ok(idx) => {
                self.entries[idx].update(value, note);
                idx
            }
            Err(idx) => {
                let mut entry = Entry::new(self.id, day, value);
                entry.update(value, note);
                self.entries.insert(idx, entry);
                idx
            }
        };
        Ok(&self.entries[idx])
    }

    /// Remove and return the entry for `day`.
    pub fn remove_entry(&mut self, day: Day) -> Option<Entry> {
        self.entries
            .binary_search_by_key(&day, Entry::date)
            .ok()
            .map(|idx| self.entries.remove(idx))
    }
}

fn check_minimum(minimum_value: f64) -> Result<(), ValidationError> {
    // NaN fails this comparison too.
    if minimum_value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NegativeMinimum(minimum_value))
    }
}

fn check_value(value: f64) -> Result<(), ValidationError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NegativeValue(value))
    }
}

/// Wire shape of a task as stored in a snapshot file.
///
/// Ids and entry metadata may be omitted; entries may be unsorted.
#[derive(Deserialize)]
struct TaskRecord {
    #[serde(default)]
    id: Option<Uuid>,
    name: String,
    task_type: TaskType,
    minimum_value: f64,
    #[serde(default)]
    goal_value: Option<f64>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    created_on: Day,
    #[serde(default)]
    is_archived: bool,
    #[serde(default)]
    sort_order: i32,
    #[serde(default)]
    entries: Vec<EntryRecord>,
}

#[derive(Deserialize)]
struct EntryRecord {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    task_id: Option<Uuid>,
    date: Day,
    value: f64,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = ValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let id = record.id.unwrap_or_else(Uuid::new_v4);
        let mut task = Task::with_id(
            id,
            record.name,
            record.task_type,
            record.minimum_value,
            record.created_on,
        )?;
        task.goal_value = record.goal_value;
        task.unit = record.unit;
        task.icon = record.icon;
        task.is_archived = record.is_archived;
        task.sort_order = record.sort_order;

        for raw in record.entries {
            let mut entry = Entry::new(raw.task_id.unwrap_or(id), raw.date, raw.value)
                .with_identity(
                    raw.id.unwrap_or_else(Uuid::new_v4),
                    raw.created_at.unwrap_or_else(Utc::now),
                );
            if let Some(note) = raw.note {
                entry = entry.with_note(note);
            }
            task.add_entry(entry)?;
        }
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> Day {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn pushups() -> Task {
        Task::new("Pushups", TaskType::Count, 5.0, day(1)).unwrap()
    }

    #[test]
    fn negative_minimum_is_rejected() {
        let err = Task::new("Bad", TaskType::Count, -1.0, day(1)).unwrap_err();
        assert_eq!(err, ValidationError::NegativeMinimum(-1.0));
        assert!(Task::new("Nan", TaskType::Count, f64::NAN, day(1)).is_err());
    }

    #[test]
    fn entries_stay_sorted_and_are_found_by_day() {
        let mut task = pushups();
        for d in [5, 2, 9] {
            task.add_entry(Entry::new(task.id, day(d), 10.0)).unwrap();
        }

        let days: Vec<Day> = task.entries().iter().map(Entry::date).collect();
        assert_eq!(days, vec![day(2), day(5), day(9)]);
        assert_eq!(task.entry_for(day(5)).map(Entry::value), Some(10.0));
        assert!(task.entry_for(day(6)).is_none());
    }

    #[test]
    fn duplicate_day_is_rejected() {
        let mut task = pushups();
        task.add_entry(Entry::new(task.id, day(3), 10.0)).unwrap();
        let err = task.add_entry(Entry::new(task.id, day(3), 12.0)).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateDay { .. }));
        assert_eq!(task.entries().len(), 1);
    }

    #[test]
    fn foreign_and_negative_entries_are_rejected() {
        let mut task = pushups();
        let foreign = Entry::new(Uuid::new_v4(), day(3), 10.0);
        assert!(matches!(
            task.add_entry(foreign),
            Err(ValidationError::ForeignEntry { .. })
        ));
        assert_eq!(
            task.add_entry(Entry::new(task.id, day(3), -2.0)),
            Err(ValidationError::NegativeValue(-2.0))
        );
    }

    #[test]
    fn non_zero_uses_minimum_inclusively() {
        let mut task = pushups();
        task.add_entry(Entry::new(task.id, day(1), 5.0)).unwrap();
        task.add_entry(Entry::new(task.id, day(2), 4.0)).unwrap();

        assert!(task.is_completed_on(day(1)));
        assert!(!task.is_completed_on(day(2)));
        assert!(!task.is_completed_on(day(3)));
        assert_eq!(task.non_zero_days().collect::<Vec<_>>(), vec![day(1)]);
    }

    #[test]
    fn raising_minimum_reclassifies_existing_entries() {
        let mut task = pushups();
        task.add_entry(Entry::new(task.id, day(1), 6.0)).unwrap();
        task.set_minimum_value(8.0).unwrap();
        assert!(!task.is_completed_on(day(1)));
        assert!(task.set_minimum_value(-0.5).is_err());
    }

    #[test]
    fn upsert_updates_in_place() {
        let mut task = pushups();
        task.upsert_entry(day(4), 2.0, None).unwrap();
        let updated = task.upsert_entry(day(4), 7.0, Some("second set".into())).unwrap();
        assert_eq!(updated.value(), 7.0);
        assert_eq!(updated.note(), Some("second set"));
        assert_eq!(task.entries().len(), 1);
    }

    #[test]
    fn remove_and_range_queries() {
        let mut task = pushups();
        for d in 1..=6 {
            task.upsert_entry(day(d), d as f64, None).unwrap();
        }
        assert_eq!(task.entries_between(day(2), day(4)).len(), 3);
        assert!(task.entries_between(day(4), day(2)).is_empty());

        let removed = task.remove_entry(day(3)).unwrap();
        assert_eq!(removed.value(), 3.0);
        assert!(task.remove_entry(day(3)).is_none());
        assert_eq!(task.entries_between(day(2), day(4)).len(), 2);
    }

    #[test]
    fn deserialize_validates_and_fills_ids() {
        let json = r#"{
            "name": "Read",
            "task_type": "count",
            "minimum_value": 1,
            "unit": "Pages",
            "created_on": "2024-01-01",
            "entries": [
                {"date": "2024-01-03", "value": 4},
                {"date": "2024-01-02", "value": 0, "note": "sick"}
            ]
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.entries().len(), 2);
        assert_eq!(task.entries()[0].date(), day(2));
        assert!(task.entries().iter().all(|e| e.task_id() == task.id));
        assert_eq!(task.entries()[0].note(), Some("sick"));
    }

    #[test]
    fn deserialize_rejects_duplicate_days() {
        let json = r#"{
            "name": "Read",
            "task_type": "Yes/No",
            "minimum_value": 1,
            "created_on": "2024-01-01",
            "entries": [
                {"date": "2024-01-02", "value": 1},
                {"date": "2024-01-02", "value": 0}
            ]
        }"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn deserialize_rejects_negative_entry_values() {
        let json = r#"{
            "name": "Read",
            "task_type": "count",
            "minimum_value": 1,
            "created_on": "2024-01-01",
            "entries": [{"date": "2024-01-02", "value": -3}]
        }"#;
        let err = serde_json::from_str::<Task>(json).unwrap_err();
        assert!(err.to_string().contains(">= 0"));
    }

    #[test]
    fn default_task_type_is_boolean() {
        assert_eq!(TaskType::default(), TaskType::Boolean);
    }

    #[test]
    fn legacy_type_names_map_to_time() {
        let t: TaskType = serde_json::from_str("\"Duration\"").unwrap();
        assert_eq!(t, TaskType::Time);
        let t: TaskType = serde_json::from_str("\"timer\"").unwrap();
        assert_eq!(t, TaskType::Time);
    }
}
