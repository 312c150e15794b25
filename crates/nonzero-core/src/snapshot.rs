//! Read-only view of the task store.
//!
//! The analytics take a [`TaskProvider`] instead of reaching for a global
//! store. [`Snapshot`] is the in-memory provider, loadable from a JSON file
//! exported by whatever store the caller uses.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

use crate::error::{Result, SnapshotError};
use crate::task::Task;

/// Supplies tasks (with their entries) to the analytics.
pub trait TaskProvider {
    /// Tasks ordered by `sort_order`, then creation day. Archived tasks are
    /// included only when asked for.
    fn tasks(&self, include_archived: bool) -> Vec<&Task>;

    fn task_by_id(&self, id: Uuid) -> Option<&Task> {
        self.tasks(true).into_iter().find(|t| t.id == id)
    }

    /// Case-insensitive lookup by name; the first match in task order wins.
    fn task_by_name(&self, name: &str) -> Option<&Task> {
        self.tasks(true)
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// An immutable set of tasks captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    tasks: Vec<Task>,
}

impl Snapshot {
    /// Build a snapshot, rejecting duplicate task ids.
    ///
    /// # Errors
    /// Returns [`SnapshotError::DuplicateTask`] if two tasks share an id.
    pub fn new(tasks: Vec<Task>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(SnapshotError::DuplicateTask(task.id).into());
            }
        }
        Ok(Self { tasks })
    }

    /// Parse a snapshot from JSON.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed, a task fails validation,
    /// or two tasks share an id.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Snapshot = serde_json::from_str(json).map_err(SnapshotError::ParseFailed)?;
        let snapshot = Self::new(raw.tasks)?;
        tracing::debug!(tasks = snapshot.tasks.len(), "snapshot parsed");
        Ok(snapshot)
    }

    /// Read a snapshot file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            tracing::warn!(path = %path.display(), "snapshot unreadable");
            SnapshotError::ReadFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json_str(&content)
    }

    /// Serialize as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

impl TaskProvider for Snapshot {
    fn tasks(&self, include_archived: bool) -> Vec<&Task> {
        self.tasks.as_slice().tasks(include_archived)
    }
}

impl TaskProvider for [Task] {
    fn tasks(&self, include_archived: bool) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .iter()
            .filter(|t| include_archived || !t.is_archived)
            .collect();
        tasks.sort_by_key(|t| (t.sort_order, t.created_on));
        tasks
    }
}
