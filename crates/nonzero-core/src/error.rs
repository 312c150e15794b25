//! Core error types for nonzero-core.
//!
//! The analytics themselves are total and never fail; errors only arise at
//! the edges where data enters the library (snapshot files, task mutation,
//! configuration).

use std::path::PathBuf;
use thiserror::Error;

use crate::calendar::Day;

/// Core error type for nonzero-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot loading errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine where configuration lives
    #[error("Could not determine the configuration directory")]
    NoDataDir,

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Snapshot-specific errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Failed to read the snapshot file
    #[error("Failed to read snapshot from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot content could not be parsed
    #[error("Failed to parse snapshot: {0}")]
    ParseFailed(#[from] serde_json::Error),

    /// No snapshot path was given or configured
    #[error("No snapshot path given; pass --snapshot or set snapshot.path")]
    NoPath,

    /// Two tasks share an id
    #[error("Duplicate task id {0}")]
    DuplicateTask(uuid::Uuid),
}

/// Validation errors raised by the task and entry model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A task threshold below zero
    #[error("Minimum value must be >= 0, got {0}")]
    NegativeMinimum(f64),

    /// A logged value below zero
    #[error("Entry value must be >= 0, got {0}")]
    NegativeValue(f64),

    /// A second entry for a calendar day that already has one
    #[error("Task '{task}' already has an entry on {day}")]
    DuplicateDay { task: String, day: Day },

    /// An entry whose foreign key points at another task
    #[error("Entry for task {entry_task} cannot be added to task {task}")]
    ForeignEntry {
        task: uuid::Uuid,
        entry_task: uuid::Uuid,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
