//! Per-invocation state shared by the commands: config, the snapshot
//! source, and which day counts as today.

use std::path::PathBuf;

use nonzero_core::{
    Clock, Config, CoreError, Day, FixedClock, Snapshot, SnapshotError, SystemClock,
};

pub struct Context {
    pub config: Config,
    pub json: bool,
    snapshot: Option<PathBuf>,
    today: Option<Day>,
}

impl Context {
    /// Read the config file, failing if it cannot be parsed or is out of range.
    pub fn load(
        snapshot: Option<PathBuf>,
        today: Option<Day>,
        json: bool,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            config: Config::load()?,
            json,
            snapshot,
            today,
        })
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(day) => Box::new(FixedClock(day)),
            None => Box::new(SystemClock),
        }
    }

    pub fn today(&self) -> Day {
        self.clock().today()
    }

    /// `--snapshot` if given, else the configured `snapshot.path`.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot
            .clone()
            .or_else(|| self.config.snapshot.path.as_ref().map(PathBuf::from))
    }

    pub fn load_snapshot(&self) -> Result<Snapshot, CoreError> {
        let path = self.snapshot_path().ok_or(SnapshotError::NoPath)?;
        tracing::debug!(path = %path.display(), "loading snapshot");
        Snapshot::load(&path)
    }

    /// Print `value` as pretty JSON, or `text` when JSON was not requested.
    pub fn emit<T: serde::Serialize>(
        &self,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}
