mod config;

pub use config::{Config, DayScoreConfig, LoggingConfig, SnapshotConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory.
///
/// `NONZERO_CONFIG_DIR` wins when set. Otherwise `~/.config/nonzero/`, or
/// `~/.config/nonzero-dev/` when `NONZERO_ENV=dev`.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("NONZERO_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");
            let env = std::env::var("NONZERO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("nonzero-dev")
            } else {
                base_dir.join("nonzero")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
