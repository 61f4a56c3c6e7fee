//! Configuration management for the tracker.
//!
//! Configuration can be set via environment variables:
//! - `TASKPAD_DATA_FILE` - Optional. Path of the task storage file.
//!   Defaults to `data/tasks.txt`.

use std::path::PathBuf;

/// Default location of the task storage file, relative to the working
/// directory.
pub const DEFAULT_DATA_FILE: &str = "data/tasks.txt";

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage file holding the task list
    pub data_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        let data_file = std::env::var("TASKPAD_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));
        Self { data_file }
    }

    /// Create a config pointing at a specific file (useful for testing).
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }
}
