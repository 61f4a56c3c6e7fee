//! Line-oriented storage codec.
//!
//! Persists the whole task list to a plain-text file, one `|`-delimited
//! record per task, and reads it back at startup. The write replaces the
//! file in full on every save and is not transactional: a failure mid-write
//! can leave a partially written file behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrackerError;
use crate::task::Task;

/// File-backed store for the task list.
///
/// Holds only the target path; the task collection is handed in for each
/// save and never retained.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

/// A storage line that failed to decode and was skipped during load.
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number in the storage file.
    pub number: usize,
    pub error: TrackerError,
}

/// Result of one load pass over the storage file.
///
/// Malformed lines are skipped and reported here rather than aborting the
/// load; a file-level read failure yields an empty task list plus
/// `read_error`.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    pub skipped: Vec<SkippedLine>,
    pub read_error: Option<TrackerError>,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the storage file with one record per task, in list order.
    ///
    /// Creates the parent directory first if it is missing.
    ///
    /// # Errors
    /// [`TrackerError::StorageWrite`] on any filesystem failure.
    pub fn save(&self, tasks: &[Task]) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|source| TrackerError::StorageWrite { source })?;
            }
        }

        let mut contents = String::new();
        for task in tasks {
            contents.push_str(&task.to_storage_line());
            contents.push('\n');
        }

        fs::write(&self.path, contents).map_err(|source| TrackerError::StorageWrite { source })?;
        tracing::debug!("Saved {} task(s) to {}", tasks.len(), self.path.display());
        Ok(())
    }

    /// Read the storage file back into tasks.
    ///
    /// A missing file is not an error and yields an empty report. Blank
    /// lines are ignored; lines that fail to decode are skipped, logged,
    /// and listed in the report so the caller can surface them once.
    pub fn load(&self) -> LoadReport {
        if !self.path.exists() {
            tracing::debug!("No task file at {}, starting empty", self.path.display());
            return LoadReport::default();
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) => {
                tracing::warn!("Failed to read task file {}: {}", self.path.display(), source);
                return LoadReport {
                    read_error: Some(TrackerError::StorageRead { source }),
                    ..LoadReport::default()
                };
            }
        };

        let mut report = LoadReport::default();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Task::from_storage_line(line) {
                Ok(task) => report.tasks.push(task),
                Err(error) => {
                    tracing::warn!(
                        "Skipping malformed record at line {} of {}: {}",
                        index + 1,
                        self.path.display(),
                        error
                    );
                    report.skipped.push(SkippedLine {
                        number: index + 1,
                        error,
                    });
                }
            }
        }
        tracing::debug!(
            "Loaded {} task(s) from {} ({} skipped)",
            report.tasks.len(),
            self.path.display(),
            report.skipped.len()
        );
        report
    }
}
