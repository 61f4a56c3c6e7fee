//! Error taxonomy for the tracker.
//!
//! Every fallible operation in the crate reports through [`TrackerError`].
//! Validation, format, and range errors are caught at the command boundary
//! and rendered as user-facing messages; only the storage variants carry an
//! underlying IO cause.

use thiserror::Error;

use crate::task::datetime;

/// Errors raised by the task model, engine, parser, and storage codec.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A task was constructed with a blank description.
    #[error("the task description cannot be empty")]
    EmptyDescription,

    /// A date argument matched none of the accepted input formats.
    #[error(
        "cannot understand the date '{input}'; supported formats:\n{}",
        datetime::supported_formats_help()
    )]
    DateParse { input: String },

    /// A task-number argument was not an integer.
    #[error("'{input}' is not a valid task number")]
    InvalidNumber { input: String },

    /// A task position outside the current list bounds.
    #[error("no task at position {position}; the list holds {size} task(s)")]
    IndexOutOfRange { position: i64, size: usize },

    /// The first word of the input is not a known command.
    #[error("unknown command '{keyword}'")]
    UnknownCommand { keyword: String },

    /// A command was missing a required marker or argument.
    #[error("malformed {command} command; usage: {usage}")]
    MalformedCommand {
        command: &'static str,
        usage: &'static str,
    },

    /// A storage line that does not decode into a task.
    #[error("corrupt task record '{record}': {reason}")]
    CorruptRecord { record: String, reason: String },

    /// The storage file could not be read.
    #[error("failed to read the task file: {source}")]
    StorageRead {
        #[source]
        source: std::io::Error,
    },

    /// The storage file could not be written.
    #[error("failed to save the task file: {source}")]
    StorageWrite {
        #[source]
        source: std::io::Error,
    },
}
