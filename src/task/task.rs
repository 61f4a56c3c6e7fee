//! Core task type: a tagged union over plain, deadline, and time-range tasks.
//!
//! # Invariants
//! - `description` is non-empty (after trimming) once construction succeeds
//! - `done` changes only through [`Task::mark_done`] / [`Task::mark_undone`]
//! - timestamps are parsed before the task exists; no half-valid task is
//!   ever constructed

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::datetime;
use crate::error::TrackerError;

/// Variant payload of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    /// No schedule, just a description and a done flag.
    Plain,
    /// A single due timestamp.
    Deadline { due_at: NaiveDateTime },
    /// A start and an end timestamp.
    ///
    /// `start_at <= end_at` is deliberately not enforced; ranges are stored
    /// exactly as given.
    TimeRange {
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
    },
}

/// Variant name without payload, used for storage tags and type filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindTag {
    Plain,
    Deadline,
    TimeRange,
}

impl KindTag {
    /// Single-letter tag used in the storage file and display brackets.
    pub fn storage_tag(self) -> &'static str {
        match self {
            KindTag::Plain => "T",
            KindTag::Deadline => "D",
            KindTag::TimeRange => "E",
        }
    }

    pub fn from_storage_tag(tag: &str) -> Option<Self> {
        match tag {
            "T" => Some(KindTag::Plain),
            "D" => Some(KindTag::Deadline),
            "E" => Some(KindTag::TimeRange),
            _ => None,
        }
    }

    /// Command-grammar name of the variant (`sort todo 1`, `sort event 2`).
    pub fn from_command_token(token: &str) -> Option<Self> {
        match token {
            "todo" => Some(KindTag::Plain),
            "deadline" => Some(KindTag::Deadline),
            "event" => Some(KindTag::TimeRange),
            _ => None,
        }
    }

    /// Inverse of [`KindTag::from_command_token`], used in rendered headers.
    pub fn command_token(self) -> &'static str {
        match self {
            KindTag::Plain => "todo",
            KindTag::Deadline => "deadline",
            KindTag::TimeRange => "event",
        }
    }
}

/// A single tracked task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    description: String,
    done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

impl Task {
    fn new(description: &str, kind: TaskKind) -> Result<Self, TrackerError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TrackerError::EmptyDescription);
        }
        Ok(Self {
            description: description.to_string(),
            done: false,
            kind,
        })
    }

    /// Create a plain task.
    ///
    /// # Errors
    /// [`TrackerError::EmptyDescription`] if the description is blank.
    pub fn new_plain(description: &str) -> Result<Self, TrackerError> {
        Self::new(description, TaskKind::Plain)
    }

    /// Create a deadline task from a user-supplied date string.
    ///
    /// # Errors
    /// [`TrackerError::EmptyDescription`] on a blank description,
    /// [`TrackerError::DateParse`] when the date matches no accepted format.
    pub fn new_deadline(description: &str, due_text: &str) -> Result<Self, TrackerError> {
        let due_at = datetime::parse_flexible(due_text)?;
        Self::new(description, TaskKind::Deadline { due_at })
    }

    /// Create a time-range task from user-supplied start and end strings.
    ///
    /// The range is not validated; an end before the start is stored as-is.
    ///
    /// # Errors
    /// Same as [`Task::new_deadline`]; either date failing aborts
    /// construction.
    pub fn new_time_range(
        description: &str,
        start_text: &str,
        end_text: &str,
    ) -> Result<Self, TrackerError> {
        let start_at = datetime::parse_flexible(start_text)?;
        let end_at = datetime::parse_flexible(end_text)?;
        Self::new(description, TaskKind::TimeRange { start_at, end_at })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn kind_tag(&self) -> KindTag {
        match self.kind {
            TaskKind::Plain => KindTag::Plain,
            TaskKind::Deadline { .. } => KindTag::Deadline,
            TaskKind::TimeRange { .. } => KindTag::TimeRange,
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// Timestamp used by the sort comparator.
    ///
    /// Deadlines sort by their due time, time ranges by their start time,
    /// plain tasks carry no timestamp and order after all dated tasks.
    pub fn timestamp_for_sort(&self) -> Option<NaiveDateTime> {
        match self.kind {
            TaskKind::Plain => None,
            TaskKind::Deadline { due_at } => Some(due_at),
            TaskKind::TimeRange { start_at, .. } => Some(start_at),
        }
    }

    /// Variant-specific storage fields, in record order.
    pub fn extra_storage_fields(&self) -> Vec<String> {
        match self.kind {
            TaskKind::Plain => Vec::new(),
            TaskKind::Deadline { due_at } => vec![datetime::format_storage(due_at)],
            TaskKind::TimeRange { start_at, end_at } => vec![
                datetime::format_storage(start_at),
                datetime::format_storage(end_at),
            ],
        }
    }

    /// Status icon: `[X]` when done, `[ ]` otherwise.
    pub fn status_icon(&self) -> &'static str {
        if self.done {
            "[X]"
        } else {
            "[ ]"
        }
    }

    /// Encode this task as one storage line.
    ///
    /// Descriptions containing the ` | ` delimiter are not escaped; the
    /// record format inherits that limitation.
    pub fn to_storage_line(&self) -> String {
        let mut line = format!(
            "{} | {} | {}",
            self.kind_tag().storage_tag(),
            if self.done { "1" } else { "0" },
            self.description
        );
        for field in self.extra_storage_fields() {
            line.push_str(" | ");
            line.push_str(&field);
        }
        line
    }

    /// Decode one storage line back into a task. Exact inverse of
    /// [`Task::to_storage_line`].
    ///
    /// # Errors
    /// [`TrackerError::CorruptRecord`] on a wrong shape or unknown tag,
    /// [`TrackerError::DateParse`] on an unreadable stored timestamp.
    pub fn from_storage_line(line: &str) -> Result<Self, TrackerError> {
        let corrupt = |reason: &str| TrackerError::CorruptRecord {
            record: line.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = line.split(" | ").collect();
        if parts.len() < 3 {
            return Err(corrupt("expected at least 3 pipe-delimited fields"));
        }

        let tag = KindTag::from_storage_tag(parts[0])
            .ok_or_else(|| corrupt("unknown task type tag"))?;
        let mut task = match tag {
            KindTag::Plain => Task::new_plain(parts[2])?,
            KindTag::Deadline => {
                if parts.len() < 4 {
                    return Err(corrupt("deadline record is missing its date field"));
                }
                Task::new_deadline(parts[2], parts[3])?
            }
            KindTag::TimeRange => {
                if parts.len() < 5 {
                    return Err(corrupt("event record needs start and end date fields"));
                }
                Task::new_time_range(parts[2], parts[3], parts[4])?
            }
        };

        if parts[1] == "1" {
            task.mark_done();
        }
        Ok(task)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]{} {}",
            self.kind_tag().storage_tag(),
            self.status_icon(),
            self.description
        )?;
        match self.kind {
            TaskKind::Plain => Ok(()),
            TaskKind::Deadline { due_at } => {
                write!(f, " (by: {})", datetime::format_display(due_at))
            }
            TaskKind::TimeRange { start_at, end_at } => write!(
                f,
                " (from: {} to: {})",
                datetime::format_display(start_at),
                datetime::format_display(end_at)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_task_starts_undone() {
        let task = Task::new_plain("read book").unwrap();
        assert_eq!(task.description(), "read book");
        assert!(!task.is_done());
        assert_eq!(task.kind_tag(), KindTag::Plain);
    }

    #[test]
    fn blank_description_is_rejected() {
        assert!(matches!(
            Task::new_plain("   "),
            Err(TrackerError::EmptyDescription)
        ));
        assert!(matches!(
            Task::new_deadline("  ", "2024-02-13"),
            Err(TrackerError::EmptyDescription)
        ));
    }

    #[test]
    fn description_is_trimmed() {
        let task = Task::new_plain("  read book  ").unwrap();
        assert_eq!(task.description(), "read book");
    }

    #[test]
    fn bad_date_fails_before_the_task_exists() {
        assert!(matches!(
            Task::new_deadline("return book", "someday"),
            Err(TrackerError::DateParse { .. })
        ));
    }

    #[test]
    fn mark_and_unmark_are_idempotent() {
        let mut task = Task::new_plain("run").unwrap();
        task.mark_done();
        task.mark_done();
        assert!(task.is_done());
        task.mark_undone();
        task.mark_undone();
        assert!(!task.is_done());
    }

    #[test]
    fn display_matches_the_bracket_format() {
        let mut plain = Task::new_plain("read book").unwrap();
        assert_eq!(plain.to_string(), "[T][ ] read book");
        plain.mark_done();
        assert_eq!(plain.to_string(), "[T][X] read book");

        let deadline = Task::new_deadline("return book", "2/12/2019 1800").unwrap();
        assert_eq!(
            deadline.to_string(),
            "[D][ ] return book (by: Dec 2 2019, 6:00 PM)"
        );

        let event =
            Task::new_time_range("meeting", "2025-03-01 10:00", "2025-03-01 12:00").unwrap();
        assert_eq!(
            event.to_string(),
            "[E][ ] meeting (from: Mar 1 2025, 10:00 AM to: Mar 1 2025, 12:00 PM)"
        );
    }

    #[test]
    fn storage_lines_use_the_canonical_pattern() {
        let mut deadline = Task::new_deadline("return book", "2/12/2019 1800").unwrap();
        deadline.mark_done();
        assert_eq!(
            deadline.to_storage_line(),
            "D | 1 | return book | 2019-12-02 18:00"
        );

        let event =
            Task::new_time_range("meeting", "2025-03-01 10:00", "2025-03-01 12:00").unwrap();
        assert_eq!(
            event.to_storage_line(),
            "E | 0 | meeting | 2025-03-01 10:00 | 2025-03-01 12:00"
        );

        let plain = Task::new_plain("read book").unwrap();
        assert_eq!(plain.to_storage_line(), "T | 0 | read book");
    }

    #[test]
    fn storage_line_round_trips() {
        let mut original =
            Task::new_time_range("meeting", "2025-03-01 10:00", "2025-03-01 12:00").unwrap();
        original.mark_done();
        let decoded = Task::from_storage_line(&original.to_storage_line()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn decoding_honours_the_done_flag() {
        let done = Task::from_storage_line("T | 1 | read book").unwrap();
        assert!(done.is_done());
        let undone = Task::from_storage_line("T | 0 | read book").unwrap();
        assert!(!undone.is_done());
    }

    #[test]
    fn corrupt_records_are_rejected() {
        assert!(matches!(
            Task::from_storage_line("T | 1"),
            Err(TrackerError::CorruptRecord { .. })
        ));
        assert!(matches!(
            Task::from_storage_line("Q | 0 | mystery"),
            Err(TrackerError::CorruptRecord { .. })
        ));
        assert!(matches!(
            Task::from_storage_line("D | 0 | return book"),
            Err(TrackerError::CorruptRecord { .. })
        ));
        assert!(matches!(
            Task::from_storage_line("D | 0 | return book | gibberish"),
            Err(TrackerError::DateParse { .. })
        ));
        assert!(matches!(
            Task::from_storage_line("E | 0 | meeting | 2025-03-01 10:00"),
            Err(TrackerError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn sort_timestamp_follows_the_variant() {
        let plain = Task::new_plain("z").unwrap();
        assert_eq!(plain.timestamp_for_sort(), None);

        let deadline = Task::new_deadline("a", "2025-01-02").unwrap();
        assert!(deadline.timestamp_for_sort().is_some());

        let event = Task::new_time_range("e", "2025-03-01 10:00", "2025-03-01 12:00").unwrap();
        assert_eq!(
            event.timestamp_for_sort(),
            Some(
                chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn time_range_permits_end_before_start() {
        let task = Task::new_time_range("odd", "2025-03-02 10:00", "2025-03-01 10:00");
        assert!(task.is_ok());
    }
}
