//! Command parser: one line of user text into a validated operation.
//!
//! Stateless per call. The input is split on the first space into a keyword
//! and a remainder; each keyword validates its remainder before the engine
//! is ever touched. Validation failures are typed errors; missing or
//! unusable arguments to `find`, `date`, and `sort` are non-fatal usage
//! responses instead.

use chrono::NaiveDate;

use crate::error::TrackerError;
use crate::list::SortDirection;
use crate::task::{datetime, KindTag};

const DEADLINE_USAGE: &str = "deadline <description> /by <date>";
const EVENT_USAGE: &str = "event <description> /from <start> /to <end>";

/// Non-fatal usage responses; rendered as help text, never as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageTopic {
    /// `find` without a keyword.
    Find,
    /// `date` without an argument, or one that is not `yyyy-MM-dd`.
    Date,
    /// Bare `sort`: list the sort options.
    Sort,
    /// A sort direction other than `1` or `2`.
    SortDirection,
    /// A sort type other than `todo`, `deadline`, `event`.
    SortType,
}

/// A validated operation against the task list.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    AddPlain {
        description: String,
    },
    AddDeadline {
        description: String,
        due: String,
    },
    AddTimeRange {
        description: String,
        start: String,
        end: String,
    },
    /// Positions are the user's 1-based task numbers; the engine boundary
    /// converts and range-checks them.
    Mark {
        position: i64,
    },
    Unmark {
        position: i64,
    },
    Delete {
        position: i64,
    },
    Find {
        keyword: String,
    },
    OnDate {
        date: NaiveDate,
    },
    SortAll {
        direction: SortDirection,
    },
    SortByKind {
        kind: KindTag,
        direction: SortDirection,
    },
    Usage(UsageTopic),
    /// Ends the interactive session; a no-op for the core.
    Bye,
}

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    /// [`TrackerError::UnknownCommand`], [`TrackerError::EmptyDescription`],
    /// [`TrackerError::MalformedCommand`], or [`TrackerError::InvalidNumber`]
    /// depending on what failed validation.
    pub fn parse(input: &str) -> Result<Self, TrackerError> {
        let input = input.trim();
        let (keyword, remainder) = match input.split_once(' ') {
            Some((keyword, remainder)) => (keyword, remainder.trim()),
            None => (input, ""),
        };

        match keyword {
            "list" => Ok(Command::List),
            "bye" => Ok(Command::Bye),
            "todo" => {
                if remainder.is_empty() {
                    return Err(TrackerError::EmptyDescription);
                }
                Ok(Command::AddPlain {
                    description: remainder.to_string(),
                })
            }
            "deadline" => parse_deadline(remainder),
            "event" => parse_event(remainder),
            "mark" => Ok(Command::Mark {
                position: parse_position(remainder, "mark", "mark <task number>")?,
            }),
            "unmark" => Ok(Command::Unmark {
                position: parse_position(remainder, "unmark", "unmark <task number>")?,
            }),
            "delete" => Ok(Command::Delete {
                position: parse_position(remainder, "delete", "delete <task number>")?,
            }),
            "find" => {
                if remainder.is_empty() {
                    Ok(Command::Usage(UsageTopic::Find))
                } else {
                    Ok(Command::Find {
                        keyword: remainder.to_string(),
                    })
                }
            }
            "date" => match datetime::parse_calendar_date(remainder) {
                Some(date) => Ok(Command::OnDate { date }),
                None => Ok(Command::Usage(UsageTopic::Date)),
            },
            "sort" => Ok(parse_sort(remainder)),
            _ => Err(TrackerError::UnknownCommand {
                keyword: keyword.to_string(),
            }),
        }
    }
}

fn parse_deadline(remainder: &str) -> Result<Command, TrackerError> {
    if remainder.is_empty() {
        return Err(TrackerError::EmptyDescription);
    }
    let (description, due) = remainder.split_once(" /by ").ok_or(
        TrackerError::MalformedCommand {
            command: "deadline",
            usage: DEADLINE_USAGE,
        },
    )?;
    let description = description.trim();
    let due = due.trim();
    if description.is_empty() {
        return Err(TrackerError::EmptyDescription);
    }
    if due.is_empty() {
        return Err(TrackerError::MalformedCommand {
            command: "deadline",
            usage: DEADLINE_USAGE,
        });
    }
    Ok(Command::AddDeadline {
        description: description.to_string(),
        due: due.to_string(),
    })
}

fn parse_event(remainder: &str) -> Result<Command, TrackerError> {
    if remainder.is_empty() {
        return Err(TrackerError::EmptyDescription);
    }
    let malformed = || TrackerError::MalformedCommand {
        command: "event",
        usage: EVENT_USAGE,
    };
    // `/from` must come before `/to`; splitting in that order enforces it.
    let (description, rest) = remainder.split_once(" /from ").ok_or_else(malformed)?;
    let (start, end) = rest.split_once(" /to ").ok_or_else(malformed)?;
    let description = description.trim();
    let start = start.trim();
    let end = end.trim();
    if description.is_empty() {
        return Err(TrackerError::EmptyDescription);
    }
    if start.is_empty() || end.is_empty() {
        return Err(malformed());
    }
    Ok(Command::AddTimeRange {
        description: description.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    })
}

fn parse_position(
    remainder: &str,
    command: &'static str,
    usage: &'static str,
) -> Result<i64, TrackerError> {
    if remainder.is_empty() {
        return Err(TrackerError::MalformedCommand { command, usage });
    }
    remainder
        .parse::<i64>()
        .map_err(|_| TrackerError::InvalidNumber {
            input: remainder.to_string(),
        })
}

fn parse_sort(remainder: &str) -> Command {
    let tokens: Vec<&str> = remainder.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Command::Usage(UsageTopic::Sort),
        [direction] => match SortDirection::from_token(direction) {
            Some(direction) => Command::SortAll { direction },
            None => Command::Usage(UsageTopic::SortDirection),
        },
        [kind, direction] => {
            let Some(direction) = SortDirection::from_token(direction) else {
                return Command::Usage(UsageTopic::SortDirection);
            };
            match KindTag::from_command_token(&kind.to_lowercase()) {
                Some(kind) => Command::SortByKind { kind, direction },
                None => Command::Usage(UsageTopic::SortType),
            }
        }
        _ => Command::Usage(UsageTopic::SortDirection),
    }
}
