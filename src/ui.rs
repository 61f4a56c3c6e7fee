//! Pure rendering of outcomes, errors, and usage text.
//!
//! Everything here is a function from data to display text; the shell in
//! `main.rs` decides where the text goes. Lists are numbered 1-based, and
//! `find` renumbers its matches from 1.

use crate::app::Outcome;
use crate::command::UsageTopic;
use crate::error::TrackerError;
use crate::storage::LoadReport;
use crate::task::{datetime, Task};

pub fn welcome() -> String {
    "Hello! This is taskpad, your task list.\nWhat can I do for you?".to_string()
}

pub fn goodbye() -> String {
    "Bye. Hope to see you again soon!".to_string()
}

/// Render one executed command's outcome.
pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Listed { tasks } => {
            if tasks.is_empty() {
                "No tasks in the list yet.".to_string()
            } else {
                format!("Here are the tasks in your list:\n{}", numbered(tasks))
            }
        }
        Outcome::Added {
            task,
            size,
            save_error,
        } => with_save_warning(
            format!(
                "Added this task:\n  {task}\nNow you have {} in the list.",
                count_phrase(*size)
            ),
            save_error,
        ),
        Outcome::Marked { task, save_error } => {
            with_save_warning(format!("Marked this task as done:\n  {task}"), save_error)
        }
        Outcome::Unmarked { task, save_error } => with_save_warning(
            format!("Marked this task as not done yet:\n  {task}"),
            save_error,
        ),
        Outcome::Deleted {
            task,
            size,
            save_error,
        } => with_save_warning(
            format!(
                "Removed this task:\n  {task}\nNow you have {} in the list.",
                count_phrase(*size)
            ),
            save_error,
        ),
        Outcome::Matches { tasks, .. } => {
            if tasks.is_empty() {
                "No matching tasks found.".to_string()
            } else {
                format!(
                    "Here are the matching tasks in your list:\n{}",
                    numbered(tasks)
                )
            }
        }
        Outcome::OnDate { date, tasks } => {
            if tasks.is_empty() {
                format!("No deadlines on {}.", datetime::format_day(*date))
            } else {
                let lines: Vec<String> = tasks.iter().map(|task| format!("  {task}")).collect();
                format!(
                    "Deadlines for {}:\n{}",
                    datetime::format_day(*date),
                    lines.join("\n")
                )
            }
        }
        Outcome::SortedAll { tasks, save_error } => with_save_warning(
            if tasks.is_empty() {
                "No tasks in the list yet.".to_string()
            } else {
                format!("Tasks sorted:\n{}", numbered(tasks))
            },
            save_error,
        ),
        Outcome::SortedByKind { kind, tasks } => {
            if tasks.is_empty() {
                format!("No {} tasks in the list.", kind.command_token())
            } else {
                format!(
                    "Here are your {} tasks, sorted:\n{}",
                    kind.command_token(),
                    numbered(tasks)
                )
            }
        }
        Outcome::Usage(topic) => usage_text(*topic).to_string(),
        Outcome::Bye => goodbye(),
    }
}

/// Render a validation or storage error for the user.
pub fn render_error(error: &TrackerError) -> String {
    error.to_string()
}

/// One-time startup notice when the saved list did not load cleanly.
pub fn render_load_report(report: &LoadReport) -> Option<String> {
    if let Some(error) = &report.read_error {
        return Some(format!(
            "Could not read the saved task list; starting empty. ({error})"
        ));
    }
    if report.skipped.is_empty() {
        return None;
    }
    let lines: Vec<String> = report
        .skipped
        .iter()
        .map(|skipped| skipped.number.to_string())
        .collect();
    Some(format!(
        "Skipped {} unreadable record(s) in the saved task list (line(s) {}).",
        report.skipped.len(),
        lines.join(", ")
    ))
}

fn usage_text(topic: UsageTopic) -> &'static str {
    match topic {
        UsageTopic::Find => "Please specify a keyword to find tasks.",
        UsageTopic::Date => "Invalid date format. Use 'yyyy-MM-dd'.",
        UsageTopic::Sort => {
            "Sort options:\n\
             Sort all:\n  sort 1\n  sort 2\n\
             Or sort a specific type:\n  sort todo 1\n  sort deadline 2\n  sort event 1"
        }
        UsageTopic::SortDirection => "Invalid sort option. Please enter 1 or 2.",
        UsageTopic::SortType => "Unknown sort type. Use todo, deadline, or event.",
    }
}

/// Append the non-fatal save failure, when there is one, to a mutation
/// message. The mutation itself stands either way.
fn with_save_warning(text: String, save_error: &Option<TrackerError>) -> String {
    match save_error {
        Some(error) => format!("{text}\nWarning: {error}"),
        None => text,
    }
}

fn numbered(tasks: &[Task]) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| format!("{}. {}", index + 1, task))
        .collect::<Vec<_>>()
        .join("\n")
}

fn count_phrase(size: usize) -> String {
    if size == 1 {
        "1 task".to_string()
    } else {
        format!("{size} tasks")
    }
}
