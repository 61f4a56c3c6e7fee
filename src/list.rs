//! In-memory task-list engine.
//!
//! Owns the ordered task collection and exposes mutation, search, sort, and
//! date-filter operations. Insertion order is the canonical order until
//! [`TaskList::sort_all`] reorders it. Every successful mutation saves the
//! full list through the attached storage; a save failure is carried in the
//! result (and logged) but the in-memory change is never rolled back.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::error::TrackerError;
use crate::storage::{LoadReport, Storage};
use crate::task::{KindTag, Task, TaskKind};

/// Sort polarity. The command grammar spells these `1` and `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(SortDirection::Ascending),
            "2" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Structured result of one successful mutation: the affected task, the new
/// list size, and the outcome of the follow-up save.
#[derive(Debug)]
pub struct Mutation {
    pub task: Task,
    pub size: usize,
    /// `Some` when the post-mutation save failed; the mutation itself stands.
    pub save_error: Option<TrackerError>,
}

/// The ordered task collection.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    storage: Option<Storage>,
}

impl TaskList {
    /// An empty list with no storage attached. Mutations stay in memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the list from storage and keep the storage attached for the
    /// per-mutation saves.
    ///
    /// Never fails: a read error degrades to an empty list, with the cause
    /// (and any skipped records) in the returned report.
    pub fn load(storage: Storage) -> (Self, LoadReport) {
        let mut report = storage.load();
        let list = Self {
            tasks: std::mem::take(&mut report.tasks),
            storage: Some(storage),
        };
        (list, report)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), TrackerError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TrackerError::IndexOutOfRange {
                position: index as i64 + 1,
                size: self.tasks.len(),
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<&Task, TrackerError> {
        self.check_index(index)?;
        Ok(&self.tasks[index])
    }

    /// Append a task and return the new size.
    pub fn add(&mut self, task: Task) -> Mutation {
        self.tasks.push(task.clone());
        Mutation {
            task,
            size: self.tasks.len(),
            save_error: self.persist(),
        }
    }

    /// Set the done flag. Idempotent.
    pub fn mark(&mut self, index: usize) -> Result<Mutation, TrackerError> {
        self.check_index(index)?;
        self.tasks[index].mark_done();
        Ok(Mutation {
            task: self.tasks[index].clone(),
            size: self.tasks.len(),
            save_error: self.persist(),
        })
    }

    /// Clear the done flag. Idempotent.
    pub fn unmark(&mut self, index: usize) -> Result<Mutation, TrackerError> {
        self.check_index(index)?;
        self.tasks[index].mark_undone();
        Ok(Mutation {
            task: self.tasks[index].clone(),
            size: self.tasks.len(),
            save_error: self.persist(),
        })
    }

    /// Remove and return the task at `index`; later entries shift down.
    pub fn delete(&mut self, index: usize) -> Result<Mutation, TrackerError> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        Ok(Mutation {
            task: removed,
            size: self.tasks.len(),
            save_error: self.persist(),
        })
    }

    /// Case-insensitive substring search over descriptions, in list order.
    ///
    /// An empty keyword is rejected upstream by the command parser.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        let keyword = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.description().to_lowercase().contains(&keyword))
            .collect()
    }

    /// All deadline tasks due on the given calendar date, in list order.
    pub fn tasks_on_date(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| match task.kind() {
                TaskKind::Deadline { due_at } => due_at.date() == date,
                _ => false,
            })
            .collect()
    }

    /// Reorder the whole list in place and persist the new canonical order.
    ///
    /// Returns the save failure, if any.
    pub fn sort_all(&mut self, direction: SortDirection) -> Option<TrackerError> {
        self.tasks.sort_by(|a, b| ordered(a, b, direction));
        self.persist()
    }

    /// Sort a copy of one variant's tasks without touching canonical order.
    ///
    /// Deliberately asymmetric with [`TaskList::sort_all`]: a typed sort is
    /// a view, so the canonical list and the storage file stay as they were.
    pub fn sort_by_kind(&self, kind: KindTag, direction: SortDirection) -> Vec<Task> {
        let mut selected: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.kind_tag() == kind)
            .cloned()
            .collect();
        selected.sort_by(|a, b| ordered(a, b, direction));
        selected
    }

    fn persist(&self) -> Option<TrackerError> {
        let storage = self.storage.as_ref()?;
        match storage.save(&self.tasks) {
            Ok(()) => None,
            Err(error) => {
                tracing::warn!("Task list changed in memory but saving failed: {}", error);
                Some(error)
            }
        }
    }
}

/// Shared comparator: timestamped tasks first, ascending by timestamp;
/// timestamp-less tasks after all dated ones; ties (and the undated group)
/// fall back to case-insensitive description order.
fn compare(a: &Task, b: &Task) -> Ordering {
    match (a.timestamp_for_sort(), b.timestamp_for_sort()) {
        (Some(lhs), Some(rhs)) => lhs.cmp(&rhs).then_with(|| compare_descriptions(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_descriptions(a, b),
    }
}

fn compare_descriptions(a: &Task, b: &Task) -> Ordering {
    a.description()
        .to_lowercase()
        .cmp(&b.description().to_lowercase())
}

/// Descending is the same comparator with polarity inverted, not a separate
/// rule set.
fn ordered(a: &Task, b: &Task, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => compare(a, b),
        SortDirection::Descending => compare(b, a),
    }
}
