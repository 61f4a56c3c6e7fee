//! Tracker façade: one command line in, one structured outcome out.
//!
//! This is the surface the shell (or any other front end) consumes:
//! construct with a storage path, feed it lines, render the outcomes.
//! Rendering itself lives in [`crate::ui`]; nothing here writes to the
//! console.

use chrono::NaiveDate;

use crate::command::{Command, UsageTopic};
use crate::config::Config;
use crate::error::TrackerError;
use crate::list::TaskList;
use crate::storage::{LoadReport, Storage};
use crate::task::{KindTag, Task};

/// Structured result of one executed command.
#[derive(Debug)]
pub enum Outcome {
    Listed {
        tasks: Vec<Task>,
    },
    Added {
        task: Task,
        size: usize,
        save_error: Option<TrackerError>,
    },
    Marked {
        task: Task,
        save_error: Option<TrackerError>,
    },
    Unmarked {
        task: Task,
        save_error: Option<TrackerError>,
    },
    Deleted {
        task: Task,
        size: usize,
        save_error: Option<TrackerError>,
    },
    Matches {
        keyword: String,
        tasks: Vec<Task>,
    },
    OnDate {
        date: NaiveDate,
        tasks: Vec<Task>,
    },
    SortedAll {
        tasks: Vec<Task>,
        save_error: Option<TrackerError>,
    },
    SortedByKind {
        kind: KindTag,
        tasks: Vec<Task>,
    },
    Usage(UsageTopic),
    Bye,
}

impl Outcome {
    /// True only for `bye`; the read-loop stops after rendering it.
    pub fn is_exit(&self) -> bool {
        matches!(self, Outcome::Bye)
    }
}

/// The task tracker: engine plus attached storage behind a line interface.
#[derive(Debug)]
pub struct Tracker {
    list: TaskList,
}

impl Tracker {
    /// Open the tracker against the configured storage file.
    ///
    /// Never fails: a broken or unreadable file degrades to an empty list,
    /// with the details in the returned report for one-time display.
    pub fn open(config: &Config) -> (Self, LoadReport) {
        let (list, report) = TaskList::load(Storage::new(config.data_file.clone()));
        (Self { list }, report)
    }

    /// A tracker with no storage attached; mutations stay in memory.
    pub fn in_memory() -> Self {
        Self {
            list: TaskList::new(),
        }
    }

    /// Ordered snapshot of the current list.
    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    /// Parse and run one command line.
    ///
    /// # Errors
    /// Any [`TrackerError`] from parsing or validation; all are user-facing
    /// and leave the tracker ready for the next command.
    pub fn execute(&mut self, input: &str) -> Result<Outcome, TrackerError> {
        match Command::parse(input)? {
            Command::List => Ok(Outcome::Listed {
                tasks: self.list.tasks().to_vec(),
            }),
            Command::AddPlain { description } => {
                let mutation = self.list.add(Task::new_plain(&description)?);
                Ok(Outcome::Added {
                    task: mutation.task,
                    size: mutation.size,
                    save_error: mutation.save_error,
                })
            }
            Command::AddDeadline { description, due } => {
                let mutation = self.list.add(Task::new_deadline(&description, &due)?);
                Ok(Outcome::Added {
                    task: mutation.task,
                    size: mutation.size,
                    save_error: mutation.save_error,
                })
            }
            Command::AddTimeRange {
                description,
                start,
                end,
            } => {
                let mutation = self
                    .list
                    .add(Task::new_time_range(&description, &start, &end)?);
                Ok(Outcome::Added {
                    task: mutation.task,
                    size: mutation.size,
                    save_error: mutation.save_error,
                })
            }
            Command::Mark { position } => {
                let mutation = self.list.mark(self.resolve(position)?)?;
                Ok(Outcome::Marked {
                    task: mutation.task,
                    save_error: mutation.save_error,
                })
            }
            Command::Unmark { position } => {
                let mutation = self.list.unmark(self.resolve(position)?)?;
                Ok(Outcome::Unmarked {
                    task: mutation.task,
                    save_error: mutation.save_error,
                })
            }
            Command::Delete { position } => {
                let mutation = self.list.delete(self.resolve(position)?)?;
                Ok(Outcome::Deleted {
                    task: mutation.task,
                    size: mutation.size,
                    save_error: mutation.save_error,
                })
            }
            Command::Find { keyword } => {
                let tasks = self.list.find(&keyword).into_iter().cloned().collect();
                Ok(Outcome::Matches { keyword, tasks })
            }
            Command::OnDate { date } => {
                let tasks = self.list.tasks_on_date(date).into_iter().cloned().collect();
                Ok(Outcome::OnDate { date, tasks })
            }
            Command::SortAll { direction } => {
                let save_error = self.list.sort_all(direction);
                Ok(Outcome::SortedAll {
                    tasks: self.list.tasks().to_vec(),
                    save_error,
                })
            }
            Command::SortByKind { kind, direction } => Ok(Outcome::SortedByKind {
                kind,
                tasks: self.list.sort_by_kind(kind, direction),
            }),
            Command::Usage(topic) => Ok(Outcome::Usage(topic)),
            Command::Bye => Ok(Outcome::Bye),
        }
    }

    /// Convert a 1-based user position into a checked zero-based index.
    fn resolve(&self, position: i64) -> Result<usize, TrackerError> {
        if position >= 1 && (position as usize) <= self.list.len() {
            Ok(position as usize - 1)
        } else {
            Err(TrackerError::IndexOutOfRange {
                position,
                size: self.list.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;
    use tempfile::TempDir;

    fn tracker_in(dir: &TempDir) -> (Tracker, LoadReport) {
        Tracker::open(&Config::new(dir.path().join("tasks.txt")))
    }

    #[test]
    fn end_to_end_scenario() {
        let dir = TempDir::new().unwrap();
        let (mut tracker, _) = tracker_in(&dir);

        match tracker.execute("todo read book").unwrap() {
            Outcome::Added { size, task, .. } => {
                assert_eq!(size, 1);
                assert_eq!(task.description(), "read book");
                assert!(!task.is_done());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        match tracker.execute("mark 1").unwrap() {
            Outcome::Marked { task, .. } => assert!(task.is_done()),
            other => panic!("unexpected outcome: {other:?}"),
        }

        match tracker
            .execute("deadline return book /by 2025-02-18 1800")
            .unwrap()
        {
            Outcome::Added { size, task, .. } => {
                assert_eq!(size, 2);
                match task.kind() {
                    TaskKind::Deadline { due_at } => {
                        assert_eq!(
                            *due_at,
                            chrono::NaiveDate::from_ymd_opt(2025, 2, 18)
                                .unwrap()
                                .and_hms_opt(18, 0, 0)
                                .unwrap()
                        );
                    }
                    other => panic!("expected a deadline, got {other:?}"),
                }
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        match tracker.execute("delete 1").unwrap() {
            Outcome::Deleted { task, size, .. } => {
                assert_eq!(task.description(), "read book");
                assert_eq!(size, 1);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        // The deadline is now task 1.
        match tracker.execute("mark 1").unwrap() {
            Outcome::Marked { task, .. } => assert_eq!(task.description(), "return book"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn state_survives_reopening() {
        let dir = TempDir::new().unwrap();
        {
            let (mut tracker, _) = tracker_in(&dir);
            tracker.execute("todo read book").unwrap();
            tracker.execute("mark 1").unwrap();
        }

        let (tracker, report) = tracker_in(&dir);
        assert!(report.read_error.is_none());
        assert!(report.skipped.is_empty());
        assert_eq!(tracker.tasks().len(), 1);
        assert!(tracker.tasks()[0].is_done());
    }

    #[test]
    fn find_returns_matches_in_order() {
        let mut tracker = Tracker::in_memory();
        tracker.execute("todo Read book").unwrap();
        tracker.execute("todo Return book to library").unwrap();
        tracker.execute("todo Go for a run").unwrap();

        match tracker.execute("find book").unwrap() {
            Outcome::Matches { keyword, tasks } => {
                assert_eq!(keyword, "book");
                let names: Vec<&str> = tasks.iter().map(Task::description).collect();
                assert_eq!(names, vec!["Read book", "Return book to library"]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn positions_are_one_based_and_range_checked() {
        let mut tracker = Tracker::in_memory();
        tracker.execute("todo a").unwrap();

        assert!(matches!(
            tracker.execute("mark 0"),
            Err(TrackerError::IndexOutOfRange {
                position: 0,
                size: 1
            })
        ));
        assert!(matches!(
            tracker.execute("delete 2"),
            Err(TrackerError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            tracker.execute("mark -3"),
            Err(TrackerError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn sort_all_reorders_but_typed_sort_does_not() {
        let mut tracker = Tracker::in_memory();
        tracker.execute("todo z").unwrap();
        tracker.execute("deadline a /by 2025-01-02").unwrap();
        tracker.execute("deadline b /by 2025-01-01").unwrap();

        match tracker.execute("sort deadline 1").unwrap() {
            Outcome::SortedByKind { kind, tasks } => {
                assert_eq!(kind, KindTag::Deadline);
                let names: Vec<&str> = tasks.iter().map(Task::description).collect();
                assert_eq!(names, vec!["b", "a"]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let canonical: Vec<&str> = tracker.tasks().iter().map(Task::description).collect();
        assert_eq!(canonical, vec!["z", "a", "b"]);

        match tracker.execute("sort 1").unwrap() {
            Outcome::SortedAll { tasks, .. } => {
                let names: Vec<&str> = tasks.iter().map(Task::description).collect();
                assert_eq!(names, vec!["b", "a", "z"]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let canonical: Vec<&str> = tracker.tasks().iter().map(Task::description).collect();
        assert_eq!(canonical, vec!["b", "a", "z"]);
    }

    #[test]
    fn date_command_reports_matching_deadlines() {
        let mut tracker = Tracker::in_memory();
        tracker.execute("deadline pay rent /by 2025-02-01 09:00").unwrap();
        tracker.execute("todo buy milk").unwrap();

        match tracker.execute("date 2025-02-01").unwrap() {
            Outcome::OnDate { tasks, .. } => {
                assert_eq!(tasks.len(), 1);
                assert_eq!(tasks[0].description(), "pay rent");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn usage_responses_are_not_errors() {
        let mut tracker = Tracker::in_memory();
        assert!(matches!(
            tracker.execute("find").unwrap(),
            Outcome::Usage(UsageTopic::Find)
        ));
        assert!(matches!(
            tracker.execute("date whenever").unwrap(),
            Outcome::Usage(UsageTopic::Date)
        ));
        assert!(matches!(
            tracker.execute("sort").unwrap(),
            Outcome::Usage(UsageTopic::Sort)
        ));
    }

    #[test]
    fn bye_ends_the_session() {
        let mut tracker = Tracker::in_memory();
        let outcome = tracker.execute("bye").unwrap();
        assert!(outcome.is_exit());
        assert!(!tracker.execute("list").unwrap().is_exit());
    }

    #[test]
    fn validation_errors_do_not_change_the_list() {
        let mut tracker = Tracker::in_memory();
        tracker.execute("todo a").unwrap();
        assert!(tracker.execute("deadline b /by someday").is_err());
        assert!(tracker.execute("nonsense").is_err());
        assert_eq!(tracker.tasks().len(), 1);
    }
}
