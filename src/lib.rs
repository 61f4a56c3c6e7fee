//! # taskpad
//!
//! Line-driven personal task tracker with durable plain-text storage.
//!
//! This library provides:
//! - A typed task model (plain, deadline, time-range) with flexible date
//!   parsing and canonical serialization
//! - An in-memory task-list engine for mutation, search, sort, and
//!   date filtering
//! - A line-oriented storage codec that persists the list across sessions
//! - A command parser turning one line of text into a validated operation
//!
//! ## Architecture
//!
//! ```text
//!   command text ──▶ Command parser ──▶ Tracker façade
//!                                           │
//!                                           ▼
//!                                    TaskList engine ──▶ Storage codec
//!                                           │                (save on
//!                                           ▼                 mutation)
//!                                   structured Outcome ──▶ ui rendering
//! ```
//!
//! ## Modules
//! - `task`: the task model and its date grammar
//! - `list`: the ordered in-memory engine
//! - `storage`: the pipe-delimited line codec
//! - `command`: the per-line command parser
//! - `app`: the `Tracker` façade tying the pieces together
//! - `ui`: pure rendering of outcomes and errors

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod list;
pub mod storage;
pub mod task;
pub mod ui;

pub use app::{Outcome, Tracker};
pub use command::{Command, UsageTopic};
pub use config::Config;
pub use error::TrackerError;
pub use list::{SortDirection, TaskList};
pub use storage::Storage;
pub use task::{KindTag, Task, TaskKind};
