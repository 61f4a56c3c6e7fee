//! Task module - the typed task model and its date grammar.
//!
//! - All variants live in one tagged union with exhaustive matching
//! - Invariants are documented and enforced in constructors
//! - Date parsing happens before a task exists; storage encoding is the
//!   exact inverse of the per-line decoder

pub mod datetime;
pub mod task;

pub use task::{KindTag, Task, TaskKind};
