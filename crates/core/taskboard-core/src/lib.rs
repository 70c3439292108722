//! Core types for the taskboard front-end.
//!
//! This crate has no I/O. It provides:
//! - `Task`, `TaskDraft` and the status/priority enums in their wire format
//! - `Session` and `User` for the authenticated context
//! - the filter engine (`FilterCriteria`, `filter_tasks`)
//! - `TaskBoard`, the fetched collection with its filtered view
//! - `TaskStats` for dashboard counters

use thiserror::Error;

pub mod board;
pub mod filter;
pub mod session;
pub mod stats;
pub mod task;

pub use board::TaskBoard;
pub use filter::{FilterCriteria, filter_tasks, parse_choice, parse_date_bound};
pub use session::{Session, User};
pub use stats::{PriorityCounts, TaskStats};
pub use task::{DATE_FORMAT, Task, TaskDraft, TaskId, TaskPriority, TaskStatus, parse_date};

/// Errors from parsing user-entered values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown status '{0}' (expected yet-to-start, in-progress, completed or hold)")]
    UnknownStatus(String),

    #[error("Unknown priority '{0}' (expected low, medium or high)")]
    UnknownPriority(String),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}
