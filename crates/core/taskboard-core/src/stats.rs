//! Dashboard statistics over the full task collection.

use serde::Serialize;

use crate::task::{Task, TaskPriority, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    /// Yet-to-start plus in-progress.
    pub pending: usize,
    pub on_hold: usize,
    pub priority: PriorityCounts,
}

impl TaskStats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Hold => stats.on_hold += 1,
                TaskStatus::YetToStart | TaskStatus::InProgress => stats.pending += 1,
            }
            match task.priority {
                TaskPriority::Low => stats.priority.low += 1,
                TaskPriority::Medium => stats.priority.medium += 1,
                TaskPriority::High => stats.priority.high += 1,
            }
            stats
        })
    }
}
