//! Filter engine for the dashboard task list.
//!
//! Criteria are four independent predicates combined with AND. An inactive
//! predicate (`None`) accepts every task.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::ParseError;
use crate::task::{Task, TaskPriority, TaskStatus, parse_date};

/// User-selected predicates narrowing the visible task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: Option<TaskStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Option<TaskPriority>) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn with_end_date(mut self, end_date: Option<NaiveDate>) -> Self {
        self.end_date = end_date;
        self
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Whether `task` passes every active predicate.
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status == status)
            && self.priority.is_none_or(|priority| task.priority == priority)
            && self.start_date.is_none_or(|start| task.deadline >= start)
            && self.end_date.is_none_or(|end| task.deadline <= end)
    }
}

/// Returns the tasks matching `criteria`, in input order.
pub fn filter_tasks(tasks: &[Task], criteria: &FilterCriteria) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| criteria.matches(task))
        .cloned()
        .collect()
}

/// Parses a status or priority selector where `all` (or blank) means inactive.
pub fn parse_choice<T>(value: &str) -> Result<Option<T>, ParseError>
where
    T: FromStr<Err = ParseError>,
{
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    value.parse().map(Some)
}

/// Parses a date bound where blank means inactive.
pub fn parse_date_bound(value: &str) -> Result<Option<NaiveDate>, ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse_date(value).map(Some)
}
