use taskboard_core::{FilterCriteria, TaskPriority, TaskStatus};

/// View state of the dashboard that is not owned by the controller.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub selected: usize,
    pub show_help: bool,
    pub message: Option<StatusMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the selection inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::Info(text.into()));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::Error(text.into()));
    }
}

/// All, then each status in order, then back to all.
pub fn next_status(current: Option<TaskStatus>) -> Option<TaskStatus> {
    cycle(&TaskStatus::ALL, current)
}

pub fn next_priority(current: Option<TaskPriority>) -> Option<TaskPriority> {
    cycle(&TaskPriority::ALL, current)
}

fn cycle<T: Copy + PartialEq>(choices: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => choices.first().copied(),
        Some(value) => {
            let position = choices.iter().position(|c| *c == value)?;
            choices.get(position + 1).copied()
        }
    }
}

/// One-line summary of the active filters for the list title.
pub fn describe(criteria: &FilterCriteria) -> String {
    if criteria.is_empty() {
        return "all tasks".to_string();
    }

    let mut parts = Vec::new();
    if let Some(status) = criteria.status {
        parts.push(format!("status: {}", status.label()));
    }
    if let Some(priority) = criteria.priority {
        parts.push(format!("priority: {}", priority.label()));
    }
    if let Some(start) = criteria.start_date {
        parts.push(format!("from {}", start));
    }
    if let Some(end) = criteria.end_date {
        parts.push(format!("to {}", end));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::parse_date;

    #[test]
    fn test_status_cycle_wraps_to_all() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            current = next_status(current);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(TaskStatus::YetToStart),
                Some(TaskStatus::InProgress),
                Some(TaskStatus::Completed),
                Some(TaskStatus::Hold),
                None,
            ]
        );
    }

    #[test]
    fn test_priority_cycle() {
        assert_eq!(next_priority(None), Some(TaskPriority::Low));
        assert_eq!(next_priority(Some(TaskPriority::High)), None);
    }

    #[test]
    fn test_selection_bounds() {
        let mut state = DashboardState::new();
        state.select_previous();
        assert_eq!(state.selected, 0);

        state.select_next(2);
        state.select_next(2);
        assert_eq!(state.selected, 1);

        state.clamp(1);
        assert_eq!(state.selected, 0);

        state.select_next(0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&FilterCriteria::new()), "all tasks");

        let criteria = FilterCriteria::new()
            .with_status(Some(TaskStatus::Hold))
            .with_end_date(parse_date("2025-03-01").ok());
        assert_eq!(describe(&criteria), "status: Hold, to 2025-03-01");
    }
}
