//! In-memory task list with a filtered view kept in sync.

use crate::filter::FilterCriteria;
use crate::stats::TaskStats;
use crate::task::{Task, TaskId};

/// The fetched task collection plus the current filter criteria.
///
/// Every mutation recomputes the visible subset, so `visible()` always
/// reflects the latest collection under the latest criteria.
#[derive(Debug, Default, Clone)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    criteria: FilterCriteria,
    visible: Vec<usize>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let mut board = Self::new();
        board.replace_tasks(tasks);
        board
    }

    /// Replaces the whole collection, e.g. after a fresh fetch.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.refilter();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    pub fn clear_criteria(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Removes the task with `id`. Other tasks keep their order.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let removed = self.tasks.remove(index);
        self.refilter();
        Some(removed)
    }

    /// Replaces the task with the same id, or appends it.
    pub fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
        self.refilter();
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn visible(&self) -> Vec<&Task> {
        self.visible.iter().map(|&index| &self.tasks[index]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Statistics over the unfiltered collection.
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    fn refilter(&mut self) {
        self.visible = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| self.criteria.matches(task))
            .map(|(index, _)| index)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskPriority, TaskStatus, parse_date};

    fn task(id: TaskId, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: String::new(),
            status,
            priority: TaskPriority::Medium,
            deadline: parse_date("2025-06-01").unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_remove_drops_exactly_one() {
        let mut board = TaskBoard::with_tasks(vec![
            task(1, TaskStatus::Hold),
            task(2, TaskStatus::Hold),
            task(3, TaskStatus::Completed),
        ]);

        let removed = board.remove(2).unwrap();

        assert_eq!(removed.id, 2);
        let ids: Vec<_> = board.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(board.get(1), Some(&task(1, TaskStatus::Hold)));
        assert!(board.remove(2).is_none());
    }

    #[test]
    fn test_visible_follows_criteria_and_collection() {
        let mut board = TaskBoard::with_tasks(vec![
            task(1, TaskStatus::Hold),
            task(2, TaskStatus::Completed),
        ]);
        board.set_criteria(FilterCriteria::new().with_status(Some(TaskStatus::Completed)));
        assert_eq!(board.visible_len(), 1);

        board.upsert(task(3, TaskStatus::Completed));
        let ids: Vec<_> = board.visible().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);

        board.remove(2);
        let ids: Vec<_> = board.visible().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3]);

        board.clear_criteria();
        assert_eq!(board.visible_len(), 2);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut board =
            TaskBoard::with_tasks(vec![task(1, TaskStatus::Hold), task(2, TaskStatus::Hold)]);
        board.upsert(task(1, TaskStatus::Completed));
        assert_eq!(board.tasks()[0].status, TaskStatus::Completed);
        assert_eq!(board.tasks().len(), 2);
    }

    #[test]
    fn test_stats_ignore_filter() {
        let mut board = TaskBoard::with_tasks(vec![
            task(1, TaskStatus::Hold),
            task(2, TaskStatus::Completed),
        ]);
        board.set_criteria(FilterCriteria::new().with_status(Some(TaskStatus::Hold)));
        assert_eq!(board.stats().total, 2);
    }
}
