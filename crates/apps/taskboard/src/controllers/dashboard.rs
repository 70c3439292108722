use taskboard_client::ClientError;
use taskboard_core::{FilterCriteria, Session, TaskBoard, TaskId, TaskStats};
use tracing::{debug, info, warn};

use super::{AppContext, Outcome, Route, fail};

/// Dashboard screen: the fetched task list, its filter and the session it
/// was fetched for.
pub struct DashboardController {
    ctx: AppContext,
    session: Option<Session>,
    board: TaskBoard,
    error: Option<String>,
}

impl DashboardController {
    pub fn new(ctx: AppContext) -> Self {
        let session = ctx.current_session();
        Self {
            ctx,
            session,
            board: TaskBoard::new(),
            error: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn stats(&self) -> TaskStats {
        self.board.stats()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetches the task list. Fails without a request when logged out.
    pub async fn load(&mut self) -> Outcome {
        let Some(session) = &self.session else {
            return fail(&mut self.error, ClientError::MissingToken.to_string());
        };

        match self.ctx.api.list_tasks(&session.access_token).await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "Tasks loaded");
                self.board.replace_tasks(tasks);
                self.error = None;
                Outcome::Stay
            }
            Err(e) => {
                warn!(error = %e, "Failed to load tasks");
                fail(&mut self.error, e.to_string())
            }
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.board.criteria()
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.board.set_criteria(criteria);
    }

    /// Deletes a task on the server, then drops it from the local list.
    pub async fn delete(&mut self, id: TaskId) -> Outcome {
        let Some(session) = &self.session else {
            return fail(&mut self.error, ClientError::MissingToken.to_string());
        };

        match self.ctx.api.delete_task(&session.access_token, id).await {
            Ok(()) => {
                info!(task_id = id, "Task deleted");
                self.board.remove(id);
                self.error = None;
                Outcome::Stay
            }
            Err(e) => {
                warn!(task_id = id, error = %e, "Failed to delete task");
                fail(&mut self.error, e.to_string())
            }
        }
    }

    pub fn create(&self) -> Outcome {
        Outcome::Navigate(Route::CreateTask)
    }

    pub fn edit(&self, id: TaskId) -> Outcome {
        Outcome::Navigate(Route::EditTask(id))
    }

    /// Tears down the session and forgets the fetched tasks.
    pub fn logout(&mut self) -> Outcome {
        if let Err(e) = self.ctx.sessions.clear() {
            return fail(&mut self.error, format!("Failed to clear session: {e}"));
        }
        if let Some(session) = self.session.take() {
            info!(username = %session.username(), "Logged out");
        }
        self.board = TaskBoard::new();
        self.error = None;
        Outcome::Navigate(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::{FakeApi, context, logged_in_context, sample_task};
    use taskboard_client::SessionStore;
    use taskboard_core::{TaskPriority, TaskStatus};

    fn tasks() -> Vec<taskboard_core::Task> {
        vec![
            sample_task(1, TaskStatus::Completed, TaskPriority::Low, "2025-01-10"),
            sample_task(2, TaskStatus::Hold, TaskPriority::High, "2025-02-10"),
            sample_task(3, TaskStatus::InProgress, TaskPriority::Medium, "2025-03-10"),
        ]
    }

    #[tokio::test]
    async fn test_load_without_token_skips_request() {
        let (ctx, api, _store) = context(FakeApi::new().with_tasks(tasks()));
        let mut dashboard = DashboardController::new(ctx);

        let outcome = dashboard.load().await;

        assert_eq!(
            outcome.error_message(),
            Some("Authentication token is missing. Please log in.")
        );
        assert!(api.calls().is_empty());
        assert!(dashboard.board().is_empty());
    }

    #[tokio::test]
    async fn test_load_and_filter() {
        let (ctx, _api, _store) = logged_in_context(FakeApi::new().with_tasks(tasks()));
        let mut dashboard = DashboardController::new(ctx);

        assert_eq!(dashboard.load().await, Outcome::Stay);
        assert_eq!(dashboard.board().visible_len(), 3);

        dashboard.set_criteria(FilterCriteria::new().with_status(Some(TaskStatus::Completed)));
        let visible: Vec<_> = dashboard.board().visible().iter().map(|t| t.id).collect();
        assert_eq!(visible, vec![1]);

        let stats = dashboard.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_shown() {
        let api = FakeApi::new().rejecting(401, "Given token not valid for any token type");
        let (ctx, _api, _store) = logged_in_context(api);
        let mut dashboard = DashboardController::new(ctx);

        dashboard.load().await;

        assert_eq!(dashboard.error(), Some("Given token not valid for any token type"));
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let (ctx, api, _store) = logged_in_context(FakeApi::new().with_tasks(tasks()));
        let mut dashboard = DashboardController::new(ctx);
        dashboard.load().await;

        assert_eq!(dashboard.delete(2).await, Outcome::Stay);

        let ids: Vec<_> = dashboard.board().tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(api.task_ids(), vec![1, 3]);
        assert_eq!(dashboard.board().get(1), Some(&tasks()[0]));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let (ctx, _api, _store) = logged_in_context(FakeApi::new().with_tasks(tasks()));
        let mut dashboard = DashboardController::new(ctx);
        dashboard.load().await;

        let outcome = dashboard.delete(99).await;

        assert!(outcome.is_failure());
        assert_eq!(dashboard.board().tasks().len(), 3);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (ctx, _api, store) = logged_in_context(FakeApi::new().with_tasks(tasks()));
        let mut dashboard = DashboardController::new(ctx);
        dashboard.load().await;

        assert_eq!(dashboard.logout(), Outcome::Navigate(Route::Home));
        assert!(dashboard.session().is_none());
        assert!(dashboard.board().is_empty());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_navigation_targets() {
        let (ctx, _api, _store) = context(FakeApi::new());
        let dashboard = DashboardController::new(ctx);
        assert_eq!(dashboard.create(), Outcome::Navigate(Route::CreateTask));
        assert_eq!(dashboard.edit(7), Outcome::Navigate(Route::EditTask(7)));
    }
}
