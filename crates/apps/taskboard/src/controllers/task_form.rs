//! Create and edit screens for a single task.

use taskboard_client::ClientError;
use taskboard_core::{Session, Task, TaskDraft, TaskId, TaskPriority, TaskStatus, parse_date};
use tracing::{info, warn};

use super::{AppContext, Outcome, Route, ValidationError, fail};

/// Draft field values as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// `YYYY-MM-DD`.
    pub deadline: String,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            deadline: task.deadline.format(taskboard_core::DATE_FORMAT).to_string(),
        }
    }

    /// Checks required fields and produces the request body.
    pub fn validate(&self) -> Result<TaskDraft, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        if self.deadline.trim().is_empty() {
            return Err(ValidationError::MissingDeadline);
        }
        let deadline = parse_date(&self.deadline)?;

        Ok(TaskDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            priority: self.priority,
            status: self.status,
            deadline,
        })
    }
}

pub struct CreateTaskController {
    ctx: AppContext,
    session: Option<Session>,
    pub form: TaskForm,
    created: Option<Task>,
    error: Option<String>,
    success: Option<String>,
}

impl CreateTaskController {
    pub fn new(ctx: AppContext) -> Self {
        let session = ctx.current_session();
        Self {
            ctx,
            session,
            form: TaskForm::default(),
            created: None,
            error: None,
            success: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn created(&self) -> Option<&Task> {
        self.created.as_ref()
    }

    pub async fn submit(&mut self) -> Outcome {
        self.success = None;
        let draft = match self.form.validate() {
            Ok(draft) => draft,
            Err(e) => return fail(&mut self.error, e.to_string()),
        };
        let Some(session) = &self.session else {
            return fail(&mut self.error, ClientError::MissingToken.to_string());
        };

        match self.ctx.api.create_task(&session.access_token, &draft).await {
            Ok(task) => {
                info!(task_id = task.id, title = %task.title, "Task created");
                self.created = Some(task);
                self.error = None;
                self.success = Some("Task created successfully!".to_string());
                Outcome::Navigate(Route::Dashboard)
            }
            Err(e) => {
                warn!(error = %e, "Task creation failed");
                fail(&mut self.error, e.to_string())
            }
        }
    }
}

pub struct UpdateTaskController {
    ctx: AppContext,
    session: Option<Session>,
    id: TaskId,
    pub form: TaskForm,
    loaded: bool,
    updated: Option<Task>,
    error: Option<String>,
    success: Option<String>,
}

impl UpdateTaskController {
    pub fn new(ctx: AppContext, id: TaskId) -> Self {
        let session = ctx.current_session();
        Self {
            ctx,
            session,
            id,
            form: TaskForm::default(),
            loaded: false,
            updated: None,
            error: None,
            success: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn updated(&self) -> Option<&Task> {
        self.updated.as_ref()
    }

    /// Fetches the task and seeds the form with its current values.
    pub async fn load(&mut self) -> Outcome {
        let Some(session) = &self.session else {
            return fail(&mut self.error, ClientError::MissingToken.to_string());
        };

        match self.ctx.api.fetch_task(&session.access_token, self.id).await {
            Ok(task) => {
                self.form = TaskForm::from_task(&task);
                self.loaded = true;
                self.error = None;
                Outcome::Stay
            }
            Err(e) => {
                warn!(task_id = self.id, error = %e, "Failed to load task");
                fail(&mut self.error, e.to_string())
            }
        }
    }

    pub async fn submit(&mut self) -> Outcome {
        self.success = None;
        let draft = match self.form.validate() {
            Ok(draft) => draft,
            Err(e) => return fail(&mut self.error, e.to_string()),
        };
        let Some(session) = &self.session else {
            return fail(&mut self.error, ClientError::MissingToken.to_string());
        };

        match self.ctx.api.update_task(&session.access_token, self.id, &draft).await {
            Ok(task) => {
                info!(task_id = task.id, "Task updated");
                self.updated = Some(task);
                self.error = None;
                self.success = Some("Task updated successfully!".to_string());
                Outcome::Navigate(Route::Dashboard)
            }
            Err(e) => {
                warn!(task_id = self.id, error = %e, "Task update failed");
                fail(&mut self.error, e.to_string())
            }
        }
    }
}
