//! Page controllers.
//!
//! Each controller owns the draft state of one screen and turns a user
//! action into at most one API call. Controllers never render anything;
//! the CLI commands and the terminal dashboard drive them.

use std::sync::Arc;

use taskboard_client::{SessionStore, TaskApi};
use taskboard_core::{ParseError, Session, TaskId};
use thiserror::Error;
use tracing::warn;

pub mod account;
pub mod dashboard;
pub mod login;
pub mod register;
pub mod task_form;

#[cfg(test)]
pub(crate) mod testing;

pub use account::AccountController;
pub use dashboard::DashboardController;
pub use login::LoginController;
pub use register::RegisterController;
pub use task_form::{CreateTaskController, TaskForm, UpdateTaskController};

/// Navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    CreateTask,
    EditTask(TaskId),
}

/// Result of a controller action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action succeeded and the user moves on.
    Navigate(Route),
    /// The action succeeded and the current screen stays.
    Stay,
    /// The action failed; the message is shown inline.
    Failed(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Client-side checks that fail before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username and password are required.")]
    MissingCredentials,

    #[error("All fields are required")]
    MissingRegistrationFields,

    #[error("Please provide at least one field to update")]
    NoProfileChanges,

    #[error("Title is required.")]
    MissingTitle,

    #[error("Description is required.")]
    MissingDescription,

    #[error("Deadline is required.")]
    MissingDeadline,

    #[error(transparent)]
    InvalidDeadline(#[from] ParseError),
}

/// Shared dependencies injected into every controller.
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn TaskApi>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppContext {
    pub fn new(api: Arc<dyn TaskApi>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { api, sessions }
    }

    /// The stored session, if any. An unreadable store counts as logged out.
    pub fn current_session(&self) -> Option<Session> {
        match self.sessions.load() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session");
                None
            }
        }
    }
}

/// Records `message` in `slot` and returns the failed outcome.
pub(crate) fn fail(slot: &mut Option<String>, message: impl Into<String>) -> Outcome {
    let message = message.into();
    *slot = Some(message.clone());
    Outcome::Failed(message)
}
