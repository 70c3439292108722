//! Operations offered by the task service and their payloads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use taskboard_core::{Task, TaskDraft, TaskId, User};

use crate::error::ClientResult;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Token pair issued on login. `user` is absent on plain token endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    /// Present when the service rotates refresh tokens.
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Account fields to change. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Body returned after a profile change.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProfileUpdateBody {
    pub(crate) data: User,
}

/// Task listing, either paginated or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TaskListBody {
    Page { results: Vec<Task> },
    Plain(Vec<Task>),
}

impl TaskListBody {
    pub(crate) fn into_tasks(self) -> Vec<Task> {
        match self {
            TaskListBody::Page { results } => results,
            TaskListBody::Plain(tasks) => tasks,
        }
    }
}

/// The REST endpoints consumed by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    Refresh,
    Profile,
    UpdateProfile,
    ListTasks,
    CreateTask,
    FetchTask(TaskId),
    UpdateTask(TaskId),
    DeleteTask(TaskId),
}

impl Endpoint {
    /// Path relative to the API base path. Trailing slashes are significant.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "login/".to_string(),
            Endpoint::Register => "register/".to_string(),
            Endpoint::Refresh => "refresh/".to_string(),
            Endpoint::Profile => "user/profile/".to_string(),
            Endpoint::UpdateProfile => "user/update-profile/".to_string(),
            Endpoint::ListTasks => "tasks/list/".to_string(),
            Endpoint::CreateTask => "tasks/".to_string(),
            Endpoint::FetchTask(id) | Endpoint::UpdateTask(id) => format!("tasks/{id}/"),
            Endpoint::DeleteTask(id) => format!("tasks/delete/{id}/"),
        }
    }

    pub fn method(&self) -> reqwest::Method {
        match self {
            Endpoint::Login | Endpoint::Register | Endpoint::Refresh | Endpoint::CreateTask => {
                reqwest::Method::POST
            }
            Endpoint::Profile | Endpoint::ListTasks | Endpoint::FetchTask(_) => {
                reqwest::Method::GET
            }
            Endpoint::UpdateProfile | Endpoint::UpdateTask(_) => reqwest::Method::PUT,
            Endpoint::DeleteTask(_) => reqwest::Method::DELETE,
        }
    }

    /// Message shown when the server rejects the call without saying why.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Endpoint::Login => "Invalid credentials. Please try again.",
            Endpoint::Register => "Something went wrong!",
            Endpoint::Refresh => "Session expired. Please log in again.",
            Endpoint::Profile => "Failed to fetch user profile.",
            Endpoint::UpdateProfile => "Failed to update profile.",
            Endpoint::ListTasks => "Failed to fetch tasks.",
            Endpoint::CreateTask => "Failed to create task. Please try again.",
            Endpoint::FetchTask(_) => "Failed to fetch task details.",
            Endpoint::UpdateTask(_) => "Failed to update the task.",
            Endpoint::DeleteTask(_) => "Failed to delete the task.",
        }
    }
}

/// Calls against the task service.
///
/// Each call is a single attempt. Authenticated calls take the bearer token
/// explicitly so the caller decides which session they act for.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;

    async fn register(&self, request: &RegisterRequest) -> ClientResult<()>;

    async fn refresh(&self, refresh_token: &str) -> ClientResult<RefreshResponse>;

    async fn profile(&self, token: &str) -> ClientResult<User>;

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ClientResult<User>;

    async fn list_tasks(&self, token: &str) -> ClientResult<Vec<Task>>;

    async fn create_task(&self, token: &str, draft: &TaskDraft) -> ClientResult<Task>;

    async fn fetch_task(&self, token: &str, id: TaskId) -> ClientResult<Task>;

    async fn update_task(&self, token: &str, id: TaskId, draft: &TaskDraft) -> ClientResult<Task>;

    async fn delete_task(&self, token: &str, id: TaskId) -> ClientResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::ListTasks.path(), "tasks/list/");
        assert_eq!(Endpoint::FetchTask(4).path(), "tasks/4/");
        assert_eq!(Endpoint::UpdateTask(4).path(), "tasks/4/");
        assert_eq!(Endpoint::DeleteTask(4).path(), "tasks/delete/4/");
        assert_eq!(Endpoint::UpdateTask(4).method(), reqwest::Method::PUT);
        assert_eq!(Endpoint::UpdateProfile.path(), "user/update-profile/");
        assert_eq!(Endpoint::UpdateProfile.method(), reqwest::Method::PUT);
    }

    #[test]
    fn test_profile_update_emptiness() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            email: Some("ada@example.com".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_task_list_accepts_both_shapes() {
        let task = serde_json::json!({
            "id": 1, "title": "a", "description": "", "priority": "low",
            "status": "hold", "deadline": "2025-01-01"
        });

        let page = serde_json::json!({"count": 1, "next": null, "results": [task.clone()]});
        let paged: TaskListBody = serde_json::from_value(page).unwrap();
        assert_eq!(paged.into_tasks().len(), 1);

        let plain: TaskListBody = serde_json::from_value(serde_json::json!([task])).unwrap();
        assert_eq!(plain.into_tasks().len(), 1);
    }

    #[test]
    fn test_login_response_without_user() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"access": "a", "refresh": "r"}"#).unwrap();
        assert!(response.user.is_none());
        assert_eq!(response.refresh.as_deref(), Some("r"));
    }
}
