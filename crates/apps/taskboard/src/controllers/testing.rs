//! In-process `TaskApi` double for controller tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use taskboard_client::{
    ClientError, ClientResult, LoginRequest, LoginResponse, MemorySessionStore, ProfileUpdate,
    RefreshResponse, RegisterRequest, SessionStore, TaskApi,
};
use taskboard_core::{Session, Task, TaskDraft, TaskId, TaskPriority, TaskStatus, User, parse_date};

use super::AppContext;

pub(crate) struct FakeApi {
    calls: Mutex<Vec<&'static str>>,
    tasks: Mutex<Vec<Task>>,
    login_user: bool,
    reject_all: Option<(u16, String)>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            tasks: Mutex::new(Vec::new()),
            login_user: true,
            reject_all: None,
        }
    }

    pub(crate) fn with_tasks(self, tasks: Vec<Task>) -> Self {
        *self.tasks.lock().unwrap() = tasks;
        self
    }

    pub(crate) fn without_login_user(mut self) -> Self {
        self.login_user = false;
        self
    }

    /// Every authenticated call fails with this status and message.
    pub(crate) fn rejecting(mut self, status: u16, message: &str) -> Self {
        self.reject_all = Some((status, message.to_string()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.lock().unwrap().iter().map(|t| t.id).collect()
    }

    fn record(&self, call: &'static str, token: Option<&str>) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        if let Some(token) = token {
            if token.is_empty() {
                return Err(ClientError::MissingToken);
            }
        }
        match (&self.reject_all, token) {
            (Some((status, message)), Some(_)) => Err(ClientError::Http {
                status: *status,
                message: message.clone(),
            }),
            _ => Ok(()),
        }
    }
}

fn task_from_draft(id: TaskId, draft: &TaskDraft) -> Task {
    Task {
        id,
        title: draft.title.clone(),
        description: draft.description.clone(),
        status: draft.status,
        priority: draft.priority,
        deadline: draft.deadline,
        created_at: None,
        updated_at: None,
    }
}

fn not_found() -> ClientError {
    ClientError::Http {
        status: 404,
        message: "No Task matches the given query.".to_string(),
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.record("login", None)?;
        if request.password != "secret" {
            return Err(ClientError::Http {
                status: 401,
                message: "Invalid credentials. Please try again.".to_string(),
            });
        }
        Ok(LoginResponse {
            access: "access-token".to_string(),
            refresh: Some("refresh-token".to_string()),
            user: self.login_user.then(|| User::named(request.username.clone())),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        self.record("register", None)?;
        if request.username == "taken" {
            return Err(ClientError::Http {
                status: 400,
                message: "A user with that username already exists.".to_string(),
            });
        }
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> ClientResult<RefreshResponse> {
        self.record("refresh", None)?;
        if refresh_token != "refresh-token" {
            return Err(ClientError::Http {
                status: 401,
                message: "Token is invalid or expired".to_string(),
            });
        }
        Ok(RefreshResponse {
            access: "refreshed-token".to_string(),
            refresh: None,
        })
    }

    async fn profile(&self, token: &str) -> ClientResult<User> {
        self.record("profile", Some(token))?;
        Ok(User {
            id: Some(1),
            username: "ada".to_string(),
            email: Some("ada@example.com".to_string()),
            photo: None,
        })
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ClientResult<User> {
        self.record("update_profile", Some(token))?;
        if update.username.as_deref() == Some("taken") {
            return Err(ClientError::Http {
                status: 400,
                message: "This username is already taken".to_string(),
            });
        }
        Ok(User {
            id: Some(1),
            username: update.username.clone().unwrap_or_else(|| "ada".to_string()),
            email: update.email.clone().or_else(|| Some("ada@example.com".to_string())),
            photo: None,
        })
    }

    async fn list_tasks(&self, token: &str) -> ClientResult<Vec<Task>> {
        self.record("list_tasks", Some(token))?;
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn create_task(&self, token: &str, draft: &TaskDraft) -> ClientResult<Task> {
        self.record("create_task", Some(token))?;
        let task = task_from_draft(100, draft);
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn fetch_task(&self, token: &str, id: TaskId) -> ClientResult<Task> {
        self.record("fetch_task", Some(token))?;
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn update_task(&self, token: &str, id: TaskId, draft: &TaskDraft) -> ClientResult<Task> {
        self.record("update_task", Some(token))?;
        let mut tasks = self.tasks.lock().unwrap();
        let existing = tasks.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
        *existing = task_from_draft(id, draft);
        Ok(existing.clone())
    }

    async fn delete_task(&self, token: &str, id: TaskId) -> ClientResult<()> {
        self.record("delete_task", Some(token))?;
        let mut tasks = self.tasks.lock().unwrap();
        let index = tasks.iter().position(|t| t.id == id).ok_or_else(not_found)?;
        tasks.remove(index);
        Ok(())
    }
}

pub(crate) fn sample_task(
    id: TaskId,
    status: TaskStatus,
    priority: TaskPriority,
    deadline: &str,
) -> Task {
    Task {
        id,
        title: format!("Task {id}"),
        description: "details".to_string(),
        status,
        priority,
        deadline: parse_date(deadline).unwrap(),
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn logged_in_session() -> Session {
    Session::new("access-token", Some("refresh-token".to_string()), User::named("ada"))
}

/// Context with an empty session store.
pub(crate) fn context(api: FakeApi) -> (AppContext, Arc<FakeApi>, Arc<MemorySessionStore>) {
    let api = Arc::new(api);
    let store = Arc::new(MemorySessionStore::new());
    let ctx = AppContext::new(api.clone(), store.clone());
    (ctx, api, store)
}

/// Context whose store already holds a session.
pub(crate) fn logged_in_context(
    api: FakeApi,
) -> (AppContext, Arc<FakeApi>, Arc<MemorySessionStore>) {
    let (ctx, api, store) = context(api);
    store.save(&logged_in_session()).unwrap();
    (ctx, api, store)
}
