//! `reqwest` implementation of [`TaskApi`].

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use taskboard_core::{Task, TaskDraft, TaskId, User};
use tracing::{debug, warn};

use crate::api::{
    Endpoint, LoginRequest, LoginResponse, ProfileUpdate, ProfileUpdateBody, RefreshRequest,
    RefreshResponse, RegisterRequest, TaskApi, TaskListBody,
};
use crate::error::{ClientError, ClientResult, server_message};

/// Server used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Path prefix of the REST API on the server.
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Helper function to join URL segments properly
fn join_url_segments(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// HTTP client for the task service.
#[derive(Clone, Debug)]
pub struct TaskApiClient {
    client: reqwest::Client,
    server_url: String,
    base_path: String,
}

/// Builder for [`TaskApiClient`].
pub struct TaskApiClientBuilder {
    server_url: String,
    base_path: String,
}

impl Default for TaskApiClientBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

impl TaskApiClientBuilder {
    /// Create a new client builder with the required server URL
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }

    /// Override the API path prefix (default `/api`).
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build
    pub fn build(self) -> ClientResult<TaskApiClient> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Build)?;

        Ok(TaskApiClient {
            client,
            server_url: self.server_url,
            base_path: self.base_path,
        })
    }
}

impl TaskApiClient {
    pub fn builder(server_url: impl Into<String>) -> TaskApiClientBuilder {
        TaskApiClientBuilder::new(server_url)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Absolute URL of an endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        join_url_segments(
            &join_url_segments(&self.server_url, &self.base_path),
            &endpoint.path(),
        )
    }

    fn request(
        &self,
        endpoint: Endpoint,
        token: Option<&str>,
    ) -> ClientResult<reqwest::RequestBuilder> {
        let mut request_builder = self.client.request(endpoint.method(), self.url(endpoint));

        if let Some(token) = token {
            if token.trim().is_empty() {
                return Err(ClientError::MissingToken);
            }
            request_builder =
                request_builder.header("Authorization", format!("Bearer {}", token));
        }

        Ok(request_builder)
    }

    /// Sends the request once and converts non-2xx responses to errors.
    async fn send(
        &self,
        endpoint: Endpoint,
        request_builder: reqwest::RequestBuilder,
    ) -> ClientResult<reqwest::Response> {
        debug!(method = %endpoint.method(), path = %endpoint.path(), "Sending request");

        let response = request_builder.send().await.map_err(|e| {
            warn!(path = %endpoint.path(), error = %e, "Request failed");
            ClientError::from_transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(path = %endpoint.path(), status = status.as_u16(), "Request succeeded");
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        let message = server_message(&error_text)
            .unwrap_or_else(|| endpoint.fallback_message().to_string());
        warn!(
            path = %endpoint.path(),
            status = status.as_u16(),
            %message,
            "Server rejected request"
        );

        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn call<B, R>(
        &self,
        endpoint: Endpoint,
        token: Option<&str>,
        body: Option<&B>,
    ) -> ClientResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let mut request_builder = self.request(endpoint, token)?;
        if let Some(body) = body {
            request_builder = request_builder.json(body);
        }
        let response = self.send(endpoint, request_builder).await?;
        response.json().await.map_err(ClientError::from_transport)
    }

    /// Like `call` but sends the body URL-encoded, for form-only views.
    async fn call_form<B, R>(&self, endpoint: Endpoint, token: &str, body: &B) -> ClientResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let request_builder = self.request(endpoint, Some(token))?.form(body);
        let response = self.send(endpoint, request_builder).await?;
        response.json().await.map_err(ClientError::from_transport)
    }

    /// Like `call` but ignores the response body.
    async fn call_unit<B>(
        &self,
        endpoint: Endpoint,
        token: Option<&str>,
        body: Option<&B>,
    ) -> ClientResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut request_builder = self.request(endpoint, token)?;
        if let Some(body) = body {
            request_builder = request_builder.json(body);
        }
        self.send(endpoint, request_builder).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskApi for TaskApiClient {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.call(Endpoint::Login, None, Some(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        self.call_unit(Endpoint::Register, None, Some(request)).await
    }

    async fn refresh(&self, refresh_token: &str) -> ClientResult<RefreshResponse> {
        let request = RefreshRequest {
            refresh: refresh_token.to_string(),
        };
        self.call(Endpoint::Refresh, None, Some(&request)).await
    }

    async fn profile(&self, token: &str) -> ClientResult<User> {
        self.call::<(), _>(Endpoint::Profile, Some(token), None).await
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ClientResult<User> {
        let body: ProfileUpdateBody = self.call_form(Endpoint::UpdateProfile, token, update).await?;
        Ok(body.data)
    }

    async fn list_tasks(&self, token: &str) -> ClientResult<Vec<Task>> {
        let body: TaskListBody =
            self.call::<(), _>(Endpoint::ListTasks, Some(token), None).await?;
        Ok(body.into_tasks())
    }

    async fn create_task(&self, token: &str, draft: &TaskDraft) -> ClientResult<Task> {
        self.call(Endpoint::CreateTask, Some(token), Some(draft)).await
    }

    async fn fetch_task(&self, token: &str, id: TaskId) -> ClientResult<Task> {
        self.call::<(), _>(Endpoint::FetchTask(id), Some(token), None).await
    }

    async fn update_task(&self, token: &str, id: TaskId, draft: &TaskDraft) -> ClientResult<Task> {
        self.call(Endpoint::UpdateTask(id), Some(token), Some(draft)).await
    }

    async fn delete_task(&self, token: &str, id: TaskId) -> ClientResult<()> {
        self.call_unit::<()>(Endpoint::DeleteTask(id), Some(token), None).await
    }
}
