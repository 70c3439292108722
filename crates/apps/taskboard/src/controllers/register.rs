use taskboard_client::RegisterRequest;
use tracing::{info, warn};

use super::{AppContext, Outcome, Route, ValidationError, fail};

const SERVER_ERROR_MESSAGE: &str = "Server error, please try again later";

pub struct RegisterController {
    ctx: AppContext,
    pub username: String,
    pub email: String,
    pub password: String,
    error: Option<String>,
    success: Option<String>,
}

impl RegisterController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            username: String::new(),
            email: String::new(),
            password: String::new(),
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

    pub async fn submit(&mut self) -> Outcome {
        self.success = None;
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return fail(&mut self.error, ValidationError::MissingRegistrationFields.to_string());
        }

        let request = RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        match self.ctx.api.register(&request).await {
            Ok(()) => {
                info!(username = %request.username, "Registered");
                self.password.clear();
                self.error = None;
                self.success = Some("Registration successful!".to_string());
                Outcome::Navigate(Route::Login)
            }
            Err(e) if e.is_network() => {
                warn!(error = %e, "Registration request failed");
                fail(&mut self.error, SERVER_ERROR_MESSAGE)
            }
            Err(e) => {
                warn!(username = %request.username, error = %e, "Registration rejected");
                fail(&mut self.error, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::{FakeApi, context};
    use std::sync::Arc;
    use taskboard_client::{MemorySessionStore, SessionStore, TaskApiClient};

    fn filled(ctx: AppContext, username: &str) -> RegisterController {
        let mut register = RegisterController::new(ctx);
        register.username = username.to_string();
        register.email = "ada@example.com".to_string();
        register.password = "secret".to_string();
        register
    }

    #[tokio::test]
    async fn test_register_navigates_to_login() {
        let (ctx, api, store) = context(FakeApi::new());
        let mut register = filled(ctx, "ada");

        let outcome = register.submit().await;

        assert_eq!(outcome, Outcome::Navigate(Route::Login));
        assert_eq!(register.success(), Some("Registration successful!"));
        assert_eq!(api.calls(), vec!["register"]);
        // Registering does not log in.
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_requires_every_field() {
        let (ctx, api, _store) = context(FakeApi::new());
        let mut register = filled(ctx, "ada");
        register.email.clear();

        let outcome = register.submit().await;

        assert_eq!(outcome.error_message(), Some("All fields are required"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_surfaces_server_message() {
        let (ctx, _api, _store) = context(FakeApi::new());
        let mut register = filled(ctx, "taken");

        register.submit().await;

        assert_eq!(register.error(), Some("A user with that username already exists."));
        assert!(register.success().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_shows_server_error() {
        // Nothing listens on the discard port.
        let api = TaskApiClient::builder("http://127.0.0.1:9").build().unwrap();
        let ctx = AppContext::new(Arc::new(api), Arc::new(MemorySessionStore::new()));
        let mut register = filled(ctx, "ada");

        let outcome = register.submit().await;

        assert_eq!(
            outcome.error_message(),
            Some("Server error, please try again later")
        );
        assert_eq!(register.error(), Some("Server error, please try again later"));
        assert!(register.success().is_none());
    }
}
