use taskboard_client::LoginRequest;
use taskboard_core::{Session, User};
use tracing::{info, warn};

use super::{AppContext, Outcome, Route, ValidationError, fail};

pub struct LoginController {
    ctx: AppContext,
    pub username: String,
    pub password: String,
    error: Option<String>,
}

impl LoginController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            username: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Logs in and persists the session. The store is only written on success.
    pub async fn submit(&mut self) -> Outcome {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return fail(&mut self.error, ValidationError::MissingCredentials.to_string());
        }

        let request = LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        };

        let response = match self.ctx.api.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(username = %request.username, error = %e, "Login failed");
                return fail(&mut self.error, e.to_string());
            }
        };

        let user = response
            .user
            .unwrap_or_else(|| User::named(request.username.clone()));
        let session = Session::new(response.access, response.refresh, user);

        if let Err(e) = self.ctx.sessions.save(&session) {
            return fail(&mut self.error, format!("Failed to store session: {e}"));
        }

        info!(username = %session.username(), "Logged in");
        self.password.clear();
        self.error = None;
        Outcome::Navigate(Route::Dashboard)
    }
}
