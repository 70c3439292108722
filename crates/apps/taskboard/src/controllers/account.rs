//! Profile lookup and changes, and explicit token refresh.

use taskboard_client::{ClientError, ProfileUpdate};
use taskboard_core::{Session, User};
use tracing::{info, warn};

use super::{AppContext, Outcome, ValidationError, fail};

pub struct AccountController {
    ctx: AppContext,
    session: Option<Session>,
    profile: Option<User>,
    error: Option<String>,
}

impl AccountController {
    pub fn new(ctx: AppContext) -> Self {
        let session = ctx.current_session();
        Self {
            ctx,
            session,
            profile: None,
            error: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load_profile(&mut self) -> Outcome {
        let Some(session) = &self.session else {
            return fail(&mut self.error, ClientError::MissingToken.to_string());
        };

        match self.ctx.api.profile(&session.access_token).await {
            Ok(user) => {
                self.profile = Some(user);
                self.error = None;
                Outcome::Stay
            }
            Err(e) => {
                warn!(error = %e, "Failed to load profile");
                fail(&mut self.error, e.to_string())
            }
        }
    }

    /// Changes username, email or password. A new username is carried into
    /// the stored session.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Outcome {
        if update.is_empty() {
            return fail(&mut self.error, ValidationError::NoProfileChanges.to_string());
        }
        let Some(session) = self.session.as_mut() else {
            return fail(&mut self.error, ClientError::MissingToken.to_string());
        };

        let user = match self.ctx.api.update_profile(&session.access_token, update).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Profile update failed");
                return fail(&mut self.error, e.to_string());
            }
        };

        session.user = user.clone();
        self.profile = Some(user);
        if let Err(e) = self.ctx.sessions.save(session) {
            return fail(&mut self.error, format!("Failed to store session: {e}"));
        }

        info!(username = %session.username(), "Profile updated");
        self.error = None;
        Outcome::Stay
    }

    /// Trades the refresh token for a new access token and stores it.
    pub async fn refresh(&mut self) -> Outcome {
        let refresh_token = self.session.as_ref().and_then(|s| s.refresh_token.clone());
        let Some(refresh_token) = refresh_token else {
            return fail(&mut self.error, ClientError::MissingToken.to_string());
        };

        let response = match self.ctx.api.refresh(&refresh_token).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                return fail(&mut self.error, e.to_string());
            }
        };

        let Some(session) = self.session.as_mut() else {
            return fail(&mut self.error, ClientError::MissingToken.to_string());
        };
        session.refresh(response.access, response.refresh);

        if let Err(e) = self.ctx.sessions.save(session) {
            return fail(&mut self.error, format!("Failed to store session: {e}"));
        }

        info!(username = %session.username(), "Access token refreshed");
        self.error = None;
        Outcome::Stay
    }
}
