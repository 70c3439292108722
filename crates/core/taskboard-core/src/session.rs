//! Authenticated user context.

use serde::{Deserialize, Serialize};

/// Identity of the logged-in user as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl User {
    /// A user known only by name, used when the login response omits the record.
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: None,
            photo: None,
        }
    }
}

/// Tokens and identity obtained from a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: User,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>, user: User) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            user,
        }
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    /// Replaces the access token after a refresh. A rotated refresh token
    /// replaces the stored one.
    pub fn refresh(&mut self, access_token: String, refresh_token: Option<String>) {
        self.access_token = access_token;
        if refresh_token.is_some() {
            self.refresh_token = refresh_token;
        }
    }
}
