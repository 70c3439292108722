use thiserror::Error;

/// Generic message for transport failures.
pub const NETWORK_ERROR_MESSAGE: &str = "A network error occurred. Please try again.";

/// Errors surfaced by [`TaskApi`](crate::TaskApi) calls.
///
/// `Display` is the human-readable message meant for inline display.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An authenticated call was attempted without an access token.
    #[error("Authentication token is missing. Please log in.")]
    MissingToken,

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("A network error occurred. Please try again.")]
    Network(#[source] reqwest::Error),

    /// A 2xx response whose body could not be decoded.
    #[error("Unexpected response from server.")]
    Decode(#[source] reqwest::Error),

    #[error("Failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// Classifies a `reqwest` failure from sending or reading a response.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode(error)
        } else {
            ClientError::Network(error)
        }
    }

    /// HTTP status for server-side rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::MissingToken) || self.status() == Some(401)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Pulls a human-readable message out of an error body.
///
/// The service reports errors as `{"detail": ..}`, `{"message": ..}`,
/// `{"error": ..}` or as serializer errors keyed by field.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["detail", "message", "error"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            if !message.trim().is_empty() {
                return Some(message.to_string());
            }
        }
    }
    value
        .get("non_field_errors")
        .and_then(|v| v.as_array())
        .and_then(|errors| errors.first())
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_prefers_detail() {
        let body = r#"{"detail": "Given token not valid", "message": "other"}"#;
        assert_eq!(server_message(body).as_deref(), Some("Given token not valid"));
    }

    #[test]
    fn test_server_message_fallbacks() {
        assert_eq!(
            server_message(r#"{"status": "error", "message": "Invalid data"}"#).as_deref(),
            Some("Invalid data")
        );
        assert_eq!(
            server_message(r#"{"error": "Username taken"}"#).as_deref(),
            Some("Username taken")
        );
        assert_eq!(
            server_message(r#"{"non_field_errors": ["Invalid username or password"]}"#).as_deref(),
            Some("Invalid username or password")
        );
    }

    #[test]
    fn test_server_message_ignores_unusable_bodies() {
        assert_eq!(server_message("<html>Bad Gateway</html>"), None);
        assert_eq!(server_message(r#"{"detail": ""}"#), None);
        assert_eq!(server_message(r#"{"username": ["This field is required."]}"#), None);
    }

    #[test]
    fn test_http_error_displays_message() {
        let error = ClientError::Http {
            status: 400,
            message: "Failed to fetch tasks.".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to fetch tasks.");
        assert_eq!(error.status(), Some(400));
        assert!(!error.is_unauthorized());
    }

    #[test]
    fn test_missing_token_is_unauthorized() {
        assert!(ClientError::MissingToken.is_unauthorized());
        assert!(
            ClientError::Http {
                status: 401,
                message: String::new()
            }
            .is_unauthorized()
        );
    }
}
