//! Persistence of the login session between runs.
//!
//! The on-disk layout mirrors browser local storage: a flat map with the
//! keys `accessToken`, `refreshToken` and `user`, where `user` holds the
//! JSON-encoded user record as a string.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use taskboard_core::{Session, User};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Where the current session lives. Login initialises it, logout tears it down.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    fn clear(&self) -> Result<(), SessionStoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(rename = "refreshToken", default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    /// JSON-encoded [`User`].
    user: String,
}

impl StoredSession {
    fn from_session(session: &Session) -> Result<Self, SessionStoreError> {
        Ok(Self {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            user: serde_json::to_string(&session.user)?,
        })
    }

    fn into_session(self) -> Result<Session, SessionStoreError> {
        let user: User = serde_json::from_str(&self.user)?;
        Ok(Session::new(self.access_token, self.refresh_token, user))
    }
}

/// Session kept in a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionStoreError {
        SessionStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Opens the session file for writing, readable by the owner only.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredSession = serde_json::from_str(&contents)?;
        if stored.access_token.is_empty() {
            return Ok(None);
        }
        stored.into_session().map(Some)
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let contents = serde_json::to_string_pretty(&StoredSession::from_session(session)?)?;
        open_private(&self.path)
            .and_then(|mut file| file.write_all(contents.as_bytes()))
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| self.io_error(e))?;
            debug!(path = %self.path.display(), "Session cleared");
        }
        Ok(())
    }
}

/// Session kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let session = self.session.lock().map_err(|_| SessionStoreError::Poisoned)?;
        Ok(session.clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let mut current = self.session.lock().map_err(|_| SessionStoreError::Poisoned)?;
        *current = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let mut current = self.session.lock().map_err(|_| SessionStoreError::Poisoned)?;
        *current = None;
        Ok(())
    }
}
