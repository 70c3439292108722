//! Client side of the taskboard REST service.
//!
//! - [`TaskApi`]: the service operations as an async trait
//! - [`TaskApiClient`]: the `reqwest` implementation with bearer-token auth
//! - [`ClientError`]: missing token, HTTP rejection, transport failure
//! - [`SessionStore`]: where the login session is kept between runs

pub mod api;
pub mod client;
pub mod error;
pub mod session_store;

pub use api::{
    Endpoint, LoginRequest, LoginResponse, ProfileUpdate, RefreshRequest, RefreshResponse,
    RegisterRequest, TaskApi,
};
pub use client::{DEFAULT_BASE_PATH, DEFAULT_SERVER_URL, TaskApiClient, TaskApiClientBuilder};
pub use error::{ClientError, ClientResult, NETWORK_ERROR_MESSAGE};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreError};
