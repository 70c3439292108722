//! Page controllers and configuration behind the `taskboard` binary.
//!
//! Controllers hold the state of one screen and talk to the service through
//! an injected [`TaskApi`](taskboard_client::TaskApi); the binary's CLI
//! commands and terminal dashboard drive them.

pub mod config;
pub mod controllers;
