//! Typed client for the Shortcut.com v3 REST API.
//!
//! This crate wraps the subset of the Shortcut API needed for ticket
//! management: stories, story search, comments, workflow states, projects,
//! and workspace members. Responses are deserialized into the record types
//! in [`domain`]; request payloads serialize only the fields that were set.
//!
//! Authentication uses a workspace API token sent in the `Shortcut-Token`
//! header on every request. The token and connection settings are loaded
//! from the environment via [`Config::from_env`].

pub mod client;
pub mod config;
pub mod domain;
pub mod error;

pub use client::ShortcutClient;
pub use config::Config;
pub use error::{Error, Result};
