//! MCP server for Shortcut.com ticket management.
//!
//! This crate provides an MCP (Model Context Protocol) server that exposes
//! the Shortcut ticket tracker to AI assistants like Claude.
//!
//! # Architecture
//!
//! The server uses the `rmcp` crate for MCP protocol handling and wraps the
//! [`ShortcutClient`](shortcut_api::ShortcutClient) from the `shortcut-api`
//! crate. Every capability is a direct translation of one or two API calls;
//! the shaping of responses lives in [`models`].
//!
//! # Tools
//!
//! - `list_stories` - List stories with optional filters
//! - `search_stories` - Full-text story search
//! - `get_story_details` - Fetch a single story with comments
//! - `create_story` - Create a story
//! - `update_story` - Update story fields
//! - `add_comment` - Comment on a story
//! - `list_workflow_states` - All workflow states, flattened
//! - `list_projects` - All projects
//! - `list_members` - All workspace members
//!
//! # Resources
//!
//! - `shortcut://stories` - story summaries, filterable via query parameters
//! - `shortcut://story/{story_id}` - a single story
//!
//! # Prompts
//!
//! - `create_bug_report` - markdown bug report template
//! - `create_feature_request` - markdown feature request template

pub mod error;
pub mod models;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use server::ShortcutMcpServer;
