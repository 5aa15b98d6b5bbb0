//! Error types for the Shortcut MCP server.

use thiserror::Error;

/// Errors that can occur in the Shortcut MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid argument value provided.
    #[error("Invalid {field}: '{value}'. Valid values: {valid_values}")]
    InvalidArgument {
        /// The field name that had an invalid value.
        field: &'static str,
        /// The invalid value that was provided.
        value: String,
        /// Description of valid values.
        valid_values: &'static str,
    },

    /// A resource URI that does not follow the `shortcut://` scheme.
    #[error("Invalid resource URI '{uri}': {reason}")]
    InvalidResourceUri {
        /// The URI that was requested.
        uri: String,
        /// Why it could not be parsed.
        reason: String,
    },

    /// A resource URI with a valid scheme but no matching resource.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// A prompt name the server does not provide.
    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    /// A required prompt argument was not supplied.
    #[error("Missing required prompt argument: {0}")]
    MissingPromptArgument(&'static str),

    /// An error from the Shortcut API client.
    #[error("Shortcut API error: {0}")]
    Api(#[from] shortcut_api::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Shortcut MCP operations.
pub type Result<T> = std::result::Result<T, Error>;
