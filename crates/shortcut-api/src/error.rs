//! Error types for Shortcut API operations.

use thiserror::Error;

/// Errors that can occur when talking to the Shortcut API.
#[derive(Debug, Error)]
pub enum Error {
    /// The API token was not present in the environment.
    #[error("SHORTCUT_API_TOKEN environment variable is required")]
    MissingToken,

    /// The API token cannot be sent as an HTTP header value.
    #[error("API token is not a valid header value")]
    InvalidToken,

    /// The configured server port is not a valid port number.
    #[error("invalid SERVER_PORT value: '{0}'")]
    InvalidPort(String),

    /// The configured API base URL could not be parsed.
    #[error("invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// The HTTP request itself failed (connection, timeout, body decode).
    #[error("request to Shortcut API failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("Shortcut API returned {status}: {body}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, forwarded verbatim.
        body: String,
    },

    /// The requested story does not exist.
    #[error("story not found: {0}")]
    StoryNotFound(u64),
}

/// A specialized Result type for Shortcut API operations.
pub type Result<T> = std::result::Result<T, Error>;
