//! Environment-based configuration.
//!
//! All settings come from environment variables. Only the API token is
//! required; everything else has a default.

use crate::error::{Error, Result};
use std::time::Duration;

/// Default base URL for the Shortcut v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api.app.shortcut.com/api/v3";

/// Default bind host for HTTP transports.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default bind port for HTTP transports.
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default timeout applied to every API request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration for the adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shortcut workspace API token.
    pub api_token: String,

    /// Base URL of the Shortcut API.
    pub base_url: String,

    /// Bind host for HTTP transports. The stdio transport does not bind.
    pub server_host: String,

    /// Bind port for HTTP transports. The stdio transport does not bind.
    pub server_port: u16,

    /// Timeout applied to every API request.
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Reads `SHORTCUT_API_TOKEN` (required), `SHORTCUT_API_BASE_URL`,
    /// `SERVER_HOST`, and `SERVER_PORT`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingToken`] if no token is set, or
    /// [`Error::InvalidPort`] if `SERVER_PORT` is not a port number.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("SHORTCUT_API_TOKEN").ok(),
            std::env::var("SHORTCUT_API_BASE_URL").ok(),
            std::env::var("SERVER_HOST").ok(),
            std::env::var("SERVER_PORT").ok(),
        )
    }

    /// Build configuration from already-read variable values.
    fn from_vars(
        token: Option<String>,
        base_url: Option<String>,
        host: Option<String>,
        port: Option<String>,
    ) -> Result<Self> {
        let api_token = match token {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(Error::MissingToken),
        };

        let server_port = match port {
            Some(p) => p.parse().map_err(|_| Error::InvalidPort(p))?,
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Self {
            api_token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            server_host: host.unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
            timeout: DEFAULT_TIMEOUT,
        })
    }
}
