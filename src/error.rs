//! Error types for the Parse client library.

use thiserror::Error;

/// The main error type for all Parse client operations.
///
/// A completed HTTP exchange is never an error, whatever its status code.
/// Callers inspect [`reqwest::Response::status`] themselves.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The base URL is not a valid absolute URL, or configuration is missing
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The request body could not be encoded as JSON
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request URL or a header value is structurally invalid
    #[error("Invalid request: {0}")]
    RequestConstruction(String),

    /// HTTP transport failed (connection, DNS, TLS, timeout), or the
    /// underlying HTTP client could not be built
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A middleware in the transport stack failed without a reqwest error
    #[error("HTTP request failed: {0}")]
    TransportMiddleware(#[from] reqwest_middleware::Error),
}

impl ParseError {
    /// Build a configuration error for a base URL that failed to parse.
    pub(crate) fn invalid_base_url(raw: &str, reason: impl std::fmt::Display) -> Self {
        Self::Config(format!("invalid base URL {raw:?}: {reason}"))
    }

    /// Check if this error happened while talking to the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::TransportMiddleware(_))
    }

    /// Check if this error was caused by a request timing out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            Self::TransportMiddleware(reqwest_middleware::Error::Reqwest(e)) => e.is_timeout(),
            _ => false,
        }
    }
}
