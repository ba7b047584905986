/*
[INPUT]:  Error sources (configuration, transport, HTTP status, serialization)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the LocalBitcoins adapter
#[derive(Error, Debug)]
pub enum LocalbitcoinsError {
    /// Credentials or client settings are missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP verb outside GET/POST/PUT/PATCH/DELETE/HEAD
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// HTTP request failed inside the reqwest transport
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by a custom transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// API answered with a non-success status
    #[error("Server error (status {status}): {body}")]
    Server { status: u16, body: String },

    /// Response body could not be deserialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration file could not be parsed
    #[error("Invalid config file: {0}")]
    ConfigFile(#[from] serde_yaml::Error),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocalbitcoinsError {
    /// Check if the error is worth retrying by the caller
    ///
    /// Only connection failures, timeouts and 5xx/429 statuses qualify; request
    /// building and body decoding errors fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            LocalbitcoinsError::Http(err) => err.is_connect() || err.is_timeout(),
            LocalbitcoinsError::Transport(_) => true,
            LocalbitcoinsError::Server { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Check if error was raised before any network I/O because of bad settings
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            LocalbitcoinsError::Configuration(_)
                | LocalbitcoinsError::UnsupportedMethod(_)
                | LocalbitcoinsError::ConfigFile(_)
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            LocalbitcoinsError::Server { status, .. } => Some(*status),
            LocalbitcoinsError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create a server error from status code and raw body
    pub fn server_error(status: StatusCode, body: impl Into<String>) -> Self {
        LocalbitcoinsError::Server {
            status: status.as_u16(),
            body: body.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        LocalbitcoinsError::Configuration(message.into())
    }
}

/// Result type alias for LocalBitcoins operations
pub type Result<T> = std::result::Result<T, LocalbitcoinsError>;
