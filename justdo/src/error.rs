//! Error types for the JustDo client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while talking to the JustDo API or the
/// credential store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or connection failure
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// No credentials found -- user needs to `justdo login`
    #[error("not logged in. Run 'justdo login' first")]
    AuthRequired,

    /// 401 -- token invalid or expired
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// 404 -- task or diary entry not found
    #[error("{0}")]
    NotFound(String),

    /// Other API rejection with status code and extracted message
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// File system error from the credential store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Map an HTTP error status and its extracted body message to a variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            _ => Self::Api { status, message },
        }
    }

    /// Status code carried by HTTP-rejected requests, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
