//! Error types for the support site client.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Support site client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the API
    #[error("API error ({status} {status_text}): {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Build an API error from a response status and its body.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string());

        ApiError::Api {
            status: status.as_u16(),
            status_text,
            body,
        }
    }

    /// The HTTP status text for API errors, the error message otherwise.
    pub fn status_text(&self) -> String {
        match self {
            ApiError::Api { status_text, .. } => status_text.clone(),
            ApiError::Network(message) | ApiError::Parse(message) => message.clone(),
        }
    }

    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
