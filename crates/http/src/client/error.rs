//! Client error types

use console_core::{CoreError, SessionConfig};
use std::time::Duration;
use thiserror::Error;

fn or_default(message: Option<&String>) -> &str {
    message.map_or(SessionConfig::DEFAULT_ERROR_MESSAGE, String::as_str)
}

/// Client error types
///
/// Covers the three failure classes of an admin call: transport problems, errors
/// reported by the backend, and authentication denial.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, timeout or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// No response within the per-call deadline
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Backend rejected the credential (401)
    #[error("Authentication failed: {}", or_default(.0.as_ref()))]
    AuthenticationFailed(Option<String>),

    /// Forbidden (403)
    #[error("Forbidden: {}", or_default(.0.as_ref()))]
    Forbidden(Option<String>),

    /// Resource not found (404)
    #[error("Resource not found: {}", or_default(.0.as_ref()))]
    NotFound(Option<String>),

    /// Bad request (400)
    #[error("Bad request: {}", or_default(.0.as_ref()))]
    BadRequest(Option<String>),

    /// Any other non-success status
    #[error("Server error {status}: {}", or_default(.message.as_ref()))]
    ServerError {
        status: u16,
        message: Option<String>,
    },

    /// Success body did not match the expected payload
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rejected before anything was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Session store failure
    #[error(transparent)]
    Session(#[from] CoreError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code and the message extracted from the body
    pub fn from_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::BadRequest(_) => Some(400),
            Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend denied the session credential
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the call hit the client-side timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Request(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Message provided by the backend error body
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::AuthenticationFailed(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::ServerError { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text shown to the user for this failure
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidInput(message) => message,
            _ => self
                .server_message()
                .unwrap_or(SessionConfig::DEFAULT_ERROR_MESSAGE),
        }
    }
}

/// Pull the human-readable `error` field out of an error body
///
/// Bodies that are not JSON, lack the field, or carry an empty or non-string value
/// yield `None`.
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
