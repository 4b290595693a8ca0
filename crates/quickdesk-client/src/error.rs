//! Client-side error type.

use thiserror::Error;

/// Status reported for failures that never produced an HTTP response.
pub const TRANSPORT_STATUS: u16 = 0;

/// Message used when a failed response carries no `message` field.
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// A failed API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {status})")]
pub struct ApiError {
    /// HTTP status, or `0` for transport failures.
    pub status: u16,
    /// Server-provided message or [`FALLBACK_MESSAGE`].
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Connection refused, timeout, bad URL and the like.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::new(TRANSPORT_STATUS, err.to_string())
    }

    /// Builds the error for a non-success response from its JSON body.
    pub fn from_body(status: u16, body: Option<&serde_json::Value>) -> Self {
        let message = body
            .and_then(|b| b.get("message"))
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_MESSAGE);
        Self::new(status, message)
    }

    pub fn is_transport(&self) -> bool {
        self.status == TRANSPORT_STATUS
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}
