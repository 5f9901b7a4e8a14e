//! Errors that can occur when talking to the backend.

use shared_types::errors::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; no request was sent.
    #[error("400: {0}")]
    Validation(#[from] ValidationError),

    /// Non-success response, with the body text (or the canonical reason
    /// phrase when the body was empty).
    #[error("{status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid base URL: {0:?}")]
    InvalidBaseUrl(String),

    /// The event stream ended or dropped; it will be retried.
    #[error("Event stream disconnected: {0}")]
    StreamDisconnected(String),
}

impl ClientError {
    /// Status-like code, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Validation(e) => Some(e.status()),
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
