//! Error types for the Postboard client
//!
//! Every failed request is classified into exactly one [`ClassifiedError`].
//! The `Display` output is the human-readable text shown inline by views.

use thiserror::Error;

/// Maximum number of characters of a response body kept in an error
pub const SNIPPET_LIMIT: usize = 200;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClassifiedError>;

/// Closed set of request failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifiedError {
    /// The server answered with a non-success status
    #[error("HTTP {status} {status_text}{}", suffix(.body_snippet))]
    HttpError {
        status: u16,
        status_text: String,
        body_snippet: String,
    },

    /// The server answered successfully but not with JSON
    #[error("Invalid JSON{}", suffix(.body_snippet))]
    InvalidContentType { body_snippet: String },

    /// The round trip could not complete, or the body could not be decoded
    #[error("Network error")]
    NetworkFailure { message: String },
}

impl ClassifiedError {
    /// Build an HTTP error, truncating the body
    pub fn http(status: u16, status_text: impl Into<String>, body: &str) -> Self {
        Self::HttpError {
            status,
            status_text: status_text.into(),
            body_snippet: snippet(body),
        }
    }

    /// Build a content-type error, truncating the body
    pub fn invalid_content_type(body: &str) -> Self {
        Self::InvalidContentType {
            body_snippet: snippet(body),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            message: message.into(),
        }
    }

    /// Underlying cause, more detailed than the display text
    pub fn detail(&self) -> &str {
        match self {
            Self::HttpError { body_snippet, .. } => body_snippet,
            Self::InvalidContentType { body_snippet } => body_snippet,
            Self::NetworkFailure { message } => message,
        }
    }
}

/// Truncate a body to at most [`SNIPPET_LIMIT`] characters
pub fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_LIMIT).collect()
}

fn suffix(body_snippet: &str) -> String {
    if body_snippet.is_empty() {
        String::new()
    } else {
        format!(": {}", body_snippet)
    }
}
