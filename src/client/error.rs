//! Failure taxonomy of a single prediction call.

use std::error::Error as StdError;

use thiserror::Error;

use crate::wire::GENERIC_FAILURE_MESSAGE;

/// Errors produced while talking to the scoring service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Endpoint URL is unusable.
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Connection refused, DNS failure, broken connection.
    #[error("{message}")]
    Transport { message: String },

    /// No response within the configured request timeout.
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Service answered with a non-2xx status.
    #[error("Server returned {status}: {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    Server { status: u16, detail: Option<String> },

    /// Success status but the body is not a prediction.
    #[error("Failed to parse response: {message}")]
    Parse { message: String },
}

impl ClientError {
    /// Plain-text message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            other => other.to_string(),
        }
    }

    /// Stable identifier for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::InvalidEndpoint { .. } => "invalid_endpoint",
            ClientError::Transport { .. } => "transport",
            ClientError::Timeout { .. } => "timeout",
            ClientError::Server { .. } => "server",
            ClientError::Parse { .. } => "parse",
        }
    }
}

/// Render an error together with its source chain.
///
/// HTTP client errors keep the interesting part ("Connection refused")
/// in their sources, not in the top-level message.
pub fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}
