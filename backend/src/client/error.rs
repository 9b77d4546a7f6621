//! Errors surfaced by [`RecordsClient`](super::RecordsClient).

use reqwest::StatusCode;

use crate::domain::Error;

/// Failure talking to the records API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured base URL cannot carry path segments.
    #[error("invalid base URL `{url}`: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// Transport failure before a response was received.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with its error envelope.
    #[error("server returned {status}: {}", error.message())]
    Api { status: StatusCode, error: Error },

    /// The server answered with a non-success status and an unrecognised body.
    #[error("unexpected {status} response: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// A success response did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub(crate) fn invalid_base_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(error) => error.status(),
            Self::InvalidBaseUrl { .. } | Self::Decode(_) => None,
        }
    }

    /// Decoded server envelope, for [`ClientError::Api`] only.
    pub fn api_error(&self) -> Option<&Error> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}
