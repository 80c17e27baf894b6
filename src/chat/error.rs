//! Error types for the chat module.

use thiserror::Error;

/// Errors raised by chat calls and their entry guards.
#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Response body was not JSON of the expected shape.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Routine generation was requested with no product selected.
    #[error("no product selected")]
    NothingSelected,

    /// Follow-up question was empty after trimming.
    #[error("question is empty")]
    EmptyQuestion,
}

impl ChatError {
    /// Whether the error came from the network or response parsing,
    /// as opposed to an entry guard.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpRequest(_) | Self::HttpClient(_) | Self::InvalidUrl(_) | Self::JsonParse(_)
        )
    }
}

/// Convenience result alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;
