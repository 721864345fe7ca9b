//! Error types for the HTTP adapters.
//!
//! These errors are mapped to [`LogSourceError`] at the port boundary.

use joblog_core::LogSourceError;
use thiserror::Error;

/// Result type alias for HTTP adapter operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors raised while talking to the log endpoints.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The endpoint answered with a non-success status.
    #[error("Request failed with status {status}: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The stream endpoint did not answer with `text/event-stream`.
    #[error("Expected text/event-stream from {url}, got '{content_type}'")]
    NotEventStream {
        /// The content type that was returned
        content_type: String,
        /// The URL that was requested
        url: String,
    },

    /// A relative URL was given but no base URL is configured.
    #[error("Cannot resolve relative URL '{0}' without a base URL")]
    RelativeWithoutBase(String),

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<HttpError> for LogSourceError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, url } => Self::HttpStatus { status, url },
            HttpError::NotEventStream { .. } | HttpError::InvalidHeader(_) => {
                Self::InvalidResponse(err.to_string())
            }
            HttpError::RelativeWithoutBase(_) | HttpError::InvalidUrl(_) => {
                Self::InvalidUrl(err.to_string())
            }
            HttpError::Network(e) => Self::Network(e.to_string()),
        }
    }
}
