//! Domain-level error types.
//!
//! Adapters map their transport errors into [`LogSourceError`] at the port
//! boundary so the viewer never sees `reqwest` or `url` types.

use thiserror::Error;

/// Errors reported by the full-log and stream endpoints.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LogSourceError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The request could not be sent or the body could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint URL could not be parsed or resolved.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The endpoint answered, but not with what the viewer expects.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors raised while configuring the viewer, before any network activity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The error-highlighting pattern is not a valid regular expression.
    #[error("Invalid error pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The rejected pattern
        pattern: String,
        /// Why the regex engine rejected it
        message: String,
    },
}
