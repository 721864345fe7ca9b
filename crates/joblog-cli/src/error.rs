//! CLI-specific error types and mappings.
//!
//! Everything that can go wrong happens before the viewer starts; once it
//! runs, failures are rendered as log lines instead.

use joblog_core::ConfigError;
use joblog_http::HttpError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Io(_) => 74,       // EX_IOERR
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<HttpError> for CliError {
    fn from(err: HttpError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments("x".into()).exit_code(), 2);
        assert_eq!(CliError::Config("x".into()).exit_code(), 78);
        assert_eq!(CliError::Io("x".into()).exit_code(), 74);
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err: CliError = joblog_core::ErrorMatcher::new("(").unwrap_err().into();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("'('")));
    }

    #[test]
    fn test_io_error_mapping() {
        let err: CliError = std::io::Error::other("broken pipe").into();
        assert!(err.to_string().contains("broken pipe"));
    }
}
