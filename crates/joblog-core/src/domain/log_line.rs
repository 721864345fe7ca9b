//! Log line types and error highlighting.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::ConfigError;

/// Pattern used to flag lines as errors when none is configured.
pub const DEFAULT_ERROR_PATTERN: &str = "error";

static DEFAULT_ERROR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(DEFAULT_ERROR_PATTERN)
        .case_insensitive(true)
        .build()
        .expect("default error pattern is a valid regex")
});

/// Where a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSource {
    /// Part of the full log fetched when the viewer starts.
    FullLog,
    /// Pushed by the server over the live subscription.
    Stream,
    /// Produced by the viewer itself to report a failure.
    Synthetic,
}

/// A single entry of the job log display.
///
/// Lines are created when received and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    text: String,
    is_error: bool,
    source: LineSource,
}

impl LogLine {
    /// Create a line, flagging it as an error when `matcher` matches its text.
    pub fn classified(text: impl Into<String>, source: LineSource, matcher: &ErrorMatcher) -> Self {
        let text = text.into();
        let is_error = matcher.is_match(&text);
        Self {
            text,
            is_error,
            source,
        }
    }

    /// Create a line that is always rendered as an error.
    pub fn error(text: impl Into<String>, source: LineSource) -> Self {
        Self {
            text: text.into(),
            is_error: true,
            source,
        }
    }

    /// Create a viewer-generated error line.
    pub fn synthetic_error(text: impl Into<String>) -> Self {
        Self::error(text, LineSource::Synthetic)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn is_error(&self) -> bool {
        self.is_error
    }

    pub const fn source(&self) -> LineSource {
        self.source
    }
}

/// Case-insensitive matcher deciding which lines are highlighted as errors.
#[derive(Debug, Clone)]
pub struct ErrorMatcher {
    regex: Regex,
}

impl ErrorMatcher {
    /// Compile a custom pattern. Matching is always case-insensitive.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(|regex| Self { regex })
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Whether `text` should be rendered as an error.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for ErrorMatcher {
    fn default() -> Self {
        Self {
            regex: DEFAULT_ERROR_REGEX.clone(),
        }
    }
}

/// Split a full-log body into the lines to render.
///
/// Splits on `\n` and `\r\n`. Fully empty lines are dropped; lines holding
/// only whitespace are kept.
pub fn split_full_log(body: &str) -> impl Iterator<Item = &str> {
    body.lines().filter(|line| !line.is_empty())
}
