//! Main CLI parser.
//!
//! The two endpoint flags stand in for the `data-full-log-url` and
//! `data-stream-url` attributes of the job page's log container.

use clap::Parser;
use joblog_core::DEFAULT_ERROR_PATTERN;

use crate::presentation::OutputFormat;

/// Show a job's log, then follow it live.
#[derive(Debug, Parser)]
#[command(name = "joblog")]
#[command(about = "Show a job's full log, then follow new lines as they arrive")]
#[command(version)]
pub struct Cli {
    /// Endpoint serving the full log so far (data-full-log-url)
    #[arg(long = "full-log-url", value_name = "URL")]
    pub full_log_url: Option<String>,

    /// Server-sent-events endpoint for new lines (data-stream-url)
    #[arg(long = "stream-url", value_name = "URL")]
    pub stream_url: Option<String>,

    /// Origin of the job page; relative URLs resolve against it
    #[arg(long = "base-url", env = "JOBLOG_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Cookie header sent to the page origin, e.g. "sessionid=..."
    #[arg(
        long = "session-cookie",
        env = "JOBLOG_SESSION",
        hide_env_values = true,
        value_name = "COOKIE"
    )]
    pub session_cookie: Option<String>,

    /// Extra header for same-origin requests, as "Name: value" (repeatable)
    #[arg(long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Case-insensitive regex marking error lines
    #[arg(long = "error-pattern", default_value = DEFAULT_ERROR_PATTERN, value_name = "REGEX")]
    pub error_pattern: String,

    /// Timeout for the full-log request, in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// How lines are written to stdout
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Never colour error lines
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
