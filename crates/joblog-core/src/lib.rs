//! Core domain types and port definitions for the job-log viewer.
//!
//! The viewer renders the full log of a job, then appends lines pushed by
//! the server as they arrive. Transport details live behind the ports in
//! [`ports`]; `joblog-http` provides the production adapters.
//!
//! # Structure
//!
//! - `domain` - Log lines, error highlighting, container attributes, the in-memory buffer
//! - `events` - Events yielded by a live log subscription
//! - `ports` - Trait abstractions for the display surface and the two endpoints
//! - `viewer` - The `JobLogViewer` controller
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod viewer;

// Re-export commonly used types for convenience
pub use domain::{
    ContainerAttributes, DEFAULT_ERROR_PATTERN, ErrorMatcher, FULL_LOG_URL_ATTR, LineSource,
    LogBuffer, LogLine, STREAM_URL_ATTR, split_full_log,
};
pub use error::{ConfigError, LogSourceError};
pub use events::StreamEvent;
pub use ports::{FullLogPort, LogContainerPort, LogEventStream, LogStreamPort};
pub use viewer::{DEFAULT_STREAM_ERROR, JobLogViewer, ViewerState};
