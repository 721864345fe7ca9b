//! Core domain types.
//!
//! These types represent the viewer's model, independent of how lines are
//! fetched or where they are drawn.
//!
//! # Structure
//!
//! - `log_line` - `LogLine`, its source, error highlighting and full-log splitting
//! - `attributes` - The `data-*` attributes that configure a viewer
//! - `log_buffer` - In-memory display surface with a scroll position

mod attributes;
mod log_buffer;
mod log_line;

pub use attributes::{ContainerAttributes, FULL_LOG_URL_ATTR, STREAM_URL_ATTR};
pub use log_buffer::{DEFAULT_VIEWPORT_ROWS, LogBuffer};
pub use log_line::{DEFAULT_ERROR_PATTERN, ErrorMatcher, LineSource, LogLine, split_full_log};
