//! Terminal presentation.
//!
//! # Guidelines
//!
//! - Keep this module format-only: classification happens in `joblog-core`
//! - Write lines as they arrive; never buffer the whole log

pub mod terminal;

pub use terminal::{OutputFormat, TerminalContainer};
