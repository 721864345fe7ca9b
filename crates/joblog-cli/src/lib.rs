//! Command-line adapter for the job-log viewer.
//!
//! `main.rs` parses arguments, [`bootstrap`] wires the HTTP client into a
//! [`CliContext`], and [`run_viewer`] drives a `JobLogViewer` that renders
//! into the terminal.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings; these are used by tests/
#[cfg(test)]
use axum as _;
#[cfg(test)]
use futures_util as _;

// Used by main.rs
use anyhow as _;
use dotenvy as _;
use tokio as _;

pub mod bootstrap;
pub mod error;
pub mod logging;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, run_viewer};
pub use error::CliError;
pub use parser::Cli;
pub use presentation::{OutputFormat, TerminalContainer};
