//! HTTP adapters for the job-log viewer.
//!
//! [`HttpLogClient`] implements both endpoint ports from `joblog-core`:
//! the full log is a plain GET, live lines arrive as server-sent events and
//! go through the incremental [`SseDecoder`].
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod origin;
mod sse;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::HttpLogClient;

// Configuration
pub use config::HttpClientConfig;

// Errors
pub use error::{HttpError, HttpResult};

// SSE decoding
pub use sse::{SseDecoder, SseEvent, event_stream};

// Silence unused dev-dependency warnings
#[cfg(test)]
use axum as _;
