//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the viewer expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `url` types in any signature
//! - Endpoints are addressed by the raw attribute string; resolving it is the adapter's job
//! - Closing a subscription is dropping its stream

mod log_container;
mod log_source;

pub use log_container::LogContainerPort;
pub use log_source::{FullLogPort, LogEventStream, LogStreamPort};

#[cfg(test)]
pub use log_source::{MockFullLogPort, MockLogStreamPort};
