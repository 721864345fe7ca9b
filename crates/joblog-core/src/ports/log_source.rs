//! Endpoint ports: the one-shot full-log fetch and the live subscription.

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::error::LogSourceError;
use crate::events::StreamEvent;

/// A live subscription. Unbounded, lazy and not restartable; dropping it
/// closes the underlying connection.
pub type LogEventStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;

/// Port for fetching everything the job has logged so far.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FullLogPort: Send + Sync {
    /// Fetch the full log body as text.
    ///
    /// Non-success statuses are reported as [`LogSourceError::HttpStatus`].
    async fn fetch_full_log(&self, url: &str) -> Result<String, LogSourceError>;
}

/// Port for subscribing to lines logged from now on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogStreamPort: Send + Sync {
    /// Open the connection.
    ///
    /// Failures after the connection is open are delivered in-band as
    /// [`StreamEvent::ConnectionError`].
    async fn subscribe(&self, url: &str) -> Result<LogEventStream, LogSourceError>;
}
