//! The job-log viewer controller.
//!
//! A viewer renders the full log of a job, then subscribes to the stream of
//! new lines and appends them until the stream reports an error. It owns its
//! display surface and its connection; there is no shared state between
//! viewers.

use std::sync::Arc;

use futures_util::StreamExt;
use tracing::{debug, error, info, warn};

use crate::domain::{ContainerAttributes, ErrorMatcher, LineSource, LogLine, split_full_log};
use crate::error::LogSourceError;
use crate::events::StreamEvent;
use crate::ports::{FullLogPort, LogContainerPort, LogEventStream, LogStreamPort};

/// Line shown when the server sends an `error` event without a payload.
pub const DEFAULT_STREAM_ERROR: &str = "stream error";

/// Lifecycle of a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    /// Fetching and rendering the full log.
    Loading,
    /// Appending lines from the live subscription.
    Streaming,
    /// No connection; nothing more will be appended.
    Closed,
}

/// Renders a job log, then follows it live.
pub struct JobLogViewer<C: LogContainerPort> {
    container: C,
    attributes: ContainerAttributes,
    full_log: Arc<dyn FullLogPort>,
    stream: Arc<dyn LogStreamPort>,
    matcher: ErrorMatcher,
    state: ViewerState,
    full_log_loaded: bool,
    connection: Option<LogEventStream>,
    lines_appended: usize,
}

impl<C: LogContainerPort> JobLogViewer<C> {
    pub fn new(
        container: C,
        attributes: ContainerAttributes,
        full_log: Arc<dyn FullLogPort>,
        stream: Arc<dyn LogStreamPort>,
    ) -> Self {
        Self {
            container,
            attributes,
            full_log,
            stream,
            matcher: ErrorMatcher::default(),
            state: ViewerState::Loading,
            full_log_loaded: false,
            connection: None,
            lines_appended: 0,
        }
    }

    /// Replace the pattern used to highlight error lines.
    #[must_use]
    pub fn with_error_matcher(mut self, matcher: ErrorMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub const fn state(&self) -> ViewerState {
        self.state
    }

    pub const fn container(&self) -> &C {
        &self.container
    }

    /// Number of lines this viewer has appended, synthetic ones included.
    pub const fn lines_appended(&self) -> usize {
        self.lines_appended
    }

    pub fn into_container(self) -> C {
        self.container
    }

    /// Render everything logged so far.
    ///
    /// Runs at most once. Failures become a single error line; they never
    /// prevent streaming from starting afterwards.
    pub async fn load_full_log(&mut self) {
        if self.full_log_loaded || self.state != ViewerState::Loading {
            return;
        }
        self.full_log_loaded = true;

        let Some(url) = self.attributes.full_log_url().map(str::to_owned) else {
            debug!("No full-log URL configured; skipping initial load");
            return;
        };

        match self.full_log.fetch_full_log(&url).await {
            Ok(body) => {
                let mut count = 0usize;
                for text in split_full_log(&body) {
                    if self.container.is_closed() {
                        break;
                    }
                    let line = LogLine::classified(text, LineSource::FullLog, &self.matcher);
                    self.container.append(line);
                    count += 1;
                }
                self.lines_appended += count;
                self.container.scroll_to_bottom();
                info!(url = %url, lines = count, "Loaded full job log");
            }
            Err(LogSourceError::HttpStatus { status, .. }) => {
                warn!(url = %url, status, "Full log request failed");
                self.push_line(LogLine::synthetic_error(format!(
                    "Failed to load full log: HTTP {status}"
                )));
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Error fetching full log");
                self.push_line(LogLine::synthetic_error(format!(
                    "Failed to load full log: {e}"
                )));
            }
        }
    }

    /// Subscribe to new lines.
    ///
    /// Loads the full log first if that has not happened yet, so streamed
    /// lines always come after it. Returns whether a connection is active.
    pub async fn open_stream(&mut self) -> bool {
        match self.state {
            ViewerState::Streaming => return true,
            ViewerState::Closed => return false,
            ViewerState::Loading => {}
        }

        if !self.full_log_loaded {
            self.load_full_log().await;
        }
        if self.container.is_closed() {
            warn!("Display closed before streaming started");
            self.state = ViewerState::Closed;
            return false;
        }

        let Some(url) = self.attributes.stream_url().map(str::to_owned) else {
            info!("No stream URL configured; live updates disabled");
            self.state = ViewerState::Closed;
            return false;
        };

        match self.stream.subscribe(&url).await {
            Ok(connection) => {
                info!(url = %url, "Subscribed to job log stream");
                self.connection = Some(connection);
                self.state = ViewerState::Streaming;
                true
            }
            Err(e) => {
                error!(url = %url, error = %e, "Error occurred in SSE connection");
                self.state = ViewerState::Closed;
                false
            }
        }
    }

    /// Wait for the next stream event and apply it.
    ///
    /// Returns `false` once the connection is closed.
    pub async fn next_event(&mut self) -> bool {
        let Some(connection) = self.connection.as_mut() else {
            return false;
        };

        match connection.next().await {
            Some(event) => {
                let terminal = event.is_terminal();
                self.apply(event);
                if terminal {
                    self.close();
                }
            }
            None => {
                error!("Error occurred in SSE connection: stream ended");
                self.close();
            }
        }

        self.state == ViewerState::Streaming
    }

    /// Drop the connection. Safe to call more than once.
    pub fn close(&mut self) {
        if self.connection.take().is_some() {
            info!("Closed job log stream");
        }
        self.state = ViewerState::Closed;
    }

    /// Load the full log, then follow the stream until it closes.
    ///
    /// Never fails: every problem is rendered or logged. Returns the
    /// container with everything that was appended.
    pub async fn run(mut self) -> C {
        self.load_full_log().await;
        if self.open_stream().await {
            while self.next_event().await {}
        }
        self.close();
        self.container
    }

    fn apply(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Message(text) => {
                let line = LogLine::classified(text, LineSource::Stream, &self.matcher);
                self.push_line(line);
            }
            StreamEvent::Error(payload) => {
                let text = payload
                    .filter(|p| !p.is_empty())
                    .unwrap_or_else(|| DEFAULT_STREAM_ERROR.to_string());
                warn!(message = %text, "Server reported a stream error");
                self.push_line(LogLine::error(text, LineSource::Stream));
            }
            StreamEvent::ConnectionError(reason) => {
                error!(reason = %reason, "Error occurred in SSE connection");
            }
        }
    }

    fn push_line(&mut self, line: LogLine) {
        if self.container.is_closed() {
            return;
        }
        self.container.append(line);
        self.lines_appended += 1;
        self.container.scroll_to_bottom();
        if self.container.is_closed() {
            warn!("Display closed; dropping the job log stream");
            self.close();
        }
    }
}
