//! Incremental server-sent-events decoder.
//!
//! Bytes arrive in arbitrary chunks from the response body; the decoder
//! buffers partial lines and yields an [`SseEvent`] each time a blank line
//! closes an event. [`event_stream`] turns a body byte stream into the
//! viewer's [`StreamEvent`]s.
//!
//! Wire format:  `event: error\ndata: disk full\n\n`

use std::collections::VecDeque;
use std::fmt::Display;
use std::time::Duration;

use bytes::{Buf, Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use joblog_core::StreamEvent;
use tracing::{debug, trace, warn};

const BOM: &[u8] = b"\xEF\xBB\xBF";
const DEFAULT_EVENT_TYPE: &str = "message";

/// One dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event type; `message` when the server did not name it
    pub event: String,
    /// Data lines joined with `\n`
    pub data: String,
    /// Last event id seen so far, if any
    pub id: Option<String>,
}

/// Stateful decoder for one connection.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: BytesMut,
    data: String,
    event_type: String,
    last_event_id: Option<String>,
    retry: Option<Duration>,
    bom_checked: bool,
    skip_lf: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and collect the events it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buf.extend_from_slice(chunk);

        if !self.bom_checked {
            if self.buf.len() < BOM.len() && BOM.starts_with(&self.buf) {
                // Could still become a BOM.
                return Vec::new();
            }
            if self.buf.starts_with(BOM) {
                self.buf.advance(BOM.len());
            }
            self.bom_checked = true;
        }

        let mut events = Vec::new();
        while let Some(line) = self.next_line() {
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Id of the last event that set one.
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_event_id.as_deref()
    }

    /// Reconnection delay requested by the server. Recorded only; the
    /// viewer never reconnects.
    pub const fn retry(&self) -> Option<Duration> {
        self.retry
    }

    /// Split the next complete line off the buffer.
    ///
    /// Lines end with `\r\n`, `\n` or `\r`. A `\r` that ends the buffer
    /// completes its line immediately; a `\n` at the start of the next chunk
    /// is then skipped.
    fn next_line(&mut self) -> Option<BytesMut> {
        if self.skip_lf {
            if self.buf.is_empty() {
                return None;
            }
            if self.buf[0] == b'\n' {
                self.buf.advance(1);
            }
            self.skip_lf = false;
        }

        let end = self.buf.iter().position(|&b| b == b'\n' || b == b'\r')?;
        let line = self.buf.split_to(end);
        let terminator = self.buf[0];
        self.buf.advance(1);

        if terminator == b'\r' {
            if self.buf.is_empty() {
                self.skip_lf = true;
            } else if self.buf[0] == b'\n' {
                self.buf.advance(1);
            }
        }

        Some(line)
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            // Comment / keep-alive.
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => value.clone_into(&mut self.event_type),
            "data" => {
                self.data.push_str(value);
                self.data.push('\n');
            }
            "id" => {
                if !value.contains('\0') {
                    self.last_event_id = Some(value.to_string());
                }
            }
            "retry" => {
                if value.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(millis) = value.parse::<u64>() {
                        self.retry = Some(Duration::from_millis(millis));
                    }
                }
            }
            other => trace!(field = other, "Ignoring unknown SSE field"),
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event_type = std::mem::take(&mut self.event_type);
        if self.data.is_empty() {
            return None;
        }

        let mut data = std::mem::take(&mut self.data);
        if data.ends_with('\n') {
            data.pop();
        }

        Some(SseEvent {
            event: if event_type.is_empty() {
                DEFAULT_EVENT_TYPE.to_string()
            } else {
                event_type
            },
            data,
            id: self.last_event_id.clone(),
        })
    }
}

/// Map a decoded event to what the viewer understands.
///
/// Only default `message` events and named `error` events are listened to.
fn to_stream_event(event: SseEvent) -> Option<StreamEvent> {
    match event.event.as_str() {
        DEFAULT_EVENT_TYPE => Some(StreamEvent::Message(event.data)),
        "error" => Some(StreamEvent::Error(
            Some(event.data).filter(|data| !data.is_empty()),
        )),
        other => {
            debug!(event = other, "Ignoring SSE event with no listener");
            None
        }
    }
}

/// State threaded through the `unfold` stream.
struct EventState<S> {
    stream: S,
    decoder: SseDecoder,
    pending: VecDeque<StreamEvent>,
    done: bool,
}

/// Convert a response body into viewer events.
///
/// A transport error or the end of the body yields one final
/// [`StreamEvent::ConnectionError`].
pub fn event_stream<S, E>(byte_stream: S) -> impl Stream<Item = StreamEvent> + Send + 'static
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = EventState {
        stream: byte_stream.boxed(),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        done: false,
    };

    futures_util::stream::unfold(state, |mut st| async move {
        loop {
            if let Some(event) = st.pending.pop_front() {
                return Some((event, st));
            }
            if st.done {
                return None;
            }

            match st.stream.next().await {
                Some(Ok(chunk)) => {
                    st.pending
                        .extend(st.decoder.push(&chunk).into_iter().filter_map(to_stream_event));
                }
                Some(Err(e)) => {
                    warn!("Upstream stream error: {e}");
                    st.done = true;
                    st.pending
                        .push_back(StreamEvent::ConnectionError(e.to_string()));
                }
                None => {
                    debug!("SSE body ended");
                    st.done = true;
                    st.pending.push_back(StreamEvent::ConnectionError(
                        "stream closed by server".to_string(),
                    ));
                }
            }
        }
    })
}
