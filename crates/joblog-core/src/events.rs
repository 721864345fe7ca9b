//! Events yielded by a live log subscription.

/// One item from the server-push connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A default `message` event; the payload is one raw log line.
    Message(String),

    /// A named `error` event sent by the server. `None` when the event had
    /// no payload.
    Error(Option<String>),

    /// The connection itself failed or ended. No payload reaches the user;
    /// the reason is only logged.
    ConnectionError(String),
}

impl StreamEvent {
    /// Whether the viewer must stop listening after this event.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::ConnectionError(_))
    }
}
