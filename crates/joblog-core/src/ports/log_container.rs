//! Display surface port.
//!
//! This port abstracts where log lines end up, allowing different
//! implementations for tests (in-memory buffer) and the CLI (terminal).

use crate::domain::LogLine;

/// Port for the append-only surface that shows the job log.
///
/// Appending cannot fail from the viewer's point of view; implementations
/// that write to a device log their own failures.
pub trait LogContainerPort: Send {
    /// Append one line after all previous ones.
    fn append(&mut self, line: LogLine);

    /// Move the scroll position to the newest line.
    fn scroll_to_bottom(&mut self);

    /// Current scroll position.
    fn scroll_offset(&self) -> usize;

    /// Largest scroll position given the current content.
    fn max_scroll_offset(&self) -> usize;

    /// Whether the surface has gone away (e.g. a closed pipe). Once this
    /// returns `true` the viewer stops appending and drops its connection.
    fn is_closed(&self) -> bool {
        false
    }
}
