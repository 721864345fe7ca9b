//! In-memory display surface.

use crate::domain::LogLine;
use crate::ports::LogContainerPort;

/// Rows visible at once when no viewport height is given.
pub const DEFAULT_VIEWPORT_ROWS: usize = 40;

/// Append-only list of rendered lines with a scroll position.
///
/// The scroll height is the number of lines; the maximum scroll offset is
/// the number of lines that do not fit in the viewport.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Vec<LogLine>,
    viewport_rows: usize,
    scroll_offset: usize,
}

impl LogBuffer {
    /// Create an empty buffer showing `viewport_rows` lines at a time.
    pub const fn new(viewport_rows: usize) -> Self {
        Self {
            lines: Vec::new(),
            viewport_rows,
            scroll_offset: 0,
        }
    }

    /// All lines in append order.
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// Text of every line, in append order.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(LogLine::text).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_ROWS)
    }
}

impl LogContainerPort for LogBuffer {
    fn append(&mut self, line: LogLine) {
        self.lines.push(line);
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll_offset();
    }

    fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn max_scroll_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LineSource;

    fn line(text: &str) -> LogLine {
        LogLine::classified(text, LineSource::Stream, &crate::ErrorMatcher::default())
    }

    #[test]
    fn test_append_preserves_order() {
        let mut buffer = LogBuffer::new(10);
        buffer.append(line("first"));
        buffer.append(line("second"));
        buffer.append(line("third error"));

        assert_eq!(buffer.texts(), vec!["first", "second", "third error"]);
        assert_eq!(buffer.len(), 3);
        assert!(buffer.lines()[2].is_error());
    }

    #[test]
    fn test_no_scroll_while_content_fits() {
        let mut buffer = LogBuffer::new(5);
        for i in 0..5 {
            buffer.append(line(&format!("line {i}")));
        }
        buffer.scroll_to_bottom();
        assert_eq!(buffer.max_scroll_offset(), 0);
        assert_eq!(buffer.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_to_bottom_tracks_overflow() {
        let mut buffer = LogBuffer::new(3);
        for i in 0..10 {
            buffer.append(line(&format!("line {i}")));
            buffer.scroll_to_bottom();
            assert_eq!(buffer.scroll_offset(), buffer.max_scroll_offset());
        }
        assert_eq!(buffer.scroll_offset(), 7);
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = LogBuffer::default();
        assert!(buffer.is_empty());
        assert!(!buffer.is_closed());
        assert_eq!(buffer.max_scroll_offset(), 0);
    }
}
