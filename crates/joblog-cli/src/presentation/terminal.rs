//! Terminal implementation of the display surface.

use std::borrow::Cow;
use std::io::{self, IsTerminal, Stdout, Write};

use clap::ValueEnum;
use crossterm::style::{Stylize, style};
use joblog_core::{LogContainerPort, LogLine};
use tracing::warn;

/// How each line is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw text, error lines in red when colour is enabled
    Text,
    /// One JSON object per line: `{"text", "is_error", "source"}`
    Json,
}

/// Writes appended lines to a terminal (or any writer).
///
/// The terminal keeps its own scrollback, so the scroll height is the number
/// of rows written and the bottom is reached by flushing. The first write
/// failure closes the container; it is kept for [`Self::take_error`].
pub struct TerminalContainer<W: Write + Send> {
    out: W,
    format: OutputFormat,
    color: bool,
    rows: usize,
    scroll_offset: usize,
    failed: Option<io::Error>,
}

impl TerminalContainer<Stdout> {
    /// Write to stdout. Colour is dropped when stdout is not a terminal or
    /// `NO_COLOR` is set.
    pub fn stdout(format: OutputFormat, color: bool) -> Self {
        let stdout = io::stdout();
        let color = color && stdout.is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(stdout, format, color)
    }
}

impl<W: Write + Send> TerminalContainer<W> {
    pub const fn new(out: W, format: OutputFormat, color: bool) -> Self {
        Self {
            out,
            format,
            color,
            rows: 0,
            scroll_offset: 0,
            failed: None,
        }
    }

    /// Terminal rows written so far.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// The write error that closed the container, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.failed.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one line and return how many terminal rows it took.
    fn render(&mut self, line: &LogLine) -> io::Result<usize> {
        match self.format {
            OutputFormat::Text => {
                let text = sanitize(line.text());
                if self.color && line.is_error() {
                    writeln!(self.out, "{}", style(&text).red())?;
                } else {
                    writeln!(self.out, "{text}")?;
                }
                Ok(text.split('\n').count())
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, line).map_err(io::Error::other)?;
                writeln!(self.out)?;
                Ok(1)
            }
        }
    }

    fn fail(&mut self, error: io::Error, what: &str) {
        warn!(error = %error, "Failed to {what}; closing output");
        self.failed = Some(error);
    }
}

/// Escape control characters other than tab and newline so server text
/// cannot drive the terminal.
fn sanitize(text: &str) -> Cow<'_, str> {
    let is_unsafe = |c: char| c.is_control() && c != '\t' && c != '\n';
    if !text.chars().any(is_unsafe) {
        return Cow::Borrowed(text);
    }
    let mut clean = String::with_capacity(text.len());
    for c in text.chars() {
        if is_unsafe(c) {
            clean.extend(c.escape_default());
        } else {
            clean.push(c);
        }
    }
    Cow::Owned(clean)
}

impl<W: Write + Send> LogContainerPort for TerminalContainer<W> {
    fn append(&mut self, line: LogLine) {
        if self.failed.is_some() {
            return;
        }
        match self.render(&line) {
            Ok(rows) => self.rows += rows,
            Err(e) => self.fail(e, "write log line"),
        }
    }

    fn scroll_to_bottom(&mut self) {
        if self.failed.is_some() {
            return;
        }
        if let Err(e) = self.out.flush() {
            self.fail(e, "flush output");
            return;
        }
        self.scroll_offset = self.rows;
    }

    fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn max_scroll_offset(&self) -> usize {
        self.rows
    }

    fn is_closed(&self) -> bool {
        self.failed.is_some()
    }
}
