//! Line framing for the serial console.
//!
//! Bytes arrive one at a time from the UART. A line ends at `\r`, `\n`
//! or `\r\n`; the terminator is not part of the line. The `\n` of a
//! CRLF pair is swallowed so it does not yield a second, empty line.

use heapless::{String, Vec};

/// Maximum accepted line length in bytes (excluding the terminator)
pub const MAX_LINE_LEN: usize = 64;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// A complete received line
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while assembling a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded `MAX_LINE_LEN` and was discarded
    Overflow,
    /// Line is not valid UTF-8
    InvalidUtf8,
}

/// Accumulates bytes into newline-terminated lines
#[derive(Debug, Clone)]
pub struct LineParser {
    buffer: Vec<u8, MAX_LINE_LEN>,
    /// Set once the current line has overrun the buffer
    overflowed: bool,
    /// Previous byte was a CR
    after_cr: bool,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Create a new line parser
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
            after_cr: false,
        }
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a line,
    /// `Ok(None)` when more bytes are needed, or `Err` when the finished
    /// line had to be dropped.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == CR);
        match byte {
            LF if after_cr => return Ok(None),
            CR | LF => {}
            _ => {
                if self.buffer.push(byte).is_err() {
                    // Keep swallowing bytes until the terminator resyncs us
                    self.overflowed = true;
                }
                return Ok(None);
            }
        }

        if self.overflowed {
            self.end_line();
            return Err(LineError::Overflow);
        }

        let result = match core::str::from_utf8(&self.buffer) {
            Ok(text) => {
                let mut line = Line::new();
                // Cannot fail: the buffer and the line share a capacity
                let _ = line.push_str(text);
                Ok(Some(line))
            }
            Err(_) => Err(LineError::InvalidUtf8),
        };

        self.end_line();
        result
    }

    /// Drop the finished line; `after_cr` carries over to the next byte
    fn end_line(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete line found, if any.
    /// Bytes after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}
