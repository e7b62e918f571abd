//! Off-line copy of the 16x2 LCD
//!
//! Readings are laid out here first and only then pushed to the panel.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows on the LCD
pub const SCREEN_ROWS: usize = 2;

/// Number of character columns on the LCD
pub const SCREEN_COLS: usize = 16;

/// Byte capacity of one rendered line
///
/// Cells hold `char`s, so a line of multi-byte glyphs (`°`) needs more
/// than one byte per column.
pub const LINE_CAPACITY: usize = SCREEN_COLS * 4;

/// Blank cell
const BLANK: char = ' ';

/// Cell grid mirroring the LCD
///
/// Text is placed at (row, col) like on the real LCD; anything past the
/// last column is clipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    cells: [[char; SCREEN_COLS]; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// All blank
    pub const fn new() -> Self {
        Self {
            cells: [[BLANK; SCREEN_COLS]; SCREEN_ROWS],
        }
    }

    /// Blank every cell
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(BLANK);
        }
    }

    /// Write text starting at (row, col), overwriting existing cells
    ///
    /// Out-of-range rows are ignored and text is clipped at the right edge.
    pub fn write_at(&mut self, row: usize, col: usize, text: &str) {
        let Some(cells) = self.cells.get_mut(row) else {
            return;
        };
        for (cell, ch) in cells.iter_mut().skip(col).zip(text.chars()) {
            *cell = ch;
        }
    }

    /// Blank a row, then write `text` from column 0
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            self.cells[row].fill(BLANK);
            self.write_at(row, 0, text);
        }
    }

    /// Get the character at (row, col)
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Get the content of a specific row, without trailing blanks
    pub fn get_line(&self, row: usize) -> Option<String<LINE_CAPACITY>> {
        let cells = self.cells.get(row)?;
        let used = cells
            .iter()
            .rposition(|&c| c != BLANK)
            .map_or(0, |last| last + 1);

        let mut line = String::new();
        for &ch in &cells[..used] {
            // Capacity covers SCREEN_COLS of the widest UTF-8 char
            let _ = line.push(ch);
        }
        Some(line)
    }

    /// Clear the backend and draw every non-empty row
    ///
    /// Stops at the first backend error.
    pub fn render_to<B: DisplayBackend>(&self, backend: &mut B) -> Result<(), DisplayError> {
        backend.clear()?;
        for row in 0..SCREEN_ROWS {
            if let Some(line) = self.get_line(row) {
                if !line.is_empty() {
                    backend.draw_text(row as u8, 0, &line)?;
                }
            }
        }
        backend.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Backend that records every call
    struct RecordingBackend {
        clears: usize,
        writes: Vec<(u8, u8, String<LINE_CAPACITY>), 8>,
        fail: bool,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                clears: 0,
                writes: Vec::new(),
                fail: false,
            }
        }
    }

    impl DisplayBackend for RecordingBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.clears += 1;
            Ok(())
        }

        fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
            let mut s = String::new();
            s.push_str(text).map_err(|_| DisplayError::InvalidCoordinates)?;
            self.writes
                .push((row, col, s))
                .map_err(|_| DisplayError::Communication)
        }

        fn dimensions(&self) -> (u8, u8) {
            (SCREEN_COLS as u8, SCREEN_ROWS as u8)
        }
    }

    #[test]
    fn test_write_at_places_text() {
        let mut screen = Screen::new();
        screen.write_at(0, 0, "Room:");
        screen.write_at(0, 6, "24.5°C");
        assert_eq!(screen.get_line(0).unwrap().as_str(), "Room: 24.5°C");
        assert_eq!(screen.cell(0, 10), Some('°'));
    }

    #[test]
    fn test_write_clips_at_right_edge() {
        let mut screen = Screen::new();
        screen.set_line(0, "Algae Cooling System");
        assert_eq!(screen.get_line(0).unwrap().as_str(), "Algae Cooling Sy");

        screen.write_at(1, 15, "FX");
        assert_eq!(screen.cell(1, 15), Some('F'));
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut screen = Screen::new();
        screen.write_at(SCREEN_ROWS, 0, "nope");
        assert!(screen.get_line(SCREEN_ROWS).is_none());
        assert_eq!(screen.get_line(0).unwrap().as_str(), "");
    }

    #[test]
    fn test_clear() {
        let mut screen = Screen::new();
        screen.set_line(1, "Starting...");
        screen.clear();
        assert_eq!(screen.get_line(1).unwrap().as_str(), "");
        assert_eq!(screen, Screen::new());
    }

    #[test]
    fn test_render_to_backend() {
        let mut screen = Screen::new();
        screen.set_line(0, "Room: 21.0°C");
        let mut backend = RecordingBackend::new();

        screen.render_to(&mut backend).unwrap();

        assert_eq!(backend.clears, 1);
        // Empty second row is not drawn
        assert_eq!(backend.writes.len(), 1);
        assert_eq!(backend.writes[0].0, 0);
        assert_eq!(backend.writes[0].2.as_str(), "Room: 21.0°C");
    }

    #[test]
    fn test_render_stops_on_error() {
        let mut screen = Screen::new();
        screen.set_line(0, "x");
        let mut backend = RecordingBackend::new();
        backend.fail = true;

        assert_eq!(screen.render_to(&mut backend), Err(DisplayError::Communication));
        assert!(backend.writes.is_empty());
    }
}
