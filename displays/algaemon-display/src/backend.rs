//! Character LCD seam
//!
//! The monitor only ever needs to blank the glass and put a string at a
//! cell, so that is all a backend has to provide.

/// Why a backend rejected a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The bus transfer to the controller failed
    Communication,
    /// Row or column outside the panel
    InvalidCoordinates,
}

/// A character panel addressed in (row, column) cells
pub trait DisplayBackend {
    /// Blank every cell and return the cursor to (0, 0)
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Put `text` starting at cell (`row`, `col`)
    ///
    /// Both coordinates are 0-based. Text running past the last column is
    /// cut off rather than wrapped.
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Push anything the backend has held back
    ///
    /// Write-through panels such as the HD44780 keep the default.
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Panel size as (columns, rows)
    fn dimensions(&self) -> (u8, u8);
}
