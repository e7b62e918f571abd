//! HD44780 character LCD behind a PCF8574 I2C backpack
//!
//! The backpack exposes the LCD's 4-bit bus on the expander's port:
//!
//! | PCF8574 bit | LCD signal |
//! |-------------|------------|
//! | P0          | RS         |
//! | P1          | RW         |
//! | P2          | EN         |
//! | P3          | Backlight  |
//! | P4..P7      | D4..D7     |
//!
//! Each byte sent to the controller is split into two nibbles, each
//! latched by pulsing EN high then low.
//!
//! # Character set
//!
//! The A00 ROM is ASCII for 0x20..0x7D. `°` is mapped to the ROM's degree
//! glyph (0xDF); any other non-ASCII character is shown as `?`.

use algaemon_display::{DisplayBackend, DisplayError};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// ROM code of the degree glyph
pub const LCD_DEGREE: u8 = 0xDF;

/// Expander bits
mod pin {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// Controller instructions
mod cmd {
    pub const CLEAR: u8 = 0x01;
    /// Entry mode: increment, no shift
    pub const ENTRY_MODE: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Function set: 4-bit bus, 2 lines, 5x8 font
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Widest line the controller addresses
const MAX_COLS: u8 = 40;

/// HD44780 LCD driver
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    cols: u8,
    rows: u8,
    backlight: bool,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver; call [`init`](Self::init) before use
    ///
    /// - `address`: 7-bit address of the backpack (usually 0x27 or 0x3F)
    pub fn new(i2c: I2C, delay: D, address: u8, cols: u8, rows: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            cols: cols.min(MAX_COLS),
            rows: rows.min(ROW_OFFSETS.len() as u8),
            backlight: true,
        }
    }

    /// Release the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Run the 4-bit initialisation sequence, then clear the display
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        // Power-on settle
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1);

        // Force 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20, 0)?;

        self.command(cmd::FUNCTION_4BIT_2LINE)?;
        self.command(cmd::DISPLAY_ON)?;
        self.clear_display()?;
        self.command(cmd::ENTRY_MODE)
    }

    /// Switch the backlight
    pub fn set_backlight(&mut self, on: bool) -> Result<(), I2C::Error> {
        self.backlight = on;
        self.expander_write(0)
    }

    /// Clear all cells and home the cursor
    pub fn clear_display(&mut self) -> Result<(), I2C::Error> {
        self.command(cmd::CLEAR)?;
        // Clear takes ~1.5 ms
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor; out-of-range positions are clamped
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I2C::Error> {
        let row = row.min(self.rows.saturating_sub(1));
        let col = col.min(self.cols.saturating_sub(1));
        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    /// Write text at the cursor
    pub fn write_text(&mut self, text: &str) -> Result<(), I2C::Error> {
        for ch in text.chars() {
            self.write_data(rom_code(ch))?;
        }
        Ok(())
    }

    fn command(&mut self, value: u8) -> Result<(), I2C::Error> {
        self.send(value, 0)
    }

    fn write_data(&mut self, value: u8) -> Result<(), I2C::Error> {
        self.send(value, pin::RS)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), I2C::Error> {
        self.write_nibble(value & 0xF0, mode)?;
        self.write_nibble((value << 4) & 0xF0, mode)
    }

    /// Put a high nibble on D4..D7 and latch it
    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), I2C::Error> {
        let bits = nibble | mode;
        self.expander_write(bits | pin::EN)?;
        self.delay.delay_us(1);
        self.expander_write(bits)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, bits: u8) -> Result<(), I2C::Error> {
        let backlight = if self.backlight { pin::BACKLIGHT } else { 0 };
        self.i2c.write(self.address, &[bits | backlight])
    }
}

/// Map a character onto the A00 character ROM
pub fn rom_code(ch: char) -> u8 {
    match ch {
        '°' => LCD_DEGREE,
        ' '..='}' => ch as u8,
        _ => b'?',
    }
}

impl<I2C, D> DisplayBackend for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clear_display().map_err(|_| DisplayError::Communication)
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row >= self.rows || col >= self.cols {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.set_cursor(col, row)
            .map_err(|_| DisplayError::Communication)?;

        // Clip at the right edge instead of wrapping into another row
        for ch in text.chars().take(usize::from(self.cols - col)) {
            self.write_data(rom_code(ch))
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }
}
