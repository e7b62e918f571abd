//! Character display abstraction for Algaemon
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays (HD44780 LCD, test doubles)
//! - `Screen`, a 2x16 character buffer that is composed off-line and then
//!   pushed to a backend in one pass
//!
//! # Architecture
//!
//! The monitor core renders readings into a `Screen` without touching any
//! hardware. The firmware owns the concrete backend (an I2C LCD from
//! `algaemon-drivers`) and calls [`Screen::render_to`] to put the buffer
//! on the glass.

#![no_std]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use screen::{Screen, LINE_CAPACITY, SCREEN_COLS, SCREEN_ROWS};
