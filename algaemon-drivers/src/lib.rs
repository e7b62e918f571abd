//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in algaemon-core and algaemon-display:
//!
//! - Character LCD (HD44780 behind a PCF8574 I2C backpack)
//! - I2C bus prober for the device scan

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod lcd;
