//! Board-agnostic core logic for the temperature monitor firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (ADC, I2C probing, delays)
//! - Shared system state (mode flags, last readings)
//! - Sensor reader (LM35 sampling, simulated random walk)
//! - Display writer (two-line LCD layout)
//! - Serial command dispatcher
//! - Interval scheduler and the `Monitor` facade tying them together
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod monitor;
pub mod render;
pub mod scheduler;
pub mod sensor;
pub mod state;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use monitor::Monitor;
