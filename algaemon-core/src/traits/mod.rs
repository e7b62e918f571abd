//! Hardware abstraction traits
//!
//! These traits define the interface between the monitor logic and the
//! board. A board bundles an ADC, an I2C bus and a blocking delay.

pub mod adc;
pub mod bus;

pub use adc::{AdcError, AnalogInput, SensorChannel};
pub use bus::BusProbe;

use embedded_hal::delay::DelayNs;

/// Everything the monitor needs from the hardware
///
/// Delays block the whole loop on purpose: a sampling burst always runs
/// to completion before control returns to the scheduler.
pub trait Board: AnalogInput + BusProbe + DelayNs {}

// Blanket implementation for any type providing all three
impl<T: AnalogInput + BusProbe + DelayNs> Board for T {}
