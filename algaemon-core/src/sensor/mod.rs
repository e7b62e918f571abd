//! Temperature acquisition
//!
//! - [`conversion`]: ADC counts to volts to °C for the LM35
//! - [`simulation`]: mean-reverting random walk for fake mode
//! - [`reader`]: sampling bursts, the periodic update and diagnostics

pub mod conversion;
pub mod reader;
pub mod simulation;

pub use conversion::{Lm35Conversion, Reading};
pub use reader::SensorReader;
pub use simulation::{NoiseSource, RngNoise, SimulatedSeries, WalkParams};
