//! Shared system state
//!
//! One `SystemState` is created at startup and lives for the whole run.
//! The command dispatcher and the sensor reader mutate it; the display
//! writer and the status report only read it.

use crate::traits::SensorChannel;

/// Mode flags and the most recent readings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemState {
    /// Readings come from the simulated series instead of the ADC
    pub simulation_enabled: bool,
    /// Print raw ADC values on every sample
    pub debug_enabled: bool,
    /// Last room reading (°C)
    pub room_celsius: f32,
    /// Last algae reading (°C)
    pub algae_celsius: f32,
}

impl SystemState {
    /// Create the power-on state: real sensors, no debug, zero readings
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reading for a channel
    pub fn reading(&self, channel: SensorChannel) -> f32 {
        match channel {
            SensorChannel::Room => self.room_celsius,
            SensorChannel::Algae => self.algae_celsius,
        }
    }

    /// Store a complete new reading for a channel
    pub fn set_reading(&mut self, channel: SensorChannel, celsius: f32) {
        match channel {
            SensorChannel::Room => self.room_celsius = celsius,
            SensorChannel::Algae => self.algae_celsius = celsius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_state() {
        let state = SystemState::new();
        assert!(!state.simulation_enabled);
        assert!(!state.debug_enabled);
        assert_eq!(state.reading(SensorChannel::Room), 0.0);
        assert_eq!(state.reading(SensorChannel::Algae), 0.0);
    }

    #[test]
    fn test_set_reading_per_channel() {
        let mut state = SystemState::new();
        state.set_reading(SensorChannel::Algae, 21.5);
        assert_eq!(state.algae_celsius, 21.5);
        assert_eq!(state.room_celsius, 0.0);
    }
}
