//! Hardware fakes shared by the unit tests

use embedded_hal::delay::DelayNs;
use std::vec::Vec;

use crate::sensor::NoiseSource;
use crate::traits::{AdcError, AnalogInput, BusProbe, SensorChannel};

/// Noise source that never moves the walk
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn offset(&mut self, _bound: i32) -> i32 {
        0
    }
}

/// Board with fixed ADC counts, a counting delay and a fake I2C bus
pub struct FakeBoard {
    pub room: u16,
    pub algae: u16,
    pub failing: Option<SensorChannel>,
    pub reads: usize,
    pub delayed_ms: u32,
    pub devices: Vec<u8>,
    pub probes: usize,
}

impl FakeBoard {
    pub fn new(room: u16, algae: u16) -> Self {
        Self {
            room,
            algae,
            failing: None,
            reads: 0,
            delayed_ms: 0,
            devices: Vec::new(),
            probes: 0,
        }
    }

    pub fn with_devices(mut self, devices: &[u8]) -> Self {
        self.devices = devices.to_vec();
        self
    }
}

impl AnalogInput for FakeBoard {
    fn read_raw(&mut self, channel: SensorChannel) -> Result<u16, AdcError> {
        if self.failing == Some(channel) {
            return Err(AdcError::Conversion);
        }
        self.reads += 1;
        Ok(match channel {
            SensorChannel::Room => self.room,
            SensorChannel::Algae => self.algae,
        })
    }
}

impl BusProbe for FakeBoard {
    fn probe(&mut self, address: u8) -> bool {
        self.probes += 1;
        self.devices.contains(&address)
    }
}

impl DelayNs for FakeBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.delayed_ms += ns / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delayed_ms += ms;
    }
}
