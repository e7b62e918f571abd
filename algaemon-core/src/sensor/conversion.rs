//! LM35 reading conversion
//!
//! The LM35 outputs 10 mV per °C with 0 V at 0 °C, so for a 10-bit ADC
//! referenced to 5 V:
//!
//! ```text
//! volts   = (average / 1024) * 5.0
//! celsius = volts * 1000 / 10      (= volts * 100)
//! ```
//!
//! No clamping happens here; range checks belong to the callers.

use crate::config::SensorConfig;

/// One averaged measurement with its intermediate values
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Mean raw ADC count
    pub raw_average: f32,
    /// Voltage at the sensor output (V)
    pub volts: f32,
    /// Temperature (°C)
    pub celsius: f32,
}

/// ADC count to temperature conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lm35Conversion {
    adc_resolution: f32,
    reference_voltage: f32,
    mv_per_degree: f32,
}

impl Default for Lm35Conversion {
    fn default() -> Self {
        Self::from_config(&SensorConfig::default())
    }
}

impl Lm35Conversion {
    /// Build a conversion from the sensor configuration
    pub fn from_config(config: &SensorConfig) -> Self {
        Self {
            adc_resolution: config.adc_resolution,
            reference_voltage: config.reference_voltage,
            mv_per_degree: config.mv_per_degree,
        }
    }

    /// ADC count (possibly averaged) to volts
    pub fn counts_to_volts(&self, counts: f32) -> f32 {
        (counts / self.adc_resolution) * self.reference_voltage
    }

    /// Sensor voltage to °C
    pub fn volts_to_celsius(&self, volts: f32) -> f32 {
        volts * (1000.0 / self.mv_per_degree)
    }

    /// Convert an averaged count into a full reading
    pub fn reading(&self, raw_average: f32) -> Reading {
        let volts = self.counts_to_volts(raw_average);
        Reading {
            raw_average,
            volts,
            celsius: self.volts_to_celsius(volts),
        }
    }
}
