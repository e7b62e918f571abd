//! Sensor reader
//!
//! Owns the conversion parameters and both simulated series. Real readings
//! come from blocking sampling bursts; simulated readings are copied from
//! the series, which only move when [`SensorReader::advance_simulation`]
//! is called by the fluctuation timer.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;

use super::conversion::{Lm35Conversion, Reading};
use super::simulation::{NoiseSource, SimulatedSeries, WalkParams};
use crate::config::{MonitorConfig, SensorConfig};
use crate::state::SystemState;
use crate::traits::{AdcError, AnalogInput, SensorChannel};

/// Single raw reads below this look like a disconnected sensor
pub const LOW_RAW_THRESHOLD: u16 = 10;

/// Single raw reads above this look like swapped supply wiring
pub const HIGH_RAW_THRESHOLD: u16 = 1000;

/// Samples per channel and their readings, for the monitor and the console
pub struct SensorReader<N> {
    sensors: SensorConfig,
    conversion: Lm35Conversion,
    walk: WalkParams,
    /// Plausibility window for the debug warnings (°C)
    plausible: (f32, f32),
    room: SimulatedSeries,
    algae: SimulatedSeries,
    noise: N,
}

impl<N: NoiseSource> SensorReader<N> {
    /// Create a reader with both series at their starting values
    pub fn new(config: &MonitorConfig, noise: N) -> Self {
        Self {
            sensors: config.sensors,
            conversion: Lm35Conversion::from_config(&config.sensors),
            walk: WalkParams::from_config(&config.simulation),
            plausible: (config.display.valid_min_c, config.display.valid_max_c),
            room: SimulatedSeries::new(config.simulation.room_start_c),
            algae: SimulatedSeries::new(config.simulation.algae_start_c),
            noise,
        }
    }

    /// Board pin wired to a channel
    pub fn pin(&self, channel: SensorChannel) -> u8 {
        match channel {
            SensorChannel::Room => self.sensors.room_pin,
            SensorChannel::Algae => self.sensors.algae_pin,
        }
    }

    /// Simulated series for a channel
    pub fn series(&self, channel: SensorChannel) -> &SimulatedSeries {
        match channel {
            SensorChannel::Room => &self.room,
            SensorChannel::Algae => &self.algae,
        }
    }

    fn series_mut(&mut self, channel: SensorChannel) -> &mut SimulatedSeries {
        match channel {
            SensorChannel::Room => &mut self.room,
            SensorChannel::Algae => &mut self.algae,
        }
    }

    /// Overwrite a simulated series' current value
    pub fn set_simulated(&mut self, channel: SensorChannel, celsius: f32) {
        self.series_mut(channel).set_current(celsius);
    }

    /// Advance both simulated series by one random-walk step
    pub fn advance_simulation(&mut self) {
        let walk = self.walk;
        self.room.advance(&mut self.noise, &walk);
        self.algae.advance(&mut self.noise, &walk);
    }

    /// Average `samples` raw reads, pausing after each one
    ///
    /// The burst always runs to completion or to the first failed read.
    pub fn sample_burst<B>(
        &self,
        board: &mut B,
        channel: SensorChannel,
        samples: u8,
    ) -> Result<f32, AdcError>
    where
        B: AnalogInput + DelayNs,
    {
        let samples = samples.max(1);
        let mut sum: u32 = 0;
        for _ in 0..samples {
            sum += u32::from(board.read_raw(channel)?);
            board.delay_ms(self.sensors.sample_delay_ms);
        }
        Ok(sum as f32 / f32::from(samples))
    }

    /// Take one periodic measurement of a channel
    ///
    /// With `debug` set, the raw average, voltage and temperature are
    /// written to `out` as a side effect.
    pub fn sample_channel<B, W>(
        &self,
        board: &mut B,
        channel: SensorChannel,
        debug: bool,
        out: &mut W,
    ) -> Result<Reading, AdcError>
    where
        B: AnalogInput + DelayNs,
        W: Write,
    {
        let average = self.sample_burst(board, channel, self.sensors.samples_per_read)?;
        let reading = self.conversion.reading(average);
        if debug {
            let _ = writeln!(
                out,
                "  [Pin {}] ADC: {:.1} | Voltage: {:.3}V | Temp: {:.2}°C",
                self.pin(channel),
                reading.raw_average,
                reading.volts,
                reading.celsius
            );
        }
        Ok(reading)
    }

    /// Refresh both readings in `state`
    ///
    /// In simulation mode the series' current values are copied. Otherwise
    /// each channel is sampled and stored once its burst has completed; a
    /// failed channel keeps its previous value and the first failure is
    /// returned after both channels were attempted.
    pub fn update<B, W>(
        &mut self,
        state: &mut SystemState,
        board: &mut B,
        out: &mut W,
    ) -> Result<(), AdcError>
    where
        B: AnalogInput + DelayNs,
        W: Write,
    {
        let mut result = Ok(());

        if state.simulation_enabled {
            for channel in SensorChannel::ALL {
                state.set_reading(channel, self.series(channel).current());
            }
        } else {
            for channel in SensorChannel::ALL {
                match self.sample_channel(board, channel, state.debug_enabled, out) {
                    Ok(reading) => state.set_reading(channel, reading.celsius),
                    Err(e) => {
                        if result.is_ok() {
                            result = Err(e);
                        }
                    }
                }
            }

            if state.debug_enabled {
                let (min, max) = self.plausible;
                for channel in SensorChannel::ALL {
                    let value = state.reading(channel);
                    if value < min || value > max {
                        let _ = writeln!(
                            out,
                            "WARNING: {} sensor reading out of range!",
                            channel.label()
                        );
                    }
                }
            }
        }

        if state.debug_enabled {
            let _ = writeln!(
                out,
                "Room: {:.1}°C | Algae: {:.1}°C | Mode: {}",
                state.room_celsius,
                state.algae_celsius,
                if state.simulation_enabled { "FAKE" } else { "REAL" }
            );
        }

        result
    }

    /// One unaveraged read per channel with a health verdict
    pub fn self_test<B: AnalogInput, W: Write>(&self, board: &mut B, out: &mut W) {
        let _ = self.write_self_test(board, out);
    }

    fn write_self_test<B: AnalogInput, W: Write>(&self, board: &mut B, out: &mut W) -> fmt::Result {
        writeln!(out, "--- LM35 Sensor Test ---")?;
        writeln!(out, "LM35 Pinout: [VCC] [OUTPUT] [GND]")?;
        writeln!(out, "             (left) (middle) (right)")?;
        writeln!(out)?;

        for channel in SensorChannel::ALL {
            write!(out, "{} Sensor (Pin {}): ", channel.label(), self.pin(channel))?;
            let raw = match board.read_raw(channel) {
                Ok(raw) => raw,
                Err(_) => {
                    writeln!(out, "ADC read failed")?;
                    continue;
                }
            };
            let reading = self.conversion.reading(f32::from(raw));
            writeln!(
                out,
                "ADC={}, V={:.3}V, T={:.1}°C",
                raw, reading.volts, reading.celsius
            )?;

            if raw < LOW_RAW_THRESHOLD {
                writeln!(out, "  ⚠ Very low reading - Check if sensor is connected!")?;
            } else if raw > HIGH_RAW_THRESHOLD {
                writeln!(out, "  ⚠ Very high reading - Check wiring!")?;
            } else {
                writeln!(out, "  ✓ Sensor appears to be working")?;
            }
        }

        writeln!(out, "--- Test Complete ---\n")
    }

    /// Long averaged pass per channel with troubleshooting notes
    pub fn calibrate<B, W>(&self, board: &mut B, out: &mut W)
    where
        B: AnalogInput + DelayNs,
        W: Write,
    {
        let _ = self.write_calibration(board, out);
    }

    fn write_calibration<B, W>(&self, board: &mut B, out: &mut W) -> fmt::Result
    where
        B: AnalogInput + DelayNs,
        W: Write,
    {
        let samples = self.sensors.calibration_samples;

        writeln!(out, "\n=== LM35 CALIBRATION INFO ===")?;
        writeln!(out, "LM35 outputs 10mV per °C")?;
        writeln!(out, "At 25°C: ~250mV (0.25V)")?;
        writeln!(out, "At 30°C: ~300mV (0.30V)")?;
        writeln!(out)?;
        writeln!(out, "Current Readings (averaged over {} samples):", samples)?;

        for channel in SensorChannel::ALL {
            write!(out, "{} (Pin {}): ", channel.label(), self.pin(channel))?;
            match self.sample_burst(board, channel, samples) {
                Ok(average) => {
                    let reading = self.conversion.reading(average);
                    writeln!(
                        out,
                        "ADC={:.1}, Voltage={:.3}V, Temp={:.2}°C",
                        reading.raw_average, reading.volts, reading.celsius
                    )?;
                }
                Err(_) => writeln!(out, "ADC read failed")?,
            }
        }

        writeln!(out, "\nTroubleshooting:")?;
        writeln!(out, "- If temp shows ~49°C indoors → Sensor backwards!")?;
        writeln!(out, "- If temp shows 0°C → Check OUTPUT pin connection")?;
        writeln!(out, "- If temp shows 100+°C → Check VCC/GND wiring")?;
        writeln!(out, "- LM35 pinout (flat side facing you): VCC | OUT | GND")?;
        writeln!(out, "================================\n")
    }
}
