//! Configuration type definitions
//!
//! These types hold every tunable of the monitor. Defaults are the values
//! the hardware was designed around; the firmware embeds a TOML file that
//! may override them at build time.

/// Analog sensor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Pin (or ADC input) wired to the room sensor
    pub room_pin: u8,
    /// Pin (or ADC input) wired to the algae sensor
    pub algae_pin: u8,
    /// Raw reads averaged per periodic sample
    pub samples_per_read: u8,
    /// Raw reads averaged per channel by `calibrate`
    pub calibration_samples: u8,
    /// Pause after each raw read (ms)
    pub sample_delay_ms: u32,
    /// ADC full-scale count (10-bit = 1024)
    pub adc_resolution: f32,
    /// ADC reference voltage (V)
    pub reference_voltage: f32,
    /// Sensor scale (LM35: 10 mV per °C)
    pub mv_per_degree: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            room_pin: 26,
            algae_pin: 27,
            samples_per_read: 10,
            calibration_samples: 50,
            sample_delay_ms: 10,
            adc_resolution: 1024.0,
            reference_voltage: 5.0,
            mv_per_degree: 10.0,
        }
    }
}

/// Character LCD configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// 7-bit I2C address of the PCF8574 backpack
    pub i2c_address: u8,
    /// Columns per row
    pub cols: u8,
    /// Number of rows
    pub rows: u8,
    /// Lowest temperature shown as a number (°C, inclusive)
    pub valid_min_c: f32,
    /// Temperatures at or above this show ERROR (°C, exclusive)
    pub valid_max_c: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_address: 0x27,
            cols: 16,
            rows: 2,
            valid_min_c: 0.0,
            valid_max_c: 150.0,
        }
    }
}

/// Scheduler timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Sensor read + LCD refresh period (ms)
    pub update_interval_ms: u32,
    /// Simulated random-walk step period (ms)
    pub fluctuation_interval_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 2000,
            fluctuation_interval_ms: 1000,
        }
    }
}

/// Serial console configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { baudrate: 9600 }
    }
}

/// Simulated ("fake") reading configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimulationConfig {
    /// Starting room value (°C)
    pub room_start_c: f32,
    /// Starting algae value (°C)
    pub algae_start_c: f32,
    /// Largest single random-walk step (°C)
    pub step_c: f32,
    /// Deviation from baseline that triggers re-centering (°C)
    pub recenter_threshold_c: f32,
    /// Spread of the fresh value drawn on re-centering (°C)
    pub recenter_spread_c: f32,
    /// `set room|algae` lower bound (°C, exclusive)
    pub setpoint_min_c: f32,
    /// `set room|algae` upper bound (°C, exclusive)
    pub setpoint_max_c: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            room_start_c: 24.0,
            algae_start_c: 22.0,
            step_c: 0.5,
            recenter_threshold_c: 2.0,
            recenter_spread_c: 2.0,
            setpoint_min_c: -50.0,
            setpoint_max_c: 100.0,
        }
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    pub sensors: SensorConfig,
    pub display: DisplayConfig,
    pub timing: TimingConfig,
    pub serial: SerialConfig,
    pub simulation: SimulationConfig,
}
