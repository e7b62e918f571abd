//! Simple TOML parser for monitor configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the monitor configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (integer, hex integer, float)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Strings, arrays and inline tables
//! - Dotted keys or nested sections

use super::types::MonitorConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognised in its section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sensors,
    Display,
    Timing,
    Serial,
    Simulation,
}

impl MonitorConfig {
    /// Parse TOML configuration, starting from the defaults
    ///
    /// Keys that are not present keep their default value. The result is
    /// validated before it is returned.
    pub fn from_toml(input: &str) -> Result<Self, ParseError> {
        let mut config = MonitorConfig::default();
        let mut section = Section::Root;

        for line in input.lines() {
            let line = strip_comment(line).trim();

            // Skip empty lines and comments
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                section = parse_section_header(&line[1..line.len() - 1])?;
                continue;
            }

            let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
            apply_value(&mut config, section, key, value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the monitor misbehave
    pub fn validate(&self) -> Result<(), ParseError> {
        let s = &self.sensors;
        if s.samples_per_read == 0 || s.calibration_samples == 0 {
            return Err(ParseError::InvalidValue);
        }
        if s.adc_resolution <= 0.0 || s.reference_voltage <= 0.0 || s.mv_per_degree <= 0.0 {
            return Err(ParseError::InvalidValue);
        }

        let d = &self.display;
        if d.cols == 0 || d.rows == 0 || d.valid_min_c >= d.valid_max_c {
            return Err(ParseError::InvalidValue);
        }
        // HD44780 DDRAM holds at most 4 rows of 40 cells
        if d.cols > 40 || d.rows > 4 {
            return Err(ParseError::InvalidValue);
        }

        let t = &self.timing;
        if t.update_interval_ms == 0 || t.fluctuation_interval_ms == 0 {
            return Err(ParseError::InvalidValue);
        }

        if self.serial.baudrate == 0 {
            return Err(ParseError::InvalidValue);
        }

        let sim = &self.simulation;
        if sim.step_c < 0.0 || sim.recenter_threshold_c < 0.0 || sim.recenter_spread_c < 0.0 {
            return Err(ParseError::InvalidValue);
        }
        if sim.setpoint_min_c >= sim.setpoint_max_c {
            return Err(ParseError::InvalidValue);
        }

        Ok(())
    }
}

/// Drop a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse section header like "sensors"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "sensors" => Ok(Section::Sensors),
        "display" => Ok(Section::Display),
        "timing" => Ok(Section::Timing),
        "serial" => Ok(Section::Serial),
        "simulation" => Ok(Section::Simulation),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value, accepting `0x` hex
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    let value = strip_underscores(value);
    let parsed = if let Some(hex) = value
        .as_str()
        .strip_prefix("0x")
        .or_else(|| value.as_str().strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)
    } else {
        value.as_str().parse::<u64>()
    };
    let parsed = parsed.map_err(|_| ParseError::InvalidValue)?;
    T::try_from(parsed).map_err(|_| ParseError::InvalidValue)
}

/// Parse a float value (integers are accepted)
fn parse_float(value: &str) -> Result<f32, ParseError> {
    let value = strip_underscores(value);
    let parsed: f32 = value.as_str().parse().map_err(|_| ParseError::InvalidValue)?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// TOML allows `_` between digits; strip them into a small buffer
fn strip_underscores(value: &str) -> heapless::String<32> {
    let mut out = heapless::String::new();
    for ch in value.chars().filter(|&c| c != '_') {
        if out.push(ch).is_err() {
            // Too long to be a valid number; let the parse fail
            out.clear();
            break;
        }
    }
    out
}

/// Apply one key to the config
fn apply_value(
    config: &mut MonitorConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::UnknownKey),
        Section::Sensors => {
            let s = &mut config.sensors;
            match key {
                "room_pin" => s.room_pin = parse_int(value)?,
                "algae_pin" => s.algae_pin = parse_int(value)?,
                "samples_per_read" => s.samples_per_read = parse_int(value)?,
                "calibration_samples" => s.calibration_samples = parse_int(value)?,
                "sample_delay_ms" => s.sample_delay_ms = parse_int(value)?,
                "adc_resolution" => s.adc_resolution = parse_float(value)?,
                "reference_voltage" => s.reference_voltage = parse_float(value)?,
                "mv_per_degree" => s.mv_per_degree = parse_float(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Display => {
            let d = &mut config.display;
            match key {
                "i2c_address" => d.i2c_address = parse_int(value)?,
                "cols" => d.cols = parse_int(value)?,
                "rows" => d.rows = parse_int(value)?,
                "valid_min_c" => d.valid_min_c = parse_float(value)?,
                "valid_max_c" => d.valid_max_c = parse_float(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Timing => {
            let t = &mut config.timing;
            match key {
                "update_interval_ms" => t.update_interval_ms = parse_int(value)?,
                "fluctuation_interval_ms" => t.fluctuation_interval_ms = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Serial => match key {
            "baudrate" => config.serial.baudrate = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Simulation => {
            let sim = &mut config.simulation;
            match key {
                "room_start_c" => sim.room_start_c = parse_float(value)?,
                "algae_start_c" => sim.algae_start_c = parse_float(value)?,
                "step_c" => sim.step_c = parse_float(value)?,
                "recenter_threshold_c" => sim.recenter_threshold_c = parse_float(value)?,
                "recenter_spread_c" => sim.recenter_spread_c = parse_float(value)?,
                "setpoint_min_c" => sim.setpoint_min_c = parse_float(value)?,
                "setpoint_max_c" => sim.setpoint_max_c = parse_float(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
    }
    Ok(())
}
