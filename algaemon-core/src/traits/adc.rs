//! Analog input trait and sensor channels

/// Errors that can occur while reading the ADC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// ADC conversion failed
    Conversion,
}

/// Logical temperature channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorChannel {
    /// Ambient/room sensor
    Room,
    /// Algae tank sensor
    Algae,
}

impl SensorChannel {
    /// Both channels, in display order
    pub const ALL: [SensorChannel; 2] = [SensorChannel::Room, SensorChannel::Algae];

    /// Human-readable channel name
    pub fn label(&self) -> &'static str {
        match self {
            SensorChannel::Room => "Room",
            SensorChannel::Algae => "Algae",
        }
    }
}

/// Single raw ADC conversion on a temperature channel
///
/// Implementations map the logical channel onto the board's analog pin.
/// Takes `&mut self` because ADC reads require mutable access.
pub trait AnalogInput {
    /// Read one raw sample (0 ..= resolution - 1)
    fn read_raw(&mut self, channel: SensorChannel) -> Result<u16, AdcError>;
}
