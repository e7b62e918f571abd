//! Serial command dispatcher
//!
//! Turns received lines into [`Command`]s, applies them to the shared
//! state and writes the human-readable replies. Replies use `\n` line
//! endings; the transport is free to translate them.

use core::fmt::{self, Write};

use algaemon_protocol::{Command, CommandError, HELP_ENTRIES};

use crate::config::SimulationConfig;
use crate::sensor::{NoiseSource, SensorReader};
use crate::state::SystemState;
use crate::traits::{Board, BusProbe, SensorChannel};

/// First and last 7-bit addresses probed by the bus scan
pub const SCAN_FIRST_ADDRESS: u8 = 0x01;
pub const SCAN_LAST_ADDRESS: u8 = 0x7E;

/// Addresses the common PCF8574 LCD backpacks answer on
pub const LCD_ADDRESSES: [u8; 2] = [0x27, 0x3F];

/// Rejected `set room|algae` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetpointError {
    /// Value not strictly inside the accepted window
    OutOfRange,
}

/// Why a line did not change anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Line was not a command
    Command(CommandError),
    /// Command was understood but its value was rejected
    Setpoint(SetpointError),
}

impl From<CommandError> for DispatchError {
    fn from(e: CommandError) -> Self {
        DispatchError::Command(e)
    }
}

impl From<SetpointError> for DispatchError {
    fn from(e: SetpointError) -> Self {
        DispatchError::Setpoint(e)
    }
}

/// Accept `celsius` if it lies strictly between the setpoint bounds
pub fn check_setpoint(celsius: f32, limits: &SimulationConfig) -> Result<f32, SetpointError> {
    if celsius > limits.setpoint_min_c && celsius < limits.setpoint_max_c {
        Ok(celsius)
    } else {
        Err(SetpointError::OutOfRange)
    }
}

/// Borrowed view of everything a command may touch
pub struct Dispatcher<'a, N> {
    pub state: &'a mut SystemState,
    pub reader: &'a mut SensorReader<N>,
    pub limits: &'a SimulationConfig,
}

impl<'a, N: NoiseSource> Dispatcher<'a, N> {
    /// Parse and run one received line
    ///
    /// Blank lines are ignored silently. Unknown text gets a pointer to
    /// `help`. Returns the command that ran.
    pub fn process_line<B: Board, W: Write>(
        &mut self,
        line: &str,
        board: &mut B,
        out: &mut W,
    ) -> Result<Command, DispatchError> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(CommandError::Empty) => return Err(CommandError::Empty.into()),
            Err(CommandError::Unknown) => {
                let _ = writeln!(out, "✗ Unknown command. Type 'help' for commands.");
                return Err(CommandError::Unknown.into());
            }
        };

        self.execute(command, board, out)?;
        Ok(command)
    }

    /// Run an already parsed command
    pub fn execute<B: Board, W: Write>(
        &mut self,
        command: Command,
        board: &mut B,
        out: &mut W,
    ) -> Result<(), SetpointError> {
        match command {
            Command::Scan => {
                scan_bus(board, out);
                self.reader.self_test(board, out);
            }
            Command::FakeOn => {
                self.state.simulation_enabled = true;
                let _ = writeln!(out, "✓ Fake mode ENABLED");
            }
            Command::FakeOff => {
                self.state.simulation_enabled = false;
                let _ = writeln!(out, "✓ Fake mode DISABLED - Using real sensors");
            }
            Command::SetRoom(celsius) => self.set(SensorChannel::Room, celsius, out)?,
            Command::SetAlgae(celsius) => self.set(SensorChannel::Algae, celsius, out)?,
            Command::Status => print_status(self.state, self.reader, out),
            Command::DebugOn => {
                self.state.debug_enabled = true;
                let _ = writeln!(out, "✓ Debug mode ENABLED - Showing ADC values");
            }
            Command::DebugOff => {
                self.state.debug_enabled = false;
                let _ = writeln!(out, "✓ Debug mode DISABLED");
            }
            Command::Calibrate => self.reader.calibrate(board, out),
            Command::Help => print_help(out),
        }
        Ok(())
    }

    fn set<W: Write>(
        &mut self,
        channel: SensorChannel,
        celsius: f32,
        out: &mut W,
    ) -> Result<(), SetpointError> {
        match check_setpoint(celsius, self.limits) {
            Ok(celsius) => {
                self.reader.set_simulated(channel, celsius);
                let _ = writeln!(out, "✓ {} temp set to: {:.1}°C", channel.label(), celsius);
                Ok(())
            }
            Err(e) => {
                let _ = writeln!(
                    out,
                    "✗ Invalid temperature ({} to {}°C)",
                    self.limits.setpoint_min_c, self.limits.setpoint_max_c
                );
                Err(e)
            }
        }
    }
}

/// Print the command table
pub fn print_help<W: Write>(out: &mut W) {
    let _ = write_help(out);
}

fn write_help<W: Write>(out: &mut W) -> fmt::Result {
    writeln!(out, "\n=== AVAILABLE COMMANDS ===")?;
    for entry in HELP_ENTRIES.iter() {
        writeln!(out, "{:<18}- {}", entry.usage, entry.summary)?;
    }
    writeln!(out, "=========================\n")
}

/// Print mode flags and readings
///
/// In fake mode the simulated series' current values are listed too.
pub fn print_status<N: NoiseSource, W: Write>(
    state: &SystemState,
    reader: &SensorReader<N>,
    out: &mut W,
) {
    let _ = write_status(state, reader, out);
}

fn write_status<N: NoiseSource, W: Write>(
    state: &SystemState,
    reader: &SensorReader<N>,
    out: &mut W,
) -> fmt::Result {
    writeln!(out, "\n=== SYSTEM STATUS ===")?;
    writeln!(
        out,
        "Mode: {}",
        if state.simulation_enabled { "FAKE/MOCK" } else { "REAL SENSORS" }
    )?;
    writeln!(out, "Debug: {}", if state.debug_enabled { "ON" } else { "OFF" })?;
    for channel in SensorChannel::ALL {
        writeln!(out, "{} Temp: {:.1}°C", channel.label(), state.reading(channel))?;
    }
    if state.simulation_enabled {
        for channel in SensorChannel::ALL {
            writeln!(
                out,
                "Fake Base {}: {:.1}°C",
                channel.label(),
                reader.series(channel).current()
            )?;
        }
    }
    writeln!(out, "====================\n")
}

/// Probe every 7-bit address and list the responders
///
/// Returns the number of devices found.
pub fn scan_bus<P: BusProbe, W: Write>(bus: &mut P, out: &mut W) -> usize {
    let mut found = 0;
    let _ = writeln!(out, "\n--- I2C Device Scanner ---");

    for address in SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS {
        if !bus.probe(address) {
            continue;
        }
        found += 1;
        let _ = writeln!(out, "I2C device found at 0x{:02X} ({})", address, address);
        if LCD_ADDRESSES.contains(&address) {
            let _ = writeln!(out, "  → LCD Display");
        }
    }

    if found == 0 {
        let _ = writeln!(out, "No I2C devices found!");
        let _ = writeln!(out, "Check wiring: SDA, SCL, VCC and GND");
    }
    let _ = writeln!(out, "--- Scan Complete ---\n");
    found
}
