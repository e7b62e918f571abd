//! Console command grammar
//!
//! Every command is a single line. Matching is case-insensitive and
//! ignores surrounding whitespace:
//!
//! | Line                | Command                  |
//! |---------------------|--------------------------|
//! | `scan`              | [`Command::Scan`]        |
//! | `fake on`/`fake off`| [`Command::FakeOn`]/[`Command::FakeOff`] |
//! | `set room <value>`  | [`Command::SetRoom`]     |
//! | `set algae <value>` | [`Command::SetAlgae`]    |
//! | `status`            | [`Command::Status`]      |
//! | `debug on`/`debug off` | [`Command::DebugOn`]/[`Command::DebugOff`] |
//! | `calibrate`         | [`Command::Calibrate`]   |
//! | `help`              | [`Command::Help`]        |

use crate::number::parse_lenient_f32;

const SET_ROOM_PREFIX: &str = "set room ";
const SET_ALGAE_PREFIX: &str = "set algae ";

/// Errors returned when a line is not a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line was blank after trimming
    Empty,
    /// Line did not match any command
    Unknown,
}

/// A parsed console command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Scan the I2C bus and run the sensor self test
    Scan,
    /// Switch to simulated readings
    FakeOn,
    /// Switch back to the real sensors
    FakeOff,
    /// Set the simulated room temperature (°C, not yet range checked)
    SetRoom(f32),
    /// Set the simulated algae temperature (°C, not yet range checked)
    SetAlgae(f32),
    /// Print mode flags and current readings
    Status,
    /// Print raw ADC values on every sample
    DebugOn,
    /// Stop printing raw ADC values
    DebugOff,
    /// Long sampling pass with troubleshooting notes
    Calibrate,
    /// Print the command table
    Help,
}

impl Command {
    /// Parse a command from a received line
    ///
    /// `set room`/`set algae` take the rest of the line as a leniently
    /// parsed number; see [`parse_lenient_f32`].
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        let exact = [
            ("scan", Command::Scan),
            ("fake on", Command::FakeOn),
            ("fake off", Command::FakeOff),
            ("status", Command::Status),
            ("debug on", Command::DebugOn),
            ("debug off", Command::DebugOff),
            ("calibrate", Command::Calibrate),
            ("help", Command::Help),
        ];
        if let Some((_, cmd)) = exact
            .iter()
            .find(|(keyword, _)| line.eq_ignore_ascii_case(keyword))
        {
            return Ok(*cmd);
        }

        if let Some(arg) = strip_prefix_ignore_case(line, SET_ROOM_PREFIX) {
            return Ok(Command::SetRoom(parse_lenient_f32(arg)));
        }
        if let Some(arg) = strip_prefix_ignore_case(line, SET_ALGAE_PREFIX) {
            return Ok(Command::SetAlgae(parse_lenient_f32(arg)));
        }

        Err(CommandError::Unknown)
    }
}

/// ASCII case-insensitive `str::strip_prefix`
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

/// One row of the help table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    /// Example invocation
    pub usage: &'static str,
    /// What the command does
    pub summary: &'static str,
}

/// Help table, one entry per command in grammar order
pub const HELP_ENTRIES: [HelpEntry; 10] = [
    HelpEntry {
        usage: "scan",
        summary: "Scan I2C and test LM35 sensors",
    },
    HelpEntry {
        usage: "fake on",
        summary: "Enable mock/fake readings",
    },
    HelpEntry {
        usage: "fake off",
        summary: "Use real sensor readings",
    },
    HelpEntry {
        usage: "set room 25.5",
        summary: "Set fake room temp to 25.5°C",
    },
    HelpEntry {
        usage: "set algae 22.0",
        summary: "Set fake algae temp to 22.0°C",
    },
    HelpEntry {
        usage: "status",
        summary: "Show current temperatures",
    },
    HelpEntry {
        usage: "debug on",
        summary: "Show ADC values and voltages",
    },
    HelpEntry {
        usage: "debug off",
        summary: "Disable debug output",
    },
    HelpEntry {
        usage: "calibrate",
        summary: "Show detailed sensor readings",
    },
    HelpEntry {
        usage: "help",
        summary: "Show this help menu",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_commands() {
        assert_eq!(Command::parse("scan"), Ok(Command::Scan));
        assert_eq!(Command::parse("fake on"), Ok(Command::FakeOn));
        assert_eq!(Command::parse("fake off"), Ok(Command::FakeOff));
        assert_eq!(Command::parse("status"), Ok(Command::Status));
        assert_eq!(Command::parse("debug on"), Ok(Command::DebugOn));
        assert_eq!(Command::parse("debug off"), Ok(Command::DebugOff));
        assert_eq!(Command::parse("calibrate"), Ok(Command::Calibrate));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(Command::parse("  HELP\r"), Ok(Command::Help));
        assert_eq!(Command::parse("Fake On"), Ok(Command::FakeOn));
        assert_eq!(Command::parse("SET ROOM 25.5"), Ok(Command::SetRoom(25.5)));
    }

    #[test]
    fn test_set_commands() {
        assert_eq!(Command::parse("set room 25.5"), Ok(Command::SetRoom(25.5)));
        assert_eq!(Command::parse("set algae -3"), Ok(Command::SetAlgae(-3.0)));
    }

    #[test]
    fn test_set_without_number_is_zero() {
        assert_eq!(Command::parse("set room warm"), Ok(Command::SetRoom(0.0)));
    }

    #[test]
    fn test_set_without_argument_is_unknown() {
        // Trimming removes the space the prefix needs
        assert_eq!(Command::parse("set room"), Err(CommandError::Unknown));
        assert_eq!(Command::parse("set algae   "), Err(CommandError::Unknown));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert_eq!(Command::parse(""), Err(CommandError::Empty));
        assert_eq!(Command::parse(" \t\r"), Err(CommandError::Empty));
        assert_eq!(Command::parse("reboot"), Err(CommandError::Unknown));
        assert_eq!(Command::parse("fake"), Err(CommandError::Unknown));
        assert_eq!(Command::parse("statusx"), Err(CommandError::Unknown));
    }

    #[test]
    fn test_non_ascii_does_not_panic() {
        assert_eq!(Command::parse("sét room 1"), Err(CommandError::Unknown));
        assert_eq!(Command::parse("°°°°°°°°°°"), Err(CommandError::Unknown));
    }

    #[test]
    fn test_help_table_lists_every_command() {
        assert_eq!(HELP_ENTRIES.len(), 10);
        for entry in HELP_ENTRIES.iter() {
            assert!(Command::parse(entry.usage).is_ok(), "{}", entry.usage);
        }
    }

    proptest! {
        #[test]
        fn prop_set_room_parses_value(t in -1000.0f32..1000.0) {
            let mut line = heapless::String::<64>::new();
            core::fmt::write(&mut line, format_args!("set room {}", t)).unwrap();
            prop_assert_eq!(Command::parse(&line), Ok(Command::SetRoom(t)));
        }

        #[test]
        fn prop_parse_never_panics(s in "\\PC{0,40}") {
            let _ = Command::parse(&s);
        }
    }
}
