//! Serial console protocol
//!
//! This crate defines the text protocol spoken over the monitor's serial
//! link. The protocol is human-oriented: newline-terminated ASCII lines in,
//! unstructured text out.
//!
//! # Protocol Overview
//!
//! ```text
//! host ──"set room 25.5\n"──▶ LineParser ──▶ Command::parse ──▶ SetRoom(25.5)
//! ```
//!
//! Commands are matched case-insensitively after trimming surrounding
//! whitespace, either exactly (`status`) or by literal prefix
//! (`set room <value>`). Replies are free text and are not part of this
//! crate.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod number;

pub use command::{Command, CommandError, HelpEntry, HELP_ENTRIES};
pub use line::{Line, LineError, LineParser, MAX_LINE_LEN};
pub use number::parse_lenient_f32;
