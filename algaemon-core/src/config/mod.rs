//! Configuration types
//!
//! Board-agnostic configuration structures, filled from defaults or from
//! the TOML file embedded in the firmware.

pub mod parse;
pub mod types;

pub use parse::ParseError;
pub use types::*;
