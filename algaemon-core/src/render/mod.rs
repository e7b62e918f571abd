//! Display writer
//!
//! Lays the two readings out on the 16x2 screen buffer:
//!
//! ```text
//! col  0     6        15
//! row0 Room: 24.5°C    F
//! row1 Algae:22.0°C
//! ```
//!
//! Values outside the configured window show `ERROR`. The `F` marker is
//! present only in simulation mode.

use core::fmt::Write;

use algaemon_display::Screen;
use heapless::String;

use crate::config::DisplayConfig;
use crate::state::SystemState;
use crate::traits::SensorChannel;

/// Column where values start
pub const VALUE_COL: usize = 6;

/// Position of the simulation marker
pub const MARKER_POS: (usize, usize) = (0, 15);

/// Marker shown while readings are simulated
pub const SIMULATION_MARKER: &str = "F";

/// Text shown for an implausible value
pub const ERROR_TEXT: &str = "ERROR";

/// Format one temperature for the LCD
///
/// `valid_min_c <= celsius < valid_max_c` renders with one decimal and a
/// Celsius suffix; anything else (including NaN) renders as `ERROR`.
pub fn format_temperature(celsius: f32, config: &DisplayConfig) -> String<16> {
    let mut text = String::new();
    if celsius >= config.valid_min_c && celsius < config.valid_max_c {
        // "149.9°C" is 8 bytes; fits
        let _ = write!(text, "{:.1}°C", celsius);
    } else {
        let _ = text.push_str(ERROR_TEXT);
    }
    text
}

/// Redraw the screen buffer from the current state
pub fn render(state: &SystemState, screen: &mut Screen, config: &DisplayConfig) {
    screen.clear();

    for (row, channel) in SensorChannel::ALL.iter().enumerate() {
        let mut label: String<8> = String::new();
        let _ = write!(label, "{}:", channel.label());
        screen.write_at(row, 0, &label);
        screen.write_at(
            row,
            VALUE_COL,
            &format_temperature(state.reading(*channel), config),
        );
    }

    if state.simulation_enabled {
        screen.write_at(MARKER_POS.0, MARKER_POS.1, SIMULATION_MARKER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(screen: &Screen, row: usize) -> std::string::String {
        screen.get_line(row).unwrap().as_str().into()
    }

    #[test]
    fn test_render_real_mode() {
        let mut state = SystemState::new();
        state.room_celsius = 24.46;
        state.algae_celsius = 22.0;
        let mut screen = Screen::new();

        render(&state, &mut screen, &DisplayConfig::default());

        assert_eq!(line(&screen, 0), "Room: 24.5°C");
        assert_eq!(line(&screen, 1), "Algae:22.0°C");
        assert_eq!(screen.cell(0, 15), Some(' '));
    }

    #[test]
    fn test_render_simulation_marker() {
        let mut state = SystemState::new();
        state.simulation_enabled = true;
        state.room_celsius = 24.0;
        state.algae_celsius = 22.0;
        let mut screen = Screen::new();

        render(&state, &mut screen, &DisplayConfig::default());

        assert_eq!(screen.cell(0, 15), Some('F'));
        assert_eq!(line(&screen, 0), "Room: 24.0°C   F");
    }

    #[test]
    fn test_render_error_values() {
        let mut state = SystemState::new();
        state.room_celsius = -0.1;
        state.algae_celsius = 150.0;
        let mut screen = Screen::new();

        render(&state, &mut screen, &DisplayConfig::default());

        assert_eq!(line(&screen, 0), "Room: ERROR");
        assert_eq!(line(&screen, 1), "Algae:ERROR");
    }

    #[test]
    fn test_render_replaces_previous_content() {
        let mut screen = Screen::new();
        screen.set_line(0, "Algae Cooling System");
        screen.set_line(1, "Starting...");

        render(&SystemState::new(), &mut screen, &DisplayConfig::default());

        assert_eq!(line(&screen, 0), "Room: 0.0°C");
        assert_eq!(line(&screen, 1), "Algae:0.0°C");
    }

    #[test]
    fn test_format_bounds() {
        let config = DisplayConfig::default();
        assert_eq!(format_temperature(0.0, &config).as_str(), "0.0°C");
        assert_eq!(format_temperature(149.9, &config).as_str(), "149.9°C");
        assert_eq!(format_temperature(150.0, &config).as_str(), "ERROR");
        assert_eq!(format_temperature(f32::NAN, &config).as_str(), "ERROR");
    }

    proptest! {
        #[test]
        fn prop_in_range_is_numeric(v in 0.0f32..150.0) {
            let text = format_temperature(v, &DisplayConfig::default());
            prop_assert_eq!(text.as_str(), format!("{:.1}°C", v));
        }

        #[test]
        fn prop_out_of_range_is_error(v in prop_oneof![-1.0e6f32..0.0, 150.0f32..1.0e6]) {
            let text = format_temperature(v, &DisplayConfig::default());
            prop_assert_eq!(text.as_str(), ERROR_TEXT);
        }
    }
}
