//! Monitor facade
//!
//! Owns the state and every component, and exposes the three things the
//! firmware loop does: boot once, feed received bytes, poll the timers.
//!
//! ```text
//! UART bytes ──▶ LineParser ──▶ Dispatcher ──▶ SystemState
//!                                                  │
//! now_ms ──▶ Scheduler ──▶ SensorReader ───────────┤
//!                      └─▶ render ──▶ Screen ──▶ DisplayBackend
//! ```

use core::fmt::Write;

use algaemon_display::{DisplayBackend, DisplayError, Screen};
use algaemon_protocol::{Command, CommandError, LineError, LineParser};

use crate::config::MonitorConfig;
use crate::console::{self, DispatchError, Dispatcher};
use crate::render::render;
use crate::scheduler::{Scheduler, Tick};
use crate::sensor::{NoiseSource, SensorReader};
use crate::state::SystemState;
use crate::traits::{AdcError, Board};

/// Pause between the splash screen and the boot diagnostics (ms)
pub const BOOT_SPLASH_MS: u32 = 1000;

/// Anything that went wrong in one call into the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonitorError {
    /// Received line was dropped
    Line(LineError),
    /// Received line was not applied
    Dispatch(DispatchError),
    /// A sensor burst failed
    Adc(AdcError),
    /// The LCD did not take the update
    Display(DisplayError),
}

impl From<LineError> for MonitorError {
    fn from(e: LineError) -> Self {
        MonitorError::Line(e)
    }
}

impl From<DispatchError> for MonitorError {
    fn from(e: DispatchError) -> Self {
        MonitorError::Dispatch(e)
    }
}

impl From<AdcError> for MonitorError {
    fn from(e: AdcError) -> Self {
        MonitorError::Adc(e)
    }
}

impl From<DisplayError> for MonitorError {
    fn from(e: DisplayError) -> Self {
        MonitorError::Display(e)
    }
}

/// The temperature monitor
pub struct Monitor<N> {
    config: MonitorConfig,
    state: SystemState,
    reader: SensorReader<N>,
    scheduler: Scheduler,
    screen: Screen,
    lines: LineParser,
}

impl<N: NoiseSource> Monitor<N> {
    /// Create a monitor in its power-on state
    pub fn new(config: MonitorConfig, noise: N) -> Self {
        Self {
            reader: SensorReader::new(&config, noise),
            scheduler: Scheduler::new(&config.timing),
            state: SystemState::new(),
            screen: Screen::new(),
            lines: LineParser::new(),
            config,
        }
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn reader(&self) -> &SensorReader<N> {
        &self.reader
    }

    /// Startup sequence
    ///
    /// Banner, splash screen, bus scan and sensor self test, then the
    /// help table. The serial part always runs; the first display error
    /// is returned at the end.
    pub fn boot<B, D, W>(
        &mut self,
        board: &mut B,
        display: &mut D,
        out: &mut W,
    ) -> Result<(), MonitorError>
    where
        B: Board,
        D: DisplayBackend,
        W: Write,
    {
        let _ = writeln!(out, "\n=== Room/Algae Temperature Monitor ===");
        let _ = writeln!(out, "Initializing...");

        self.screen.clear();
        self.screen.set_line(0, "Algae Cooling System");
        self.screen.set_line(1, "Starting...");
        let splash = self.screen.render_to(display);

        board.delay_ms(BOOT_SPLASH_MS);

        console::scan_bus(board, out);
        self.reader.self_test(board, out);

        self.screen.clear();
        let cleared = self.screen.render_to(display);

        let _ = writeln!(out, "\nSystem Ready!");
        let _ = writeln!(out, "Type 'help' for commands");
        console::print_help(out);

        splash.and(cleared)?;
        Ok(())
    }

    /// Run one complete line as a command
    pub fn handle_line<B: Board, W: Write>(
        &mut self,
        line: &str,
        board: &mut B,
        out: &mut W,
    ) -> Result<Command, DispatchError> {
        let mut dispatcher = Dispatcher {
            state: &mut self.state,
            reader: &mut self.reader,
            limits: &self.config.simulation,
        };
        dispatcher.process_line(line, board, out)
    }

    /// Feed one received byte
    ///
    /// When the byte completes a line, the line is dispatched and the
    /// command that ran is returned. Blank lines are not an error.
    pub fn feed_byte<B: Board, W: Write>(
        &mut self,
        byte: u8,
        board: &mut B,
        out: &mut W,
    ) -> Result<Option<Command>, MonitorError> {
        let Some(line) = self.lines.feed(byte)? else {
            return Ok(None);
        };
        match self.handle_line(&line, board, out) {
            Ok(command) => Ok(Some(command)),
            Err(DispatchError::Command(CommandError::Empty)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Check the timers and run whatever is due
    ///
    /// An update cycle refreshes the readings and redraws the LCD; a
    /// fluctuation step advances the simulated series. Both run to
    /// completion even when one part fails; the first failure is
    /// returned.
    pub fn poll<B, D, W>(
        &mut self,
        now_ms: u32,
        board: &mut B,
        display: &mut D,
        out: &mut W,
    ) -> Result<Tick, MonitorError>
    where
        B: Board,
        D: DisplayBackend,
        W: Write,
    {
        let tick = self.scheduler.poll(now_ms, self.state.simulation_enabled);
        let mut result: Result<(), MonitorError> = Ok(());

        if tick.update {
            let sampled = self.reader.update(&mut self.state, board, out);
            let drawn = self.refresh_display(display);
            result = sampled.map_err(MonitorError::from).and(drawn.map_err(MonitorError::from));
        }

        if tick.fluctuate {
            self.reader.advance_simulation();
        }

        result.map(|()| tick)
    }

    /// Render the current readings and push them to the LCD
    pub fn refresh_display<D: DisplayBackend>(
        &mut self,
        display: &mut D,
    ) -> Result<(), DisplayError> {
        render(&self.state, &mut self.screen, &self.config.display);
        self.screen.render_to(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeBoard, ZeroNoise};
    use crate::traits::SensorChannel;
    use heapless::String as HString;
    use std::string::String;
    use std::vec::Vec;

    /// Display that keeps the last drawn frame
    struct FrameDisplay {
        frames: usize,
        rows: [HString<64>; 2],
        fail: bool,
    }

    impl FrameDisplay {
        fn new() -> Self {
            Self {
                frames: 0,
                rows: [HString::new(), HString::new()],
                fail: false,
            }
        }
    }

    impl DisplayBackend for FrameDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.frames += 1;
            self.rows = [HString::new(), HString::new()];
            Ok(())
        }

        fn draw_text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
            let slot = self
                .rows
                .get_mut(row as usize)
                .ok_or(DisplayError::InvalidCoordinates)?;
            slot.clear();
            slot.push_str(text).map_err(|_| DisplayError::InvalidCoordinates)
        }

        fn dimensions(&self) -> (u8, u8) {
            (16, 2)
        }
    }

    fn monitor() -> Monitor<ZeroNoise> {
        Monitor::new(MonitorConfig::default(), ZeroNoise)
    }

    fn feed_line(
        monitor: &mut Monitor<ZeroNoise>,
        line: &str,
        board: &mut FakeBoard,
        out: &mut String,
    ) -> Vec<Result<Option<Command>, MonitorError>> {
        let mut results = Vec::new();
        for byte in line.bytes() {
            let result = monitor.feed_byte(byte, board, out);
            if result != Ok(None) {
                results.push(result);
            }
        }
        results
    }

    #[test]
    fn test_boot_sequence() {
        let mut monitor = monitor();
        let mut board = FakeBoard::new(60, 40).with_devices(&[0x27]);
        let mut display = FrameDisplay::new();
        let mut out = String::new();

        monitor.boot(&mut board, &mut display, &mut out).unwrap();

        let banner = out.find("=== Room/Algae Temperature Monitor ===").unwrap();
        let scan = out.find("--- I2C Device Scanner ---").unwrap();
        let test = out.find("--- LM35 Sensor Test ---").unwrap();
        let ready = out.find("System Ready!").unwrap();
        let help = out.find("=== AVAILABLE COMMANDS ===").unwrap();
        assert!(banner < scan && scan < test && test < ready && ready < help);
        assert!(out.contains("  → LCD Display"));

        // Splash, then cleared
        assert_eq!(display.frames, 2);
        assert_eq!(display.rows[0].as_str(), "");
        assert_eq!(board.delayed_ms, BOOT_SPLASH_MS);
    }

    #[test]
    fn test_boot_without_display_still_prints() {
        let mut monitor = monitor();
        let mut board = FakeBoard::new(60, 40);
        let mut display = FrameDisplay::new();
        display.fail = true;
        let mut out = String::new();

        let result = monitor.boot(&mut board, &mut display, &mut out);

        assert_eq!(result, Err(MonitorError::Display(DisplayError::Communication)));
        assert!(out.contains("No I2C devices found!"));
        assert!(out.contains("System Ready!"));
    }

    #[test]
    fn test_update_cycle_draws_readings() {
        let mut monitor = monitor();
        let mut board = FakeBoard::new(60, 40);
        let mut display = FrameDisplay::new();
        let mut out = String::new();

        let tick = monitor.poll(1999, &mut board, &mut display, &mut out).unwrap();
        assert!(tick.is_idle());
        assert_eq!(display.frames, 0);

        let tick = monitor.poll(2000, &mut board, &mut display, &mut out).unwrap();
        assert!(tick.update);
        assert_eq!(display.rows[0].as_str(), "Room: 29.3°C");
        assert_eq!(display.rows[1].as_str(), "Algae:19.5°C");
        assert_eq!(board.reads, 20);
    }

    #[test]
    fn test_commands_from_bytes() {
        let mut monitor = monitor();
        let mut board = FakeBoard::new(60, 40);
        let mut out = String::new();

        let results = feed_line(&mut monitor, "fake on\r\n\r\nset room 30\n", &mut board, &mut out);

        assert_eq!(
            results,
            [Ok(Some(Command::FakeOn)), Ok(Some(Command::SetRoom(30.0)))]
        );
        assert!(monitor.state().simulation_enabled);
        assert_eq!(monitor.reader().series(SensorChannel::Room).current(), 30.0);
    }

    #[test]
    fn test_carriage_return_terminal() {
        let mut monitor = monitor();
        let mut board = FakeBoard::new(60, 40);
        let mut out = String::new();

        let results = feed_line(&mut monitor, "help\rfake on\r", &mut board, &mut out);

        assert_eq!(results, [Ok(Some(Command::Help)), Ok(Some(Command::FakeOn))]);
        assert!(monitor.state().simulation_enabled);
        assert!(out.contains("=== AVAILABLE COMMANDS ==="));
    }

    #[test]
    fn test_bad_lines_reported() {
        let mut monitor = monitor();
        let mut board = FakeBoard::new(60, 40);
        let mut out = String::new();

        let results = feed_line(&mut monitor, "set room 500\nfoo\n", &mut board, &mut out);
        assert_eq!(
            results,
            [
                Err(MonitorError::Dispatch(DispatchError::Setpoint(
                    console::SetpointError::OutOfRange
                ))),
                Err(MonitorError::Dispatch(DispatchError::Command(
                    CommandError::Unknown
                ))),
            ]
        );

        let long = "x".repeat(100) + "\n";
        let results = feed_line(&mut monitor, &long, &mut board, &mut out);
        assert_eq!(results, [Err(MonitorError::Line(LineError::Overflow))]);
    }

    #[test]
    fn test_simulation_flow() {
        let mut monitor = monitor();
        let mut board = FakeBoard::new(60, 40);
        let mut display = FrameDisplay::new();
        let mut out = String::new();

        feed_line(&mut monitor, "fake on\nset algae 25\n", &mut board, &mut out);

        let tick = monitor.poll(1000, &mut board, &mut display, &mut out).unwrap();
        assert!(tick.fluctuate);
        assert_eq!(
            monitor.reader().series(SensorChannel::Algae).baseline(),
            Some(25.0)
        );

        monitor.poll(2000, &mut board, &mut display, &mut out).unwrap();
        assert_eq!(monitor.state().algae_celsius, 25.0);
        assert_eq!(display.rows[0].as_str(), "Room: 24.0°C   F");
        assert_eq!(display.rows[1].as_str(), "Algae:25.0°C");
        // No ADC traffic in fake mode
        assert_eq!(board.reads, 0);
    }

    #[test]
    fn test_baseline_survives_mode_toggle() {
        let mut monitor = monitor();
        let mut board = FakeBoard::new(60, 40);
        let mut display = FrameDisplay::new();
        let mut out = String::new();

        feed_line(&mut monitor, "fake on\n", &mut board, &mut out);
        monitor.poll(1000, &mut board, &mut display, &mut out).unwrap();
        let baseline = monitor.reader().series(SensorChannel::Room).baseline();
        assert_eq!(baseline, Some(24.0));

        feed_line(&mut monitor, "fake off\nset room 40\nfake on\n", &mut board, &mut out);
        monitor.poll(2000, &mut board, &mut display, &mut out).unwrap();

        let series = monitor.reader().series(SensorChannel::Room);
        assert_eq!(series.baseline(), baseline);
        // 40 is far off the kept baseline, so the step snapped back
        assert_eq!(series.current(), 24.0);
    }

    #[test]
    fn test_adc_failure_still_redraws() {
        let mut monitor = monitor();
        let mut board = FakeBoard::new(60, 40);
        board.failing = Some(SensorChannel::Room);
        let mut display = FrameDisplay::new();
        let mut out = String::new();

        let result = monitor.poll(2000, &mut board, &mut display, &mut out);

        assert_eq!(result, Err(MonitorError::Adc(AdcError::Conversion)));
        assert_eq!(display.frames, 1);
        assert_eq!(display.rows[0].as_str(), "Room: 0.0°C");
        assert_eq!(display.rows[1].as_str(), "Algae:19.5°C");
    }
}
