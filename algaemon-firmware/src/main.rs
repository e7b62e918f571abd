//! Algaemon - Room/Algae Temperature Monitor Firmware
//!
//! Main firmware binary for RP2040-based boards. Reads two LM35 sensors,
//! shows them on a 16x2 I2C LCD and serves a line-based serial console.
//!
//! Everything runs in one polling loop: received bytes go to the command
//! dispatcher, then the scheduler decides whether a sensor update or a
//! simulated fluctuation step is due. Sampling bursts block the loop
//! until they finish.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Pull;
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Instant};
use embedded_hal_bus::i2c::RefCellDevice;
use embedded_io::{Read, ReadReady};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use algaemon_core::sensor::RngNoise;
use algaemon_core::traits::{AnalogInput, SensorChannel};
use algaemon_core::Monitor;
use algaemon_drivers::bus::I2cProber;
use algaemon_drivers::lcd::Hd44780;

use crate::board::PicoBoard;
use crate::console::Console;

mod board;
mod config;
mod console;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Algaemon firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    info!(
        "Sensors on pins {}/{}, LCD at {:#x}, {} baud",
        config.sensors.room_pin,
        config.sensors.algae_pin,
        config.display.i2c_address,
        config.serial.baudrate
    );

    // Serial console on UART0 (GP0 TX, GP1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.serial.baudrate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (mut tx, mut rx) = uart.split();
    info!("UART initialized for console");

    // LM35 outputs on ADC0/ADC1
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let room = Channel::new_pin(p.PIN_26, Pull::None);
    let algae = Channel::new_pin(p.PIN_27, Pull::None);

    // I2C0 shared between the LCD and the bus scanner
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, I2cConfig::default());
    let i2c_bus = RefCell::new(i2c);

    let mut lcd = Hd44780::new(
        RefCellDevice::new(&i2c_bus),
        Delay,
        config.display.i2c_address,
        config.display.cols,
        config.display.rows,
    );
    match lcd.init() {
        Ok(()) => info!("LCD initialized"),
        Err(e) => warn!("LCD init failed: {}", Debug2Format(&e)),
    }

    let prober = I2cProber::new(RefCellDevice::new(&i2c_bus));
    let mut board = PicoBoard::new(adc, room, algae, prober);

    let noise = RngNoise(SmallRng::seed_from_u64(seed(&mut board)));
    let mut monitor = Monitor::new(config, noise);

    {
        let mut out = Console::new(&mut tx);
        if let Err(e) = monitor.boot(&mut board, &mut lcd, &mut out) {
            warn!("Boot finished with error: {}", e);
        }
    }
    info!("Boot complete, entering main loop");

    let mut rx_chunk = [0u8; 32];
    loop {
        // Serial commands
        if rx.read_ready().unwrap_or(false) {
            match rx.read(&mut rx_chunk) {
                Ok(n) => {
                    let mut out = Console::new(&mut tx);
                    for &byte in &rx_chunk[..n] {
                        match monitor.feed_byte(byte, &mut board, &mut out) {
                            Ok(Some(command)) => debug!("Command: {}", command),
                            Ok(None) => {}
                            Err(e) => debug!("Line rejected: {}", e),
                        }
                    }
                }
                Err(e) => warn!("UART read error: {}", Debug2Format(&e)),
            }
        }

        // Timers
        let now_ms = Instant::now().as_millis() as u32;
        let mut out = Console::new(&mut tx);
        match monitor.poll(now_ms, &mut board, &mut lcd, &mut out) {
            Ok(tick) if !tick.is_idle() => trace!("Tick: {}", tick),
            Ok(_) => {}
            Err(e) => warn!("Cycle error: {}", e),
        }

        embassy_futures::yield_now().await;
    }
}

/// Seed for the simulated readings
///
/// The low bits of a few raw ADC reads are noisy enough to vary between
/// boots; the uptime counter is mixed in for good measure.
fn seed<B: AnalogInput>(board: &mut B) -> u64 {
    let mut seed = Instant::now().as_ticks();
    for _ in 0..8 {
        for channel in SensorChannel::ALL {
            let raw = board.read_raw(channel).unwrap_or(0);
            seed = seed.rotate_left(5) ^ u64::from(raw);
        }
    }
    seed
}
