//! Pico board adapter
//!
//! Bundles the pieces the monitor samples and probes:
//!
//! - ADC0 (GP26): room LM35
//! - ADC1 (GP27): algae LM35
//! - I2C0 (GP4 SDA, GP5 SCL): shared with the LCD
//!
//! The RP2040 ADC is 12-bit; readings are reduced to 10 bits so the
//! LM35 thresholds and the configured 1024-count resolution hold.

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use algaemon_core::traits::{AdcError, AnalogInput, BusProbe, SensorChannel};
use algaemon_drivers::bus::I2cProber;

/// Bits dropped to turn a 12-bit sample into a 10-bit one
const ADC_SHIFT: u16 = 2;

pub struct PicoBoard<'d, I2C> {
    adc: Adc<'d, Blocking>,
    room: Channel<'d>,
    algae: Channel<'d>,
    prober: I2cProber<I2C>,
    delay: Delay,
}

impl<'d, I2C: I2c> PicoBoard<'d, I2C> {
    pub fn new(
        adc: Adc<'d, Blocking>,
        room: Channel<'d>,
        algae: Channel<'d>,
        prober: I2cProber<I2C>,
    ) -> Self {
        Self {
            adc,
            room,
            algae,
            prober,
            delay: Delay,
        }
    }
}

impl<I2C: I2c> AnalogInput for PicoBoard<'_, I2C> {
    fn read_raw(&mut self, channel: SensorChannel) -> Result<u16, AdcError> {
        let pin = match channel {
            SensorChannel::Room => &mut self.room,
            SensorChannel::Algae => &mut self.algae,
        };
        self.adc
            .blocking_read(pin)
            .map(|raw| raw >> ADC_SHIFT)
            .map_err(|_| AdcError::Conversion)
    }
}

impl<I2C: I2c> BusProbe for PicoBoard<'_, I2C> {
    fn probe(&mut self, address: u8) -> bool {
        self.prober.probe(address)
    }
}

impl<I2C: I2c> DelayNs for PicoBoard<'_, I2C> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
