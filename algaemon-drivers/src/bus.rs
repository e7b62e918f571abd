//! I2C bus prober

use algaemon_core::traits::BusProbe;
use embedded_hal::i2c::I2c;

/// Presence check by empty write
///
/// A device that ACKs its address makes the write succeed. Works with a
/// shared bus handle so it can sit next to the LCD driver.
pub struct I2cProber<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> I2cProber<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }
}

impl<I2C: I2c> BusProbe for I2cProber<I2C> {
    fn probe(&mut self, address: u8) -> bool {
        self.i2c.write(address, &[]).is_ok()
    }
}
