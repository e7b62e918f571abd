//! I2C bus probing

/// Presence check for devices on the I2C bus
pub trait BusProbe {
    /// Address a device with an empty write; `true` if it acknowledged
    ///
    /// - `address`: 7-bit I2C address
    fn probe(&mut self, address: u8) -> bool;
}
