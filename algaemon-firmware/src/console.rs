//! Serial console text sink
//!
//! The monitor writes `\n`-terminated text; terminals expect `\r\n`.

use core::fmt;

use embedded_io::Write;

/// `core::fmt::Write` adapter over a blocking UART transmitter
pub struct Console<'a, T> {
    tx: &'a mut T,
}

impl<'a, T: Write> Console<'a, T> {
    pub fn new(tx: &'a mut T) -> Self {
        Self { tx }
    }
}

impl<T: Write> fmt::Write for Console<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut lines = s.split('\n');
        if let Some(first) = lines.next() {
            self.tx.write_all(first.as_bytes()).map_err(|_| fmt::Error)?;
        }
        for line in lines {
            self.tx.write_all(b"\r\n").map_err(|_| fmt::Error)?;
            self.tx.write_all(line.as_bytes()).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}
