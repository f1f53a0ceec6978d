//! Serial transport seam.

/// Byte-synchronous serial port.
///
/// Both directions block: `read_byte` spins until a byte arrives and `write_byte`
/// until the transmitter can take one.
pub trait SerialPort {
    /// Transport error.
    type Error: core::fmt::Debug;

    /// Wait for and return the next received byte.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Send one byte.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Send a string.
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for byte in s.bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

impl<T: SerialPort + ?Sized> SerialPort for &mut T {
    type Error = T::Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_byte(byte)
    }

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        (**self).write_str(s)
    }
}
