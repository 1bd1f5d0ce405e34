//! Adapter from `embedded-io` writers to [`UartTx`]
//!
//! Board HALs (embassy, esp-hal, rp-hal, ...) expose their UART transmitters
//! as `embedded_io::Write`. Those peripherals are configured when they are
//! constructed, so [`UartTx::configure`] is accepted without touching the
//! port.

use embedded_io::{ErrorType, Write};

use crate::uart::{UartConfig, UartTx};

/// Wraps an already-configured `embedded_io::Write` serial transmitter
#[derive(Debug)]
pub struct IoUart<T> {
    inner: T,
}

impl<T: Write> IoUart<T> {
    /// Wrap a writer
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped writer
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Give back the wrapped writer
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write> UartTx for IoUart<T> {
    type Error = <T as ErrorType>::Error;

    fn configure(&mut self, _config: &UartConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Writer that accepts at most two bytes per call to exercise `write_all`
    struct Trickle {
        buf: [u8; 16],
        len: usize,
        flushed: bool,
    }

    impl ErrorType for Trickle {
        type Error = Infallible;
    }

    impl Write for Trickle {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            let n = buf.len().min(2);
            self.buf[self.len..self.len + n].copy_from_slice(&buf[..n]);
            self.len += n;
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            self.flushed = true;
            Ok(())
        }
    }

    #[test]
    fn test_write_blocking_writes_everything_in_order() {
        let mut uart = IoUart::new(Trickle {
            buf: [0; 16],
            len: 0,
            flushed: false,
        });

        uart.configure(&UartConfig::default()).unwrap();
        uart.write_blocking(&[0xF0, 0xAA, 0x05, 0x04, 0x55]).unwrap();
        uart.flush().unwrap();

        let inner = uart.into_inner();
        assert_eq!(&inner.buf[..inner.len], &[0xF0, 0xAA, 0x05, 0x04, 0x55]);
        assert!(inner.flushed);
    }
}
