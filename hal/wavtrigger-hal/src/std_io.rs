//! Adapter from `std::io::Write` to [`UartTx`]
//!
//! For host tools driving the device through a USB serial adapter. The port
//! must already be opened at the right baud rate by whatever crate created
//! it; `configure` only records the requested settings.

use std::io::{self, Write};

use crate::uart::{UartConfig, UartTx};

/// Wraps an opened host serial port (or any `std::io::Write`)
#[derive(Debug)]
pub struct StdUart<W> {
    inner: W,
    config: Option<UartConfig>,
}

impl<W: Write> StdUart<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            config: None,
        }
    }

    /// Settings last requested through [`UartTx::configure`]
    pub fn requested_config(&self) -> Option<UartConfig> {
        self.config
    }

    /// Borrow the wrapped writer
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Give back the wrapped writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> UartTx for StdUart<W> {
    type Error = io::Error;

    fn configure(&mut self, config: &UartConfig) -> io::Result<()> {
        self.config = Some(*config);
        Ok(())
    }

    fn write_blocking(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn test_std_uart_collects_bytes() {
        let mut uart = StdUart::new(Vec::new());
        uart.configure(&UartConfig::default()).unwrap();
        uart.write_blocking(&[0xF0, 0xAA]).unwrap();
        uart.write_blocking(&[0x05, 0x0B, 0x55]).unwrap();
        uart.flush().unwrap();

        assert_eq!(uart.requested_config().map(|c| c.baudrate), Some(57_600));
        assert_eq!(uart.into_inner(), [0xF0, 0xAA, 0x05, 0x0B, 0x55]);
    }
}
