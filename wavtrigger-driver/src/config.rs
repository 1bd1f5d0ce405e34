//! Encoder configuration
//!
//! ```toml
//! baudrate = 57600
//! flush_each_packet = false
//! ```
//!
//! Missing keys take their defaults.

use wavtrigger_hal::{UartConfig, DEFAULT_BAUDRATE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// WAV Trigger serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct WavTriggerConfig {
    /// Baud rate used by `begin` (57600 unless the device's init file
    /// sets another rate)
    pub baudrate: u32,
    /// Flush the transport after every packet
    pub flush_each_packet: bool,
}

impl Default for WavTriggerConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
            flush_each_packet: false,
        }
    }
}

impl WavTriggerConfig {
    /// Line settings passed to the transport: 8N1 at `baudrate`
    pub fn uart_config(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baudrate)
    }

    /// Parse a configuration from TOML text
    #[cfg(feature = "toml")]
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|_| ConfigError::Parse)
    }
}

/// Configuration loading errors
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Not valid TOML, unknown key, or a value of the wrong type
    Parse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavtrigger_hal::{DataBits, Parity, StopBits};

    #[test]
    fn test_defaults() {
        let config = WavTriggerConfig::default();
        assert_eq!(config.baudrate, 57_600);
        assert!(!config.flush_each_packet);
    }

    #[test]
    fn test_uart_config_is_8n1() {
        let uart = WavTriggerConfig {
            baudrate: 38_400,
            flush_each_packet: true,
        }
        .uart_config();

        assert_eq!(uart.baudrate, 38_400);
        assert_eq!(uart.data_bits, DataBits::Eight);
        assert_eq!(uart.parity, Parity::None);
        assert_eq!(uart.stop_bits, StopBits::One);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml() {
        let config = WavTriggerConfig::from_toml("baudrate = 115200\nflush_each_packet = true\n")
            .unwrap();
        assert_eq!(config.baudrate, 115_200);
        assert!(config.flush_each_packet);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_missing_keys_default() {
        let config = WavTriggerConfig::from_toml("flush_each_packet = true").unwrap();
        assert_eq!(config.baudrate, 57_600);

        let empty = WavTriggerConfig::from_toml("").unwrap();
        assert_eq!(empty, WavTriggerConfig::default());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_rejects_bad_input() {
        assert_eq!(
            WavTriggerConfig::from_toml("baudrate = \"fast\""),
            Err(ConfigError::Parse)
        );
        assert_eq!(
            WavTriggerConfig::from_toml("baud = 9600"),
            Err(ConfigError::Parse)
        );
    }
}
