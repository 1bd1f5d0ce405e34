//! WAV Trigger command encoder
//!
//! [`WavTrigger`] turns playback intents (play, stop, gain, fade,
//! cross-fade, synchronised resume, pitch offset) into packets and writes
//! them to any [`UartTx`] transport:
//!
//! ```ignore
//! let mut wt = WavTrigger::begin(uart, WavTriggerConfig::default())?;
//! wt.set_master_gain(-6)?;
//! wt.play_track_poly(12)?;
//! wt.cross_fade_track(12, 13, 0, 2000)?;
//! ```
//!
//! Every call is fire and forget: the device never answers, so `Ok(())`
//! only means the transport accepted the bytes. Numeric inputs are sent as
//! their 16-bit bit pattern; see [`wavtrigger_protocol::wire`] for
//! narrowing wider values.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod trigger;

pub use config::WavTriggerConfig;
#[cfg(feature = "toml")]
pub use config::ConfigError;
pub use error::Error;
pub use trigger::WavTrigger;

pub use wavtrigger_hal::{UartConfig, UartTx};
pub use wavtrigger_protocol::{Command, TrackAction};
