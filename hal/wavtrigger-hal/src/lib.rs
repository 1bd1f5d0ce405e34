//! WAV Trigger transport abstraction layer
//!
//! This crate defines the byte-sink trait the command encoder writes to.
//! Board crates and host tools implement it for their serial port, so the
//! same encoder runs on any UART without compile-time backend selection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  wavtrigger-driver (command encoder)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wavtrigger-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  embedded-io  │       │  std::io      │
//! │  writers      │       │  (feature)    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`] - Serial transmit
//! - [`io::IoUart`] - Adapter for any `embedded_io::Write`

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

pub mod io;
#[cfg(feature = "std")]
pub mod std_io;
pub mod uart;

// Re-export key types at crate root for convenience
pub use io::IoUart;
#[cfg(feature = "std")]
pub use std_io::StdUart;
pub use uart::{DataBits, Parity, StopBits, UartConfig, UartTx, DEFAULT_BAUDRATE};
