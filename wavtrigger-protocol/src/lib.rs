//! WAV Trigger serial control protocol
//!
//! This crate encodes the commands a host sends to a Robertsonics WAV
//! Trigger over its serial control port. Encoding is pure and allocation
//! free: every command becomes one fixed-size [`Packet`].
//!
//! # Protocol Overview
//!
//! ```text
//! ┌──────┬──────┬────────┬─────────┬─────────────┬────────────┐
//! │ SYNC │ SYNC │ LENGTH │ COMMAND │ PAYLOAD     │ TERMINATOR │
//! │ 0xF0 │ 0xAA │ 1B     │ 1B      │ 0–7B        │ 0x55       │
//! └──────┴──────┴────────┴─────────┴─────────────┴────────────┘
//! ```
//!
//! LENGTH counts every byte of the packet, itself included. Multi-byte
//! payload fields are little-endian; gains and offsets are sent as the
//! two's-complement bit pattern of an `i16`.
//!
//! The link is one-directional. [`PacketParser`] decodes command packets
//! (for loopback checks, bus sniffing or emulating the device) and is not a
//! telemetry path.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod action;
pub mod command;
pub mod packet;
pub mod wire;

pub use action::TrackAction;
pub use command::{cross_fade_sequence, Command, CommandCode, CROSS_FADE_FLOOR_GAIN};
pub use packet::{
    Packet, PacketError, PacketParser, MAX_PACKET_LEN, MAX_PAYLOAD_LEN, MIN_PACKET_LEN, SYNC_1,
    SYNC_2, TERMINATOR,
};
