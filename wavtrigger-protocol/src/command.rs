//! Commands understood by the WAV Trigger
//!
//! Each [`Command`] variant maps to exactly one packet shape. Track numbers
//! and fade times are `u16`, gains and offsets are `i16`; all are sent
//! little-endian.

use crate::action::TrackAction;
use crate::packet::{Packet, PacketError};

// Command codes
const CMD_TRACK_CONTROL: u8 = 3;
const CMD_STOP_ALL: u8 = 4;
const CMD_MASTER_VOLUME: u8 = 5;
const CMD_TRACK_VOLUME: u8 = 8;
const CMD_TRACK_FADE: u8 = 10;
const CMD_RESUME_ALL_SYNC: u8 = 11;
const CMD_SAMPLERATE_OFFSET: u8 = 12;

/// Gain a cross-fade starts the incoming track at and fades the outgoing
/// track down to
pub const CROSS_FADE_FLOOR_GAIN: i16 = -40;

/// Command code byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandCode {
    TrackControl,
    StopAll,
    MasterVolume,
    TrackVolume,
    TrackFade,
    ResumeAllSync,
    SampleRateOffset,
}

impl CommandCode {
    /// Parse a command code from its wire format byte
    ///
    /// Codes the device documents but this encoder never sends are
    /// rejected rather than guessed at.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_TRACK_CONTROL => Some(CommandCode::TrackControl),
            CMD_STOP_ALL => Some(CommandCode::StopAll),
            CMD_MASTER_VOLUME => Some(CommandCode::MasterVolume),
            CMD_TRACK_VOLUME => Some(CommandCode::TrackVolume),
            CMD_TRACK_FADE => Some(CommandCode::TrackFade),
            CMD_RESUME_ALL_SYNC => Some(CommandCode::ResumeAllSync),
            CMD_SAMPLERATE_OFFSET => Some(CommandCode::SampleRateOffset),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            CommandCode::TrackControl => CMD_TRACK_CONTROL,
            CommandCode::StopAll => CMD_STOP_ALL,
            CommandCode::MasterVolume => CMD_MASTER_VOLUME,
            CommandCode::TrackVolume => CMD_TRACK_VOLUME,
            CommandCode::TrackFade => CMD_TRACK_FADE,
            CommandCode::ResumeAllSync => CMD_RESUME_ALL_SYNC,
            CommandCode::SampleRateOffset => CMD_SAMPLERATE_OFFSET,
        }
    }

    /// Total packet size for this command, framing included
    pub fn packet_len(self) -> usize {
        match self {
            CommandCode::StopAll | CommandCode::ResumeAllSync => 5,
            CommandCode::MasterVolume | CommandCode::SampleRateOffset => 7,
            CommandCode::TrackControl => 8,
            CommandCode::TrackVolume => 9,
            CommandCode::TrackFade => 12,
        }
    }
}

/// A single device command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Per-track transport control
    TrackControl { track: u16, action: TrackAction },
    /// Stop every playing track
    StopAll,
    /// Set the output gain
    MasterVolume { gain: i16 },
    /// Set one track's gain immediately
    TrackVolume { track: u16, gain: i16 },
    /// Ramp one track's gain over `time_ms`, optionally stopping it at the end
    TrackFade {
        track: u16,
        gain: i16,
        time_ms: u16,
        stop_at_end: bool,
    },
    /// Resume all paused (or loaded) tracks at the same sample position
    ResumeAllSync,
    /// Playback sample-rate offset (pitch bend)
    SampleRateOffset { offset: i16 },
}

impl Command {
    /// Command code of the packet this command encodes to
    pub fn code(&self) -> CommandCode {
        match self {
            Command::TrackControl { .. } => CommandCode::TrackControl,
            Command::StopAll => CommandCode::StopAll,
            Command::MasterVolume { .. } => CommandCode::MasterVolume,
            Command::TrackVolume { .. } => CommandCode::TrackVolume,
            Command::TrackFade { .. } => CommandCode::TrackFade,
            Command::ResumeAllSync => CommandCode::ResumeAllSync,
            Command::SampleRateOffset { .. } => CommandCode::SampleRateOffset,
        }
    }

    /// Encode this command into a packet
    ///
    /// Pure: equal commands always give byte-identical packets.
    pub fn to_packet(&self) -> Packet {
        let code = self.code().to_byte();
        match *self {
            Command::TrackControl { track, action } => {
                let [lo, hi] = track.to_le_bytes();
                Packet::with_payload(code, [action.to_byte(), lo, hi])
            }
            Command::StopAll | Command::ResumeAllSync => Packet::empty(code),
            Command::MasterVolume { gain } => Packet::with_payload(code, gain.to_le_bytes()),
            Command::TrackVolume { track, gain } => {
                let [t_lo, t_hi] = track.to_le_bytes();
                let [g_lo, g_hi] = gain.to_le_bytes();
                Packet::with_payload(code, [t_lo, t_hi, g_lo, g_hi])
            }
            Command::TrackFade {
                track,
                gain,
                time_ms,
                stop_at_end,
            } => {
                let [t_lo, t_hi] = track.to_le_bytes();
                let [g_lo, g_hi] = gain.to_le_bytes();
                let [ms_lo, ms_hi] = time_ms.to_le_bytes();
                Packet::with_payload(
                    code,
                    [t_lo, t_hi, g_lo, g_hi, ms_lo, ms_hi, u8::from(stop_at_end)],
                )
            }
            Command::SampleRateOffset { offset } => {
                Packet::with_payload(code, offset.to_le_bytes())
            }
        }
    }

    /// Decode a command from a packet
    pub fn from_packet(packet: &Packet) -> Result<Self, PacketError> {
        let byte = packet.command_byte();
        let code = CommandCode::from_byte(byte).ok_or(PacketError::UnknownCommand(byte))?;
        if packet.len() != code.packet_len() {
            return Err(PacketError::PayloadMismatch);
        }

        let p = packet.payload();
        let command = match code {
            CommandCode::TrackControl => Command::TrackControl {
                track: u16::from_le_bytes([p[1], p[2]]),
                action: TrackAction::from_byte(p[0])
                    .ok_or(PacketError::UnknownTrackAction(p[0]))?,
            },
            CommandCode::StopAll => Command::StopAll,
            CommandCode::MasterVolume => Command::MasterVolume {
                gain: i16::from_le_bytes([p[0], p[1]]),
            },
            CommandCode::TrackVolume => Command::TrackVolume {
                track: u16::from_le_bytes([p[0], p[1]]),
                gain: i16::from_le_bytes([p[2], p[3]]),
            },
            CommandCode::TrackFade => Command::TrackFade {
                track: u16::from_le_bytes([p[0], p[1]]),
                gain: i16::from_le_bytes([p[2], p[3]]),
                time_ms: u16::from_le_bytes([p[4], p[5]]),
                stop_at_end: match p[6] {
                    0 => false,
                    1 => true,
                    other => return Err(PacketError::InvalidStopFlag(other)),
                },
            },
            CommandCode::ResumeAllSync => Command::ResumeAllSync,
            CommandCode::SampleRateOffset => Command::SampleRateOffset {
                offset: i16::from_le_bytes([p[0], p[1]]),
            },
        };

        Ok(command)
    }
}

/// The four commands that cross-fade from one track to another
///
/// 1. Drop `to` to [`CROSS_FADE_FLOOR_GAIN`]
/// 2. Start `to` playing polyphonically
/// 3. Fade `to` up to `gain` over `time_ms`, leaving it playing
/// 4. Fade `from` down to [`CROSS_FADE_FLOOR_GAIN`] over `time_ms`, then stop it
pub fn cross_fade_sequence(from: u16, to: u16, gain: i16, time_ms: u16) -> [Command; 4] {
    [
        Command::TrackVolume {
            track: to,
            gain: CROSS_FADE_FLOOR_GAIN,
        },
        Command::TrackControl {
            track: to,
            action: TrackAction::PlayPoly,
        },
        Command::TrackFade {
            track: to,
            gain,
            time_ms,
            stop_at_end: false,
        },
        Command::TrackFade {
            track: from,
            gain: CROSS_FADE_FLOOR_GAIN,
            time_ms,
            stop_at_end: true,
        },
    ]
}
