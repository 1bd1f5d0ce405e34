//! Packet framing for the WAV Trigger serial protocol.
//!
//! Packet format:
//! - SYNC (2 bytes): 0xF0 0xAA
//! - LENGTH (1 byte): total packet size, LENGTH itself included (5-12)
//! - COMMAND (1 byte): command code
//! - PAYLOAD (0-7 bytes): command-specific data, little-endian fields
//! - TERMINATOR (1 byte): 0x55
//!
//! There is no checksum; the length byte and terminator are the only
//! integrity checks the device performs.

use core::fmt;

use heapless::Vec;

/// First synchronization byte
pub const SYNC_1: u8 = 0xF0;

/// Second synchronization byte
pub const SYNC_2: u8 = 0xAA;

/// Packet terminator
pub const TERMINATOR: u8 = 0x55;

/// SYNC + SYNC + LENGTH + COMMAND + TERMINATOR
const OVERHEAD: usize = 5;

/// Offset of the first payload byte
const PAYLOAD_OFFSET: usize = 4;

/// Smallest packet (no payload)
pub const MIN_PACKET_LEN: usize = OVERHEAD;

/// Largest packet the encoder produces (track fade)
pub const MAX_PACKET_LEN: usize = 12;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_LEN: usize = MAX_PACKET_LEN - OVERHEAD;

/// Errors that can occur while building or decoding packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Length byte outside 5..=12
    InvalidLength,
    /// Byte where the terminator should be was not 0x55
    InvalidTerminator,
    /// Command code the encoder does not produce
    UnknownCommand(u8),
    /// Track control sub-action outside 0..=7
    UnknownTrackAction(u8),
    /// Payload size does not match the command's packet shape
    PayloadMismatch,
    /// Fade stop flag other than 0x00 or 0x01
    InvalidStopFlag(u8),
}

/// A complete framed command
///
/// Packets are immutable: once built, the bytes can only be read.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    bytes: [u8; MAX_PACKET_LEN],
    len: u8,
}

impl Packet {
    /// Create a packet with the given command byte and payload
    pub fn new(command: u8, payload: &[u8]) -> Result<Self, PacketError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(PacketError::PayloadTooLarge);
        }
        Ok(Self::frame(command, payload))
    }

    /// Create a packet with no payload
    pub fn empty(command: u8) -> Self {
        Self::frame(command, &[])
    }

    /// Create a packet from a fixed-size payload
    ///
    /// Only used with the payload sizes of known commands, all of which fit.
    pub(crate) fn with_payload<const N: usize>(command: u8, payload: [u8; N]) -> Self {
        debug_assert!(N <= MAX_PAYLOAD_LEN);
        Self::frame(command, &payload)
    }

    fn frame(command: u8, payload: &[u8]) -> Self {
        let len = OVERHEAD + payload.len();
        let mut bytes = [0u8; MAX_PACKET_LEN];

        bytes[0] = SYNC_1;
        bytes[1] = SYNC_2;
        bytes[2] = len as u8;
        bytes[3] = command;
        bytes[PAYLOAD_OFFSET..PAYLOAD_OFFSET + payload.len()].copy_from_slice(payload);
        bytes[len - 1] = TERMINATOR;

        Self {
            bytes,
            len: len as u8,
        }
    }

    /// The bytes to put on the wire
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Total packet size; always equal to the length byte
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Packets always hold at least the framing bytes
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Command code byte
    pub fn command_byte(&self) -> u8 {
        self.bytes[3]
    }

    /// Command-specific payload
    pub fn payload(&self) -> &[u8] {
        &self.bytes[PAYLOAD_OFFSET..self.len as usize - 1]
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Packet(")?;
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        write!(f, ")")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Packet {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Packet({=[u8]:x})", self.as_bytes())
    }
}

/// State machine for decoding a byte stream of packets
#[derive(Debug, Clone)]
pub struct PacketParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_LEN>,
    expected_payload: usize,
    command: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for 0xF0
    WaitingForSync1,
    /// Got 0xF0, waiting for 0xAA
    WaitingForSync2,
    /// Got both sync bytes, waiting for LENGTH
    WaitingForLength,
    /// Got LENGTH, waiting for COMMAND
    WaitingForCommand,
    /// Reading payload bytes
    ReadingPayload,
    /// Waiting for 0x55
    WaitingForTerminator,
}

impl Default for PacketParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketParser {
    /// Create a new packet parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForSync1,
            buffer: Vec::new(),
            expected_payload: 0,
            command: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForSync1;
        self.buffer.clear();
        self.expected_payload = 0;
        self.command = 0;
    }

    /// Drop the current packet after a framing error
    ///
    /// The offending byte may be the first sync byte of the next packet.
    fn resync(&mut self, byte: u8) {
        self.reset();
        if byte == SYNC_1 {
            self.state = ParseState::WaitingForSync2;
        }
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(packet))` when a complete packet is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on a framing error.
    /// After an error the parser is back to hunting for the sync prefix,
    /// with the failing byte counted as `SYNC_1` if it was one.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Packet>, PacketError> {
        match self.state {
            ParseState::WaitingForSync1 => {
                if byte == SYNC_1 {
                    self.state = ParseState::WaitingForSync2;
                }
                Ok(None)
            }
            ParseState::WaitingForSync2 => {
                self.state = match byte {
                    SYNC_2 => ParseState::WaitingForLength,
                    SYNC_1 => ParseState::WaitingForSync2,
                    _ => ParseState::WaitingForSync1,
                };
                Ok(None)
            }
            ParseState::WaitingForLength => {
                let len = byte as usize;
                if !(MIN_PACKET_LEN..=MAX_PACKET_LEN).contains(&len) {
                    self.resync(byte);
                    return Err(PacketError::InvalidLength);
                }
                self.expected_payload = len - OVERHEAD;
                self.state = ParseState::WaitingForCommand;
                Ok(None)
            }
            ParseState::WaitingForCommand => {
                self.command = byte;
                self.buffer.clear();
                self.state = if self.expected_payload == 0 {
                    ParseState::WaitingForTerminator
                } else {
                    ParseState::ReadingPayload
                };
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // Cannot overflow: expected_payload <= MAX_PAYLOAD_LEN
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_payload {
                    self.state = ParseState::WaitingForTerminator;
                }
                Ok(None)
            }
            ParseState::WaitingForTerminator => {
                if byte != TERMINATOR {
                    self.resync(byte);
                    return Err(PacketError::InvalidTerminator);
                }

                let packet = Packet::new(self.command, &self.buffer);
                self.reset();
                packet.map(Some)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete packet found, if any, and the number of
    /// bytes consumed. Bytes after a complete packet are not consumed.
    ///
    /// On a framing error the count of bytes consumed up to and including
    /// the failing byte comes back with the error, so the caller can carry
    /// on from `&bytes[consumed..]`.
    pub fn feed_bytes(
        &mut self,
        bytes: &[u8],
    ) -> Result<(Option<Packet>, usize), (PacketError, usize)> {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(Some(packet)) => return Ok((Some(packet), i + 1)),
                Ok(None) => {}
                Err(e) => return Err((e, i + 1)),
            }
        }
        Ok((None, bytes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_packet_empty_payload() {
        let packet = Packet::empty(0x04);

        assert_eq!(packet.as_bytes(), &[0xF0, 0xAA, 0x05, 0x04, 0x55]);
        assert_eq!(packet.len(), 5);
        assert_eq!(packet.command_byte(), 0x04);
        assert!(packet.payload().is_empty());
    }

    #[test]
    fn test_packet_with_payload() {
        let packet = Packet::new(0x05, &[0xF6, 0xFF]).unwrap();

        assert_eq!(packet.len(), 7);
        assert_eq!(packet.as_bytes()[0], SYNC_1);
        assert_eq!(packet.as_bytes()[1], SYNC_2);
        assert_eq!(packet.as_bytes()[2], 7); // length
        assert_eq!(packet.as_bytes()[3], 0x05); // command
        assert_eq!(packet.payload(), &[0xF6, 0xFF]);
        assert_eq!(packet.as_bytes()[6], TERMINATOR);
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_LEN + 1];
        let result = Packet::new(0x0A, &large_payload);
        assert_eq!(result, Err(PacketError::PayloadTooLarge));
    }

    #[test]
    fn test_max_payload_fits() {
        let packet = Packet::new(0x0A, &[1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(packet.len(), MAX_PACKET_LEN);
        assert_eq!(packet.as_bytes()[2] as usize, MAX_PACKET_LEN);
    }

    #[test]
    fn test_debug_format() {
        let packet = Packet::empty(0x0B);
        let text = format!("{:?}", packet);
        assert_eq!(text, "Packet(F0 AA 05 0B 55)");
    }

    #[test]
    fn test_parser_decodes_packet() {
        let original = Packet::new(0x08, &[0x03, 0x00, 0xD8, 0xFF]).unwrap();

        let mut parser = PacketParser::new();
        let (parsed, consumed) = parser.feed_bytes(original.as_bytes()).unwrap();

        assert_eq!(parsed, Some(original));
        assert_eq!(consumed, 9);
    }

    #[test]
    fn test_parser_stops_after_first_packet() {
        let mut stream = [0u8; 10];
        stream[..5].copy_from_slice(Packet::empty(0x04).as_bytes());
        stream[5..].copy_from_slice(Packet::empty(0x0B).as_bytes());

        let mut parser = PacketParser::new();
        let (first, consumed) = parser.feed_bytes(&stream).unwrap();
        assert_eq!(first.map(|p| p.command_byte()), Some(0x04));
        assert_eq!(consumed, 5);

        let (second, _) = parser.feed_bytes(&stream[consumed..]).unwrap();
        assert_eq!(second.map(|p| p.command_byte()), Some(0x0B));
    }

    #[test]
    fn test_parser_resync_after_garbage() {
        let data = [0x00, 0xAA, 0xF0, 0x12, 0xF0, 0xF0, 0xAA, 0x05, 0x0B, 0x55];

        let mut parser = PacketParser::new();
        let (parsed, _) = parser.feed_bytes(&data).unwrap();

        assert_eq!(parsed.map(|p| p.command_byte()), Some(0x0B));
    }

    #[test]
    fn test_parser_invalid_terminator() {
        let mut encoded = [0u8; 5];
        encoded.copy_from_slice(Packet::empty(0x04).as_bytes());
        encoded[4] = 0x56;

        let mut parser = PacketParser::new();
        assert_eq!(
            parser.feed_bytes(&encoded),
            Err((PacketError::InvalidTerminator, 5))
        );

        // Parser recovers for the next packet
        let (parsed, _) = parser.feed_bytes(Packet::empty(0x04).as_bytes()).unwrap();
        assert!(parsed.is_some());
    }

    #[test]
    fn test_parser_invalid_length() {
        let mut parser = PacketParser::new();
        assert_eq!(
            parser.feed_bytes(&[0xF0, 0xAA, 0x04]),
            Err((PacketError::InvalidLength, 3))
        );
        assert_eq!(
            parser.feed_bytes(&[0xF0, 0xAA, 0x0D]),
            Err((PacketError::InvalidLength, 3))
        );
    }

    #[test]
    fn test_parser_sync_byte_as_bad_length_starts_next_packet() {
        // Cut-off packet whose length slot holds the next packet's sync byte
        let data = [0xF0, 0xAA, 0xF0, 0xAA, 0x05, 0x04, 0x55];

        let mut parser = PacketParser::new();
        let mut errors = 0;
        let mut found = None;
        for &byte in &data {
            match parser.feed(byte) {
                Ok(Some(packet)) => found = Some(packet),
                Ok(None) => {}
                Err(e) => {
                    assert_eq!(e, PacketError::InvalidLength);
                    errors += 1;
                }
            }
        }

        assert_eq!(errors, 1);
        assert_eq!(found, Some(Packet::empty(0x04)));
    }

    #[test]
    fn test_parser_sync_byte_as_bad_terminator_starts_next_packet() {
        // STOP_ALL missing its terminator, then RESUME_ALL_SYNC
        let data = [0xF0, 0xAA, 0x05, 0x04, 0xF0, 0xAA, 0x05, 0x0B, 0x55];

        let mut parser = PacketParser::new();
        assert_eq!(
            parser.feed_bytes(&data),
            Err((PacketError::InvalidTerminator, 5))
        );

        let (parsed, consumed) = parser.feed_bytes(&data[5..]).unwrap();
        assert_eq!(parsed, Some(Packet::empty(0x0B)));
        assert_eq!(consumed, 4);
    }

    #[test]
    fn test_feed_bytes_resumes_after_error() {
        let data = [0xF0, 0xAA, 0x04, 0xF0, 0xAA, 0x05, 0x04, 0x55];

        let mut parser = PacketParser::new();
        let (error, consumed) = parser.feed_bytes(&data).unwrap_err();
        assert_eq!(error, PacketError::InvalidLength);
        assert_eq!(consumed, 3);

        let (parsed, rest) = parser.feed_bytes(&data[consumed..]).unwrap();
        assert_eq!(parsed, Some(Packet::empty(0x04)));
        assert_eq!(consumed + rest, data.len());
    }

    #[test]
    fn test_parser_needs_more_bytes() {
        let mut parser = PacketParser::new();
        let (parsed, consumed) = parser.feed_bytes(&[0xF0, 0xAA, 0x07, 0x05, 0x00]).unwrap();
        assert!(parsed.is_none());
        assert_eq!(consumed, 5);

        let (parsed, _) = parser.feed_bytes(&[0x00, 0x55]).unwrap();
        assert_eq!(parsed.map(|p| p.len()), Some(7));
    }

    proptest! {
        #[test]
        fn packet_framing_invariants(
            command in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_LEN),
        ) {
            let packet = Packet::new(command, &payload).unwrap();
            let bytes = packet.as_bytes();

            prop_assert_eq!(bytes.len(), payload.len() + 5);
            prop_assert_eq!(bytes[2] as usize, bytes.len());
            prop_assert_eq!(&bytes[..2], &[SYNC_1, SYNC_2]);
            prop_assert_eq!(bytes[bytes.len() - 1], TERMINATOR);
            prop_assert_eq!(packet.payload(), &payload[..]);
        }

        #[test]
        fn parser_accepts_every_framed_packet(
            command in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_LEN),
        ) {
            let packet = Packet::new(command, &payload).unwrap();
            let mut parser = PacketParser::new();
            let (parsed, consumed) = parser.feed_bytes(packet.as_bytes()).unwrap();

            prop_assert_eq!(parsed, Some(packet));
            prop_assert_eq!(consumed, packet.len());
        }
    }
}
