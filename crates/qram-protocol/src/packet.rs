//! QRAM packet parsing and serialization.
//!
//! Every packet is self-describing: the header repeats the session anchors
//! so a receiver can bootstrap from any single packet, with no handshake.
//!
//! # Wire Format
//!
//! ```text
//! QRAM PACKET FORMAT
//!
//!   Bytes 0-3:   run_id   (u32 BE) - session identifier
//!   Bytes 4-7:   k        (u32 BE) - source block count
//!   Bytes 8-11:  orig_len (u32 BE) - payload length before padding
//!   Bytes 12-15: seq_num  (u32 BE) - packet index, monotonic per session
//!   Bytes 16+:   payload  (block_size bytes, XOR of selected source blocks)
//!
//!   Fixed header: 16 bytes
//!   block_size = packet length - 16, and must be at least 1
//! ```

use thiserror::Error;

/// Fixed header length in bytes.
pub const PACKET_HEADER_LEN: usize = 16;

/// Minimum valid packet length: header plus at least one payload byte.
pub const MIN_PACKET_LEN: usize = PACKET_HEADER_LEN + 1;

/// Packet parsing and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    /// Fewer bytes than the minimum the operation needs.
    #[error("packet too short (len {len}, min {min})")]
    TooShort {
        /// Actual byte count.
        len: usize,
        /// Minimum required.
        min: usize,
    },
}

/// Parsed packet header (16 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Session identifier, chosen at random by the encoder per session.
    pub run_id: u32,
    /// Number of source blocks in the session.
    pub block_count: u32,
    /// Payload length in bytes before padding to a block multiple.
    pub original_len: u32,
    /// Packet index, monotonic per session.
    pub seq_num: u32,
}

impl PacketHeader {
    /// Encode the header to bytes (16 bytes, big-endian fields).
    #[must_use]
    pub fn encode(&self) -> [u8; PACKET_HEADER_LEN] {
        let mut buf = [0u8; PACKET_HEADER_LEN];
        buf[0..4].copy_from_slice(&self.run_id.to_be_bytes());
        buf[4..8].copy_from_slice(&self.block_count.to_be_bytes());
        buf[8..12].copy_from_slice(&self.original_len.to_be_bytes());
        buf[12..16].copy_from_slice(&self.seq_num.to_be_bytes());
        buf
    }

    /// Decode a header from the first 16 bytes of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::TooShort`] if fewer than 16 bytes are given.
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() < PACKET_HEADER_LEN {
            return Err(PacketError::TooShort {
                len: bytes.len(),
                min: PACKET_HEADER_LEN,
            });
        }

        Ok(Self {
            run_id: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            block_count: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            original_len: u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            seq_num: u32::from_be_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        })
    }
}

/// Borrowed view of a full packet: header plus XOR payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<'a> {
    /// The 16-byte header.
    pub header: PacketHeader,
    /// XOR of the selected source blocks; its length is the session block size.
    pub payload: &'a [u8],
}

impl<'a> Packet<'a> {
    /// Parse a full packet, requiring at least one payload byte.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::TooShort`] if `bytes` holds less than a header
    /// plus one payload byte.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, PacketError> {
        if bytes.len() < MIN_PACKET_LEN {
            return Err(PacketError::TooShort {
                len: bytes.len(),
                min: MIN_PACKET_LEN,
            });
        }

        Ok(Self {
            header: PacketHeader::decode(bytes)?,
            payload: &bytes[PACKET_HEADER_LEN..],
        })
    }

    /// Block size implied by the packet length.
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.payload.len()
    }
}

/// Assemble wire bytes from a header and payload.
#[must_use]
pub fn encode_packet(header: &PacketHeader, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(PACKET_HEADER_LEN + payload.len());
    bytes.extend_from_slice(&header.encode());
    bytes.extend_from_slice(payload);
    bytes
}
