//! LT encoder: produces the self-describing packet stream.

// Allow truncation casts - block counts and lengths are bounded by u32 wire fields
#![allow(clippy::cast_possible_truncation)]

use qram_protocol::{encode_packet, PacketHeader};

use crate::error::EncodeError;
use crate::sampler::packet_neighbors;
use crate::soliton::{DegreeTable, SolitonConfig};

/// Rateless packet source for one transfer session.
///
/// The encoder owns the padded source blocks for the session's lifetime and
/// emits packets indefinitely; the stream never ends on its own, the host
/// simply stops asking once the far side reports completion (or forever, for
/// a looping display).
pub struct LtEncoder {
    /// Payload padded with zeros to `k * block_size` bytes.
    blocks: Vec<u8>,
    block_size: usize,
    original_len: u32,
    run_id: u32,
    seq_num: u32,
    degrees: DegreeTable,
}

impl LtEncoder {
    /// Create an encoder over `data` with the default degree distribution.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::EmptyPayload`] for empty data,
    /// [`EncodeError::InvalidBlockSize`] for a zero block size, and
    /// [`EncodeError::PayloadTooLarge`] when the length does not fit the
    /// u32 header field.
    pub fn new(data: &[u8], block_size: u32, run_id: u32) -> Result<Self, EncodeError> {
        Self::with_config(data, block_size, run_id, &SolitonConfig::default())
    }

    /// Create an encoder with explicit degree distribution parameters.
    ///
    /// Non-default parameters break wire compatibility with default-parameter
    /// decoders; both sides must agree.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LtEncoder::new`].
    pub fn with_config(
        data: &[u8],
        block_size: u32,
        run_id: u32,
        config: &SolitonConfig,
    ) -> Result<Self, EncodeError> {
        if data.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }
        if block_size == 0 {
            return Err(EncodeError::InvalidBlockSize);
        }
        if data.len() > u32::MAX as usize {
            return Err(EncodeError::PayloadTooLarge {
                size: data.len(),
                max: u32::MAX as usize,
            });
        }

        let block_size = block_size as usize;
        let k = data.len().div_ceil(block_size);
        let mut blocks = data.to_vec();
        blocks.resize(k * block_size, 0);

        Ok(Self {
            blocks,
            block_size,
            original_len: data.len() as u32,
            run_id,
            seq_num: 0,
            degrees: DegreeTable::new(k, config),
        })
    }

    /// Number of source blocks.
    #[must_use]
    pub fn block_count(&self) -> u32 {
        (self.blocks.len() / self.block_size) as u32
    }

    /// Source block size in bytes.
    #[must_use]
    pub fn block_size(&self) -> u32 {
        self.block_size as u32
    }

    /// Payload length before padding to a block multiple.
    #[must_use]
    pub const fn original_len(&self) -> u32 {
        self.original_len
    }

    /// Session identifier carried in every packet.
    #[must_use]
    pub const fn run_id(&self) -> u32 {
        self.run_id
    }

    /// Produce the next encoded packet: 16-byte header plus `block_size`
    /// bytes of XOR payload.
    ///
    /// Reads the current sequence number, seeds the packet PRNG from
    /// `(run_id, seq_num)`, samples a degree and neighbor set, and XORs the
    /// selected source blocks together. Pure given the constructor inputs
    /// and the sequence number.
    pub fn next_packet(&mut self) -> Vec<u8> {
        let seq_num = self.seq_num;
        self.seq_num = self.seq_num.wrapping_add(1);

        let mut payload = vec![0u8; self.block_size];
        for &index in &packet_neighbors(&self.degrees, self.run_id, seq_num) {
            let start = index as usize * self.block_size;
            let block = &self.blocks[start..start + self.block_size];
            for (out, &byte) in payload.iter_mut().zip(block) {
                *out ^= byte;
            }
        }

        let header = PacketHeader {
            run_id: self.run_id,
            block_count: self.block_count(),
            original_len: self.original_len,
            seq_num,
        };
        encode_packet(&header, &payload)
    }
}
