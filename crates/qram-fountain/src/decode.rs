//! Belief-propagation LT decoder.
//!
//! The decoder anchors itself to the first packet it sees: every packet
//! repeats the session anchors `(run_id, k, orig_len)`, so no handshake or
//! prior configuration is needed. A packet with a different `run_id` means
//! the sender started a new session; all current state is discarded and the
//! decoder re-anchors.
//!
//! Channel anomalies (short packets, duplicates, redundant packets, packets
//! after completion) are absorbed silently. Surfacing them as errors would
//! let one mangled camera frame kill an otherwise healthy session.

// Allow truncation casts - block counts are bounded by the u32 wire field
#![allow(clippy::cast_possible_truncation)]

use std::collections::{HashSet, VecDeque};

use qram_protocol::{Packet, PacketHeader};
use tracing::{debug, trace};

use crate::sampler::packet_neighbors;
use crate::soliton::{DegreeTable, SolitonConfig};

/// A received packet whose neighbor set has not yet collapsed to one block.
///
/// Invariant: `neighbors.len() >= 2` and every listed block is undecoded.
/// Already-decoded neighbors were XORed out of `data` before storage.
struct Unresolved {
    neighbors: Vec<u32>,
    data: Vec<u8>,
}

/// LT decoder for one session at a time.
///
/// Ingestion is order-independent: the decoder behaves identically under
/// any interleaving and duplication of the emitted stream.
pub struct LtDecoder {
    config: SolitonConfig,

    // Session anchors, reset from the header on first packet or run_id change.
    run_id: u32,
    k: usize,
    block_size: usize,
    original_len: u32,
    anchored: bool,

    degrees: DegreeTable,

    /// Recovered blocks, `k * block_size` bytes. A slot is written exactly
    /// once; once `decoded[i]` is set the slot is frozen.
    blocks: Vec<u8>,
    decoded: Vec<bool>,
    decoded_count: usize,

    /// Arena of unresolved packets; slots are recycled through `free_slots`.
    unresolved: Vec<Option<Unresolved>>,
    free_slots: Vec<usize>,
    /// For each undecoded block, the arena handles of the unresolved packets
    /// listing it. Empty whenever `decoded[i]` is set.
    index: Vec<Vec<usize>>,

    /// Sequence numbers already ingested this session.
    seen: HashSet<u32>,
    packets_received: u64,
}

impl LtDecoder {
    /// Create a decoder with the default degree distribution.
    ///
    /// `(k, block_size, run_id)` are hints for pre-sizing only; the concrete
    /// session anchors are taken from the first received packet.
    #[must_use]
    pub fn new(k: u32, block_size: u32, run_id: u32) -> Self {
        Self::with_config(k, block_size, run_id, &SolitonConfig::default())
    }

    /// Create a decoder with explicit degree distribution parameters.
    #[must_use]
    pub fn with_config(k: u32, block_size: u32, run_id: u32, config: &SolitonConfig) -> Self {
        let k = (k as usize).max(1);
        let block_size = (block_size as usize).max(1);

        Self {
            config: *config,
            run_id,
            k,
            block_size,
            original_len: 0,
            anchored: false,
            degrees: DegreeTable::new(k, config),
            blocks: vec![0; k * block_size],
            decoded: vec![false; k],
            decoded_count: 0,
            unresolved: Vec::new(),
            free_slots: Vec::new(),
            index: vec![Vec::new(); k],
            seen: HashSet::new(),
            packets_received: 0,
        }
    }

    /// Total source blocks in the current session.
    #[must_use]
    pub fn block_count(&self) -> u32 {
        self.k as u32
    }

    /// Source blocks recovered so far.
    #[must_use]
    pub fn decoded_count(&self) -> u32 {
        self.decoded_count as u32
    }

    /// True once every source block has been recovered.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.anchored && self.decoded_count == self.k
    }

    /// Payload length declared by the session headers (zero until anchored).
    #[must_use]
    pub const fn original_len(&self) -> u32 {
        self.original_len
    }

    /// Session identifier the decoder is currently anchored to.
    #[must_use]
    pub const fn run_id(&self) -> u32 {
        self.run_id
    }

    /// Packets ingested for the current session, duplicates excluded.
    ///
    /// `packets_received / block_count` at completion is the stream overhead.
    #[must_use]
    pub const fn packets_received(&self) -> u64 {
        self.packets_received
    }

    /// Feed one raw packet. Returns `true` once the session is complete.
    ///
    /// Malformed packets are dropped silently. A packet with an unfamiliar
    /// `run_id` resets the decoder onto that new session.
    pub fn push_packet(&mut self, bytes: &[u8]) -> bool {
        let Ok(packet) = Packet::parse(bytes) else {
            trace!(len = bytes.len(), "dropping malformed packet");
            return self.is_done();
        };
        let header = packet.header;
        if header.block_count == 0 {
            trace!("dropping packet with zero block count");
            return self.is_done();
        }

        if !self.anchored || header.run_id != self.run_id {
            if self.anchored {
                debug!(
                    old_run_id = self.run_id,
                    new_run_id = header.run_id,
                    "session switch, discarding partial state"
                );
            }
            self.reset_session(&header, packet.block_size());
        }

        if self.decoded_count == self.k {
            // Late packets from a completed session are expected; the sender
            // keeps emitting until told to stop.
            return true;
        }

        if !self.seen.insert(header.seq_num) {
            trace!(seq_num = header.seq_num, "dropping duplicate packet");
            return false;
        }
        self.packets_received += 1;

        // Reconstruct the neighbor set, substituting blocks we already have.
        let mut data = packet.payload.to_vec();
        data.resize(self.block_size, 0);

        let mut remaining: Vec<u32> = Vec::new();
        for index in packet_neighbors(&self.degrees, self.run_id, header.seq_num) {
            if self.decoded[index as usize] {
                xor_block(&mut data, self.block(index));
            } else {
                remaining.push(index);
            }
        }

        match remaining.len() {
            0 => trace!(seq_num = header.seq_num, "dropping redundant packet"),
            1 => self.resolve(remaining[0], data),
            _ => {
                let handle = self.free_slots.pop().unwrap_or_else(|| {
                    self.unresolved.push(None);
                    self.unresolved.len() - 1
                });
                for &block in &remaining {
                    self.index[block as usize].push(handle);
                }
                self.unresolved[handle] = Some(Unresolved {
                    neighbors: remaining,
                    data,
                });
            }
        }

        self.decoded_count == self.k
    }

    /// Return the reconstructed payload trimmed to `original_len` bytes,
    /// or an empty vector while the session is incomplete.
    #[must_use]
    pub fn get_result(&self, original_len: u32) -> Vec<u8> {
        if !self.is_done() {
            return Vec::new();
        }
        let mut out = self.blocks.clone();
        out.truncate(original_len as usize);
        out
    }

    fn block(&self, index: u32) -> &[u8] {
        let start = index as usize * self.block_size;
        &self.blocks[start..start + self.block_size]
    }

    /// Write `data` into block `block` and cascade the substitution through
    /// every unresolved packet that listed it.
    ///
    /// Expressed as a work queue rather than recursion so the cascade depth
    /// is bounded for large `k`.
    fn resolve(&mut self, block: u32, data: Vec<u8>) {
        let mut queue = VecDeque::new();
        queue.push_back((block, data));

        while let Some((block, data)) = queue.pop_front() {
            let slot = block as usize;
            if self.decoded[slot] {
                continue;
            }
            let start = slot * self.block_size;
            self.blocks[start..start + self.block_size].copy_from_slice(&data);
            self.decoded[slot] = true;
            self.decoded_count += 1;

            for handle in std::mem::take(&mut self.index[slot]) {
                let Some(packet) = self.unresolved[handle].as_mut() else {
                    continue;
                };
                xor_block(&mut packet.data, &data);
                packet.neighbors.retain(|&n| n != block);

                if packet.neighbors.len() == 1 {
                    if let Some(packet) = self.unresolved[handle].take() {
                        let last = packet.neighbors[0];
                        self.index[last as usize].retain(|&h| h != handle);
                        self.free_slots.push(handle);
                        queue.push_back((last, packet.data));
                    }
                }
            }
        }
    }

    fn reset_session(&mut self, header: &PacketHeader, block_size: usize) {
        self.run_id = header.run_id;
        self.k = header.block_count as usize;
        self.block_size = block_size;
        self.original_len = header.original_len;
        self.anchored = true;
        self.degrees = DegreeTable::new(self.k, &self.config);
        self.blocks = vec![0; self.k * self.block_size];
        self.decoded = vec![false; self.k];
        self.decoded_count = 0;
        self.unresolved.clear();
        self.free_slots.clear();
        self.index = vec![Vec::new(); self.k];
        self.seen.clear();
        self.packets_received = 0;
    }
}

fn xor_block(target: &mut [u8], source: &[u8]) {
    for (out, &byte) in target.iter_mut().zip(source) {
        *out ^= byte;
    }
}
