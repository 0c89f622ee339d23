//! Neighbor selection for encoded packets.

// Allow truncation casts - block indices are bounded by the u32 wire field
#![allow(clippy::cast_possible_truncation)]

use crate::prng::XorShift64;
use crate::soliton::DegreeTable;

/// Choose `degree` distinct block indices from `[0, k)` by partial
/// Fisher-Yates, consuming exactly one draw per selected index.
///
/// The order of the returned indices is irrelevant to the codec (the packet
/// payload is a commutative XOR), but the draws themselves are part of the
/// wire contract and must not be reordered.
#[must_use]
pub fn select_neighbors(rng: &mut XorShift64, k: usize, degree: usize) -> Vec<u32> {
    debug_assert!(degree <= k, "degree {degree} exceeds block count {k}");

    let mut indices: Vec<u32> = (0..k as u32).collect();
    for i in 0..degree {
        let j = i + rng.next_index(k - i);
        indices.swap(i, j);
    }
    indices.truncate(degree);
    indices
}

/// Reconstruct the neighbor set for packet `(run_id, seq_num)`.
///
/// One degree draw, then one draw per neighbor, all from the packet PRNG.
/// Encoder and decoder call this with identical inputs and must get
/// identical outputs.
#[must_use]
pub fn packet_neighbors(table: &DegreeTable, run_id: u32, seq_num: u32) -> Vec<u32> {
    let mut rng = XorShift64::for_packet(run_id, seq_num);
    let degree = table.sample(&mut rng);
    select_neighbors(&mut rng, table.block_count(), degree)
}
