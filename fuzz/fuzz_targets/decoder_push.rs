//! LT decoder ingestion fuzz target.
//!
//! Feeds arbitrary packet streams into a decoder and checks its invariants
//! hold. The block-count field is clamped to keep allocations bounded while
//! still exercising session switches, duplicates, and malformed input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use qram_fountain::LtDecoder;

fuzz_target!(|data: &[u8]| {
    let mut decoder = LtDecoder::new(1, 1, 0);

    for chunk in data.chunks(48) {
        let mut packet = chunk.to_vec();
        if packet.len() >= 8 {
            // Clamp k to [1, 64] so a hostile header cannot demand gigabytes
            let k = u32::from_be_bytes([packet[4], packet[5], packet[6], packet[7]]);
            packet[4..8].copy_from_slice(&(k % 64 + 1).to_be_bytes());
        }
        let _ = decoder.push_packet(&packet);

        assert!(decoder.decoded_count() <= decoder.block_count());
        if decoder.is_done() {
            assert_eq!(decoder.decoded_count(), decoder.block_count());
        }
    }
});
