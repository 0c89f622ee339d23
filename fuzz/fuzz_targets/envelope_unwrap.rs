//! Envelope unwrapping fuzz target.
//!
//! Fuzzes the compression and filename envelope parsers.
//! Goal: no panics on arbitrary input; errors only where documented.

#![no_main]

use libfuzzer_sys::fuzz_target;
use qram_envelope::{maybe_decompress, unwrap_file};

fuzz_target!(|data: &[u8]| {
    // Compression envelope: passthrough, unknown-algo error, or decode
    let _ = maybe_decompress(data);

    // Filename envelope: typed None on anything malformed
    if let Some((name, body)) = unwrap_file(data) {
        assert!(name.len() + body.len() + 7 == data.len());
    }
});
