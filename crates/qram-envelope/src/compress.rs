//! Gzip compression envelope with a skip-if-no-benefit policy.
//!
//! Every byte of envelope overhead becomes extra barcode frames, so the
//! envelope is kept only when compression clearly wins:
//!
//! - payloads under [`COMPRESS_MIN_LEN`] bytes are never compressed;
//! - the envelope must be at most [`COMPRESS_MAX_RATIO`] of the payload;
//! - the absolute saving must reach [`COMPRESS_MIN_SAVING`] bytes.
//!
//! # Wire Format
//!
//! ```text
//! QRAMC ENVELOPE FORMAT
//!
//!   Bytes 0-4:  Magic (ASCII "QRAMC")
//!   Byte  5:    Algorithm (1 = gzip)
//!   Bytes 6-9:  Original length (u32 BE)
//!   Bytes 10+:  Compressed payload
//! ```

// Allow lossy usize -> f64 conversion - the ratio gate needs no exactness
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::warn;

use crate::error::EnvelopeError;

/// Envelope magic: ASCII "QRAMC".
pub const COMPRESS_MAGIC: [u8; 5] = *b"QRAMC";

/// Algorithm byte for gzip, the only algorithm currently defined.
pub const ALGO_GZIP: u8 = 1;

/// Envelope header length: magic + algorithm + original length.
pub const COMPRESS_HEADER_LEN: usize = 10;

/// Payloads below this size are never compressed.
pub const COMPRESS_MIN_LEN: usize = 50;

/// Keep the envelope only if it is at most this fraction of the payload.
pub const COMPRESS_MAX_RATIO: f64 = 0.95;

/// Keep the envelope only if it saves at least this many bytes.
pub const COMPRESS_MIN_SAVING: usize = 50;

/// Wrap `payload` in a gzip envelope when compression pays for itself.
///
/// Returns `(envelope, true)` when the policy keeps the envelope, or
/// `(payload, false)` when the payload is small, incompressible, or the
/// saving is marginal.
#[must_use]
pub fn maybe_compress(payload: &[u8]) -> (Vec<u8>, bool) {
    if payload.len() < COMPRESS_MIN_LEN || payload.len() > u32::MAX as usize {
        return (payload.to_vec(), false);
    }

    let mut encoder = GzEncoder::new(
        Vec::with_capacity(payload.len() / 2),
        Compression::default(),
    );
    let compressed = match encoder.write_all(payload).and_then(|()| encoder.finish()) {
        Ok(bytes) => bytes,
        Err(_) => return (payload.to_vec(), false),
    };

    let envelope_len = COMPRESS_HEADER_LEN + compressed.len();
    let ratio = envelope_len as f64 / payload.len() as f64;
    if ratio > COMPRESS_MAX_RATIO || payload.len() - envelope_len < COMPRESS_MIN_SAVING {
        return (payload.to_vec(), false);
    }

    let mut out = Vec::with_capacity(envelope_len);
    out.extend_from_slice(&COMPRESS_MAGIC);
    out.push(ALGO_GZIP);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(&compressed);
    (out, true)
}

/// Unwrap a compression envelope.
///
/// Bytes without the envelope magic pass through unchanged. A declared
/// length that disagrees with the decompressed size is tolerated (padding
/// from the fountain layer can trail into the envelope) and logged.
///
/// # Errors
///
/// Returns [`EnvelopeError::UnknownAlgorithm`] for an unrecognized
/// algorithm byte and [`EnvelopeError::Corrupt`] when the compressed
/// stream cannot be decoded.
pub fn maybe_decompress(bytes: &[u8]) -> Result<(Vec<u8>, bool), EnvelopeError> {
    if bytes.len() < COMPRESS_HEADER_LEN || bytes[..5] != COMPRESS_MAGIC {
        return Ok((bytes.to_vec(), false));
    }

    let algo = bytes[5];
    if algo != ALGO_GZIP {
        return Err(EnvelopeError::UnknownAlgorithm { algo });
    }

    let declared_len = u32::from_be_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;

    let mut payload = Vec::new();
    GzDecoder::new(&bytes[COMPRESS_HEADER_LEN..])
        .read_to_end(&mut payload)
        .map_err(|_| EnvelopeError::Corrupt)?;

    if payload.len() != declared_len {
        warn!(
            declared = declared_len,
            actual = payload.len(),
            "compression envelope length mismatch"
        );
    }

    Ok((payload, true))
}
