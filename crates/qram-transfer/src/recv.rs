//! Receive-side pipeline: fountain decoder plus envelope unwrapping.

use qram_envelope::{maybe_decompress, unwrap_file};
use qram_fountain::LtDecoder;

use crate::error::TransferError;

/// Fully reconstructed transfer payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Filename, when the sender wrapped one.
    pub filename: Option<String>,
    /// The original payload bytes.
    pub data: Vec<u8>,
}

/// One inbound transfer session.
///
/// Anchors itself to the first frame it sees and follows session switches
/// automatically: when the sender restarts with a new payload, the receiver
/// abandons the stale partial state and starts collecting the new session.
pub struct Receiver {
    decoder: LtDecoder,
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Receiver {
    /// Create a receiver; session parameters come from the first frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            decoder: LtDecoder::new(1, 1, 0),
        }
    }

    /// Feed one scanned frame. Returns `true` once the session is complete.
    ///
    /// Unreadable frames are dropped silently; feeding garbage can only
    /// slow a transfer down, never corrupt it.
    pub fn push_frame(&mut self, frame: &[u8]) -> bool {
        self.decoder.push_packet(frame)
    }

    /// `(decoded, total)` block counts for progress display.
    #[must_use]
    pub fn progress(&self) -> (u32, u32) {
        (self.decoder.decoded_count(), self.decoder.block_count())
    }

    /// True once every source block is recovered.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.decoder.is_done()
    }

    /// Frames ingested for the current session, duplicates excluded.
    #[must_use]
    pub fn frames_received(&self) -> u64 {
        self.decoder.packets_received()
    }

    /// Unwrap the reconstructed payload.
    ///
    /// Trims the padding, removes the compression envelope if one was kept,
    /// and extracts the filename record if present.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Incomplete`] before completion and envelope
    /// errors for an unknown compression algorithm or a corrupt stream.
    pub fn payload(&self) -> Result<Delivery, TransferError> {
        if !self.decoder.is_done() {
            return Err(TransferError::Incomplete {
                decoded: self.decoder.decoded_count(),
                total: self.decoder.block_count(),
            });
        }

        let trimmed = self.decoder.get_result(self.decoder.original_len());
        let (bytes, _) = maybe_decompress(&trimmed)?;

        match unwrap_file(&bytes) {
            Some((name, body)) => Ok(Delivery {
                filename: Some(name),
                data: body.to_vec(),
            }),
            None => Ok(Delivery {
                filename: None,
                data: bytes,
            }),
        }
    }
}
