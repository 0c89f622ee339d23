//! Send-side pipeline: envelopes plus fountain encoder.

use qram_envelope::{maybe_compress, wrap_file};
use qram_fountain::LtEncoder;

use crate::config::TransferConfig;
use crate::error::TransferError;

/// One outbound transfer session.
///
/// Applies the optional filename and compression envelopes, then streams
/// frames from the fountain encoder for as long as the host keeps asking;
/// the receiving side completes from any sufficient subset.
pub struct Sender {
    encoder: LtEncoder,
    compressed: bool,
}

impl Sender {
    /// Start a session over raw bytes with a random session id.
    ///
    /// # Errors
    ///
    /// Propagates encoder construction failures (empty payload, zero block
    /// size, oversized payload).
    pub fn new(data: &[u8], config: &TransferConfig) -> Result<Self, TransferError> {
        Self::with_run_id(data, None, config, rand::random())
    }

    /// Start a session carrying a filename.
    ///
    /// # Errors
    ///
    /// As [`Sender::new`], plus [`qram_envelope::EnvelopeError::NameTooLong`]
    /// for names over 65 535 UTF-8 bytes.
    pub fn with_file(
        name: &str,
        data: &[u8],
        config: &TransferConfig,
    ) -> Result<Self, TransferError> {
        Self::with_run_id(data, Some(name), config, rand::random())
    }

    /// Start a session with an explicit session id.
    ///
    /// Hosts resuming a display loop, and tests, want the packet stream to
    /// be reproducible; everyone else should let [`Sender::new`] roll the id.
    ///
    /// # Errors
    ///
    /// As [`Sender::with_file`].
    pub fn with_run_id(
        data: &[u8],
        name: Option<&str>,
        config: &TransferConfig,
        run_id: u32,
    ) -> Result<Self, TransferError> {
        let wrapped = match name {
            Some(name) => wrap_file(name, data)?,
            None => data.to_vec(),
        };

        let (payload, compressed) = if config.compress {
            maybe_compress(&wrapped)
        } else {
            (wrapped, false)
        };

        let encoder = LtEncoder::new(&payload, config.block_size, run_id)?;
        Ok(Self {
            encoder,
            compressed,
        })
    }

    /// Produce the next wire frame for the barcode renderer.
    pub fn next_frame(&mut self) -> Vec<u8> {
        self.encoder.next_packet()
    }

    /// Session identifier carried in every frame.
    #[must_use]
    pub fn run_id(&self) -> u32 {
        self.encoder.run_id()
    }

    /// Number of source blocks the receiver must recover.
    #[must_use]
    pub fn block_count(&self) -> u32 {
        self.encoder.block_count()
    }

    /// Encoded payload length after envelopes, before padding.
    #[must_use]
    pub fn payload_len(&self) -> u32 {
        self.encoder.original_len()
    }

    /// Whether the compression envelope was kept for this session.
    #[must_use]
    pub const fn is_compressed(&self) -> bool {
        self.compressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_compress() -> TransferConfig {
        TransferConfig {
            block_size: 100,
            compress: false,
        }
    }

    #[test]
    fn sender_reflects_session_shape() {
        let data = vec![0xA5; 450];
        let sender = Sender::with_run_id(&data, None, &no_compress(), 77).unwrap();

        assert_eq!(sender.run_id(), 77);
        assert_eq!(sender.block_count(), 5);
        assert_eq!(sender.payload_len(), 450);
        assert!(!sender.is_compressed());
    }

    #[test]
    fn frames_have_fixed_length() {
        let mut sender = Sender::with_run_id(&[1, 2, 3], None, &no_compress(), 1).unwrap();
        for _ in 0..10 {
            assert_eq!(sender.next_frame().len(), 116);
        }
    }

    #[test]
    fn file_envelope_grows_payload() {
        let data = vec![9u8; 100];
        let plain = Sender::with_run_id(&data, None, &no_compress(), 1).unwrap();
        let named = Sender::with_run_id(&data, Some("a.txt"), &no_compress(), 1).unwrap();

        // QRAMF header (7) plus the name (5)
        assert_eq!(named.payload_len(), plain.payload_len() + 12);
    }

    #[test]
    fn compression_shrinks_repetitive_payload() {
        let data = b"ab".repeat(500);
        let config = TransferConfig {
            block_size: 100,
            compress: true,
        };
        let sender = Sender::with_run_id(&data, None, &config, 1).unwrap();

        assert!(sender.is_compressed());
        assert!((sender.payload_len() as usize) < data.len());
    }

    #[test]
    fn empty_payload_is_rejected() {
        let result = Sender::with_run_id(&[], None, &no_compress(), 1);
        assert!(result.is_err());
    }

    #[test]
    fn random_run_ids_differ_between_sessions() {
        // Not a strict guarantee, but 32 bits colliding across a handful of
        // constructions would point at a broken generator.
        let data = [1u8; 10];
        let ids: Vec<u32> = (0..8)
            .map(|_| Sender::new(&data, &no_compress()).unwrap().run_id())
            .collect();
        let distinct: std::collections::HashSet<u32> = ids.iter().copied().collect();
        assert!(distinct.len() > 1);
    }
}
