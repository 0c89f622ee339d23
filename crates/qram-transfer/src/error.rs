//! Transfer pipeline error types.

use qram_envelope::EnvelopeError;
use qram_fountain::EncodeError;
use thiserror::Error;

/// Pipeline errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Payload requested before every block was recovered.
    #[error("transfer incomplete ({decoded}/{total} blocks)")]
    Incomplete {
        /// Blocks recovered so far.
        decoded: u32,
        /// Blocks the session needs.
        total: u32,
    },

    /// Encoder rejected the session parameters.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Envelope wrap or unwrap failed.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}
