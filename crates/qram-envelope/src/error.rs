//! Envelope error types.

use thiserror::Error;

/// Envelope wrap/unwrap errors.
///
/// A missing envelope is never an error: bytes without the magic pass
/// through unchanged (compression) or come back as `None` (file).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Compression envelope names an algorithm this build does not know.
    #[error("unknown compression algorithm {algo}")]
    UnknownAlgorithm {
        /// The unrecognized algorithm byte.
        algo: u8,
    },

    /// Compressed stream could not be decoded.
    #[error("corrupt compressed payload")]
    Corrupt,

    /// Filename does not fit the u16 length prefix.
    #[error("filename too long ({len} bytes, max 65535)")]
    NameTooLong {
        /// UTF-8 length of the rejected name.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EnvelopeError::UnknownAlgorithm { algo: 9 };
        assert_eq!(err.to_string(), "unknown compression algorithm 9");

        assert_eq!(
            EnvelopeError::Corrupt.to_string(),
            "corrupt compressed payload"
        );

        let err = EnvelopeError::NameTooLong { len: 70_000 };
        assert!(err.to_string().contains("70000"));
    }
}
