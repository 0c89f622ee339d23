//! Fountain codec error types.
//!
//! Only encoder construction can fail. The decoder absorbs channel
//! anomalies silently to preserve the rateless property: one weird packet
//! must never kill a session.

use thiserror::Error;

/// LT encoder construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Empty payload cannot be block-encoded.
    #[error("cannot encode empty payload")]
    EmptyPayload,

    /// Block size must be at least one byte.
    #[error("invalid block size 0: must be at least 1")]
    InvalidBlockSize,

    /// Payload length must fit the u32 header field.
    #[error("payload too large: {size} bytes exceeds maximum {max} bytes")]
    PayloadTooLarge {
        /// Actual payload size.
        size: usize,
        /// Maximum encodable size.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            EncodeError::EmptyPayload.to_string(),
            "cannot encode empty payload"
        );
        assert_eq!(
            EncodeError::InvalidBlockSize.to_string(),
            "invalid block size 0: must be at least 1"
        );

        let err = EncodeError::PayloadTooLarge {
            size: 5_000_000_000,
            max: u32::MAX as usize,
        };
        assert!(err.to_string().contains("payload too large"));
    }

    #[test]
    fn errors_are_clone_and_eq() {
        let err = EncodeError::EmptyPayload;
        assert_eq!(err.clone(), err);
    }
}
