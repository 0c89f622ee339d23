//! Transfer pipeline configuration.

use serde::{Deserialize, Serialize};

/// Send-side pipeline settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Source block size in bytes. Bounded above by what one barcode frame
    /// can carry after the 16-byte header.
    ///
    /// Default: 200
    pub block_size: u32,

    /// Attempt the gzip envelope before encoding.
    ///
    /// Default: true
    pub compress: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            block_size: 200,
            compress: true,
        }
    }
}

impl TransferConfig {
    /// Number of source blocks a payload of `payload_len` bytes produces.
    #[must_use]
    pub const fn block_count(&self, payload_len: usize) -> usize {
        payload_len.div_ceil(self.block_size as usize)
    }

    /// Wire frame length for this block size.
    #[must_use]
    pub const fn frame_len(&self) -> usize {
        16 + self.block_size as usize
    }
}
