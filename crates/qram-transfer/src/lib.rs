//! Send/receive pipeline for QRAM optical transfers.
//!
//! Composes the envelope and fountain layers into the two data flows the
//! system runs end to end:
//!
//! - **send:** payload -> (file envelope) -> (compression envelope) ->
//!   LT encoder -> wire frames, handed to an external barcode renderer;
//! - **receive:** scanned frames -> LT decoder -> trim -> (decompression) ->
//!   (file extraction) -> delivered payload.
//!
//! The barcode symbology and camera are external collaborators; this crate
//! starts and ends at opaque frame bytes.

#![forbid(unsafe_code)]

mod config;
mod error;
mod recv;
mod send;

pub use config::TransferConfig;
pub use error::TransferError;
pub use recv::{Delivery, Receiver};
pub use send::Sender;
