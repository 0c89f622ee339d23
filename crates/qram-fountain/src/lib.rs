//! LT (Luby Transform) fountain codec for one-way lossy channels.
//!
//! # Overview
//!
//! The channel this codec targets (a screen flashing barcodes at a camera)
//! loses frames, duplicates frames, and offers no way to ask for a resend.
//! A fountain code sidesteps all of that:
//!
//! - The encoder emits an unbounded stream of packets; no packet is special.
//! - Any sufficiently large subset reconstructs the payload, so losses and
//!   duplicates cost only time, never correctness.
//! - Every packet carries the session anchors, so the decoder bootstraps
//!   from whichever packet it happens to see first.
//! - Sessions are told apart by a random 32-bit `run_id`; no coordination.
//!
//! # Determinism
//!
//! Each packet's degree and neighbor set derive from `(run_id, seq_num)`
//! through a fixed xorshift64 stream and a Robust Soliton degree table.
//! This derivation is a bit-level wire contract shared by the encoder and
//! decoder; the golden vectors in this crate pin it.

#![forbid(unsafe_code)]

mod decode;
mod encode;
mod error;
mod golden;
mod prng;
mod sampler;
mod soliton;

pub use decode::LtDecoder;
pub use encode::LtEncoder;
pub use error::EncodeError;
pub use prng::{packet_seed, XorShift64};
pub use sampler::{packet_neighbors, select_neighbors};
pub use soliton::{DegreeTable, SolitonConfig};
