//! Optional envelopes wrapped around a QRAM payload before encoding.
//!
//! Both envelopes are pure byte-to-byte transforms at the edges of the
//! pipeline, applied before the fountain encoder sees the payload:
//!
//! - the filename envelope (`QRAMF`) records the name of a dropped file;
//! - the compression envelope (`QRAMC`) gzips the payload, but only when
//!   compression actually pays for itself on this channel.
//!
//! An unwrapped payload passes through both layers unchanged, so senders
//! and receivers need no prior agreement about which envelopes are in use.

#![forbid(unsafe_code)]

mod compress;
mod error;
mod file;

pub use compress::*;
pub use error::EnvelopeError;
pub use file::*;
