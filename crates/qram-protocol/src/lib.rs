//! QRAM packet framing primitives.

#![forbid(unsafe_code)]

mod packet;

pub use packet::*;
