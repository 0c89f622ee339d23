//! Golden vector tests for the packet derivation wire contract.
//!
//! The degree and neighbor set of every packet derive deterministically from
//! `(run_id, seq_num, k)`. Any implementation, in any language, must
//! reproduce these vectors exactly to interoperate; a change here is a
//! breaking change to the packet format.
