//! Filename envelope.
//!
//! When a file is dropped on the sender, its name rides along in front of
//! the payload so the receiver can offer a sensible download name.
//!
//! # Wire Format
//!
//! ```text
//! QRAMF ENVELOPE FORMAT
//!
//!   Bytes 0-4:  Magic (ASCII "QRAMF")
//!   Bytes 5-6:  Name length (u16 BE)
//!   Bytes 7+:   UTF-8 filename, then the file bytes
//! ```

// Allow truncation cast - the name length is checked against u16 first
#![allow(clippy::cast_possible_truncation)]

use crate::error::EnvelopeError;

/// Envelope magic: ASCII "QRAMF".
pub const FILE_MAGIC: [u8; 5] = *b"QRAMF";

/// Envelope header length: magic + name length.
pub const FILE_HEADER_LEN: usize = 7;

/// Maximum filename length in UTF-8 bytes.
pub const FILE_NAME_MAX: usize = u16::MAX as usize;

/// Prefix `data` with a filename record.
///
/// # Errors
///
/// Returns [`EnvelopeError::NameTooLong`] if the UTF-8 name exceeds
/// [`FILE_NAME_MAX`] bytes.
pub fn wrap_file(name: &str, data: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    let name_bytes = name.as_bytes();
    if name_bytes.len() > FILE_NAME_MAX {
        return Err(EnvelopeError::NameTooLong {
            len: name_bytes.len(),
        });
    }

    let mut out = Vec::with_capacity(FILE_HEADER_LEN + name_bytes.len() + data.len());
    out.extend_from_slice(&FILE_MAGIC);
    out.extend_from_slice(&(name_bytes.len() as u16).to_be_bytes());
    out.extend_from_slice(name_bytes);
    out.extend_from_slice(data);
    Ok(out)
}

/// Split a filename envelope into its name and body.
///
/// Returns `None` when the magic is absent, the record is truncated, or the
/// name is not valid UTF-8; callers then treat the payload as plain bytes.
#[must_use]
pub fn unwrap_file(bytes: &[u8]) -> Option<(String, &[u8])> {
    if bytes.len() < FILE_HEADER_LEN || bytes[..5] != FILE_MAGIC {
        return None;
    }

    let name_len = usize::from(u16::from_be_bytes([bytes[5], bytes[6]]));
    let rest = &bytes[FILE_HEADER_LEN..];
    if name_len > rest.len() {
        return None;
    }

    let (name, body) = rest.split_at(name_len);
    let name = std::str::from_utf8(name).ok()?;
    Some((name.to_owned(), body))
}
