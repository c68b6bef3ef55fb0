// Copyright 2026 the Glyphis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding of the list of characters to pack.

use core::fmt;

use crate::Error;

/// The way a target list fails to be UTF-8.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Utf8ErrorKind {
    /// A continuation byte appeared where a sequence should start.
    UnexpectedContinuation,
    /// A multi-byte sequence was cut short by a non-continuation byte or by
    /// the end of input.
    ContinuationExpected,
    /// A byte that cannot appear at its position: one that never occurs in
    /// UTF-8, or a continuation byte outside the range its lead byte allows
    /// (overlong forms, surrogates, code points above U+10FFFF).
    InvalidByte,
}

/// Location and classification of the first invalid byte in a target list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MalformedUtf8 {
    /// What went wrong.
    pub kind: Utf8ErrorKind,
    /// The offending byte, or `None` if the input ended mid-sequence.
    pub byte: Option<u8>,
    /// Byte offset of the offending byte (or of the end of input).
    pub offset: usize,
}

impl fmt::Display for MalformedUtf8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.byte) {
            (Utf8ErrorKind::UnexpectedContinuation, Some(byte)) => {
                write!(f, "unexpected continuation byte {byte:#x}")?;
            }
            (Utf8ErrorKind::ContinuationExpected, Some(byte)) => {
                write!(f, "expected continuation byte, but got {byte:#x} instead")?;
            }
            (Utf8ErrorKind::ContinuationExpected, None) => {
                write!(f, "expected continuation byte, but the input ended")?;
            }
            (_, Some(byte)) => write!(f, "invalid byte {byte:#x}")?,
            (_, None) => write!(f, "invalid byte")?,
        }
        write!(f, " at offset {}", self.offset)
    }
}

/// Decodes `bytes` as UTF-8 and returns the characters to pack, in order.
///
/// Characters rejected by [`is_packable`] are dropped. Duplicates are kept;
/// each occurrence is packed again.
pub fn decode_targets(bytes: &[u8]) -> Result<Vec<char>, Error> {
    let text = core::str::from_utf8(bytes)
        .map_err(|err| Error::malformed_input(classify(bytes, &err)))?;
    Ok(text.chars().filter(|&ch| is_packable(ch)).collect())
}

/// Returns `false` for control characters and byte order marks, which are
/// never packed.
pub fn is_packable(ch: char) -> bool {
    ch >= ' ' && ch != '\u{feff}' && ch != '\u{fffe}'
}

fn classify(bytes: &[u8], err: &core::str::Utf8Error) -> MalformedUtf8 {
    let offset = err.valid_up_to();
    let lead = bytes[offset];
    match lead {
        0x80..=0xBF => MalformedUtf8 {
            kind: Utf8ErrorKind::UnexpectedContinuation,
            byte: Some(lead),
            offset,
        },
        0xC2..=0xF4 => {
            // `error_len` counts the bytes of the sequence that were accepted
            // before the one that broke it.
            let next = offset + err.error_len().unwrap_or(bytes.len() - offset);
            let byte = bytes.get(next).copied();
            let kind = match byte {
                Some(0x80..=0xBF) => Utf8ErrorKind::InvalidByte,
                _ => Utf8ErrorKind::ContinuationExpected,
            };
            MalformedUtf8 {
                kind,
                byte,
                offset: next,
            }
        }
        _ => MalformedUtf8 {
            kind: Utf8ErrorKind::InvalidByte,
            byte: Some(lead),
            offset,
        },
    }
}
