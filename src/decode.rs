/*
 * Copyright (C) 2023 taylor.fish <contact@taylor.fish>
 *
 * This file is part of Base93.
 *
 * Base93 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Base93 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Base93. If not, see <https://www.gnu.org/licenses/>.
 */

//! Functions and types for decoding base-93 data.

use super::{digit, BASE, WORD_BITS, WORD_FULL, WORD_MASK};

use core::array;
use core::fmt::{self, Formatter};
use core::iter::Take;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An error encountered while decoding.
#[non_exhaustive]
#[derive(Debug)]
pub enum DecodeError {
    /// Encountered a byte outside the 93-symbol alphabet.
    BadByte(u8),
}

use DecodeError as Error;

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::BadByte(b) => write!(f, "bad byte: 0x{:02x}", b),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DecodeError {}

/// Iterator over the bytes released by [`Decoder::push`]: a completed
/// symbol pair frees up to two of them.
pub type Decoded = Take<array::IntoIter<u8, 2>>;

/// Streaming base-93 decoder.
///
/// Symbols arrive one at a time; the first of each pair is held until its
/// partner reconstructs the packed word, whose bits then collect in an
/// accumulator and leave as whole bytes. A trailing lone symbol is resolved
/// by [`finish`](Self::finish).
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    /// Low symbol of a half-received pair.
    low: Option<u8>,
    state: u32,
    bits: u32,
}

impl Decoder {
    pub const fn new() -> Self {
        Self {
            low: None,
            state: 0,
            bits: 0,
        }
    }

    /// Clears the decoder for a new stream.
    pub fn reset(&mut self) {
        self.low = None;
        self.state = 0;
        self.bits = 0;
    }

    /// Feeds one symbol, returning the bytes it released.
    ///
    /// Fails if `byte` is not one of the 93 symbols. The decoder is left
    /// unchanged by a failed push, but output released by earlier pushes
    /// of the same stream should not be trusted once any push has failed.
    pub fn push(&mut self, byte: u8) -> DecodeResult<Decoded> {
        let mut bytes = [0; 2];
        let mut len = 0;

        let value = match digit(byte) {
            Some(value) => value,
            None => return Err(Error::BadByte(byte)),
        };

        let low = match self.low.take() {
            None => {
                self.low = Some(value);
                return Ok(IntoIterator::into_iter(bytes).take(0));
            }
            Some(low) => low,
        };

        let word = u32::from(low) + u32::from(value) * BASE;

        // A word whose low 13 bits fall short of a full word was
        // necessarily packed with a 14th bit; recompute the encoder's
        // decision from the word itself.
        let width = if (word & WORD_MASK) < WORD_FULL {
            WORD_BITS + 1
        } else {
            WORD_BITS
        };

        self.state |= word << self.bits;
        self.bits += width;

        while self.bits >= 8 {
            bytes[len] = self.state as u8;
            len += 1;
            self.state >>= 8;
            self.bits -= 8;
        }

        Ok(IntoIterator::into_iter(bytes).take(len))
    }

    /// Resolves a trailing lone symbol into the stream's final byte and
    /// clears the decoder.
    ///
    /// Returns [`None`] when the stream ended on a pair boundary. No
    /// validation is attempted: any pending low symbol yields a byte, even
    /// one a real encoder could not have left behind.
    pub fn finish(&mut self) -> Option<u8> {
        let byte = self
            .low
            .take()
            .map(|low| self.state as u8 | low << self.bits);
        self.state = 0;
        self.bits = 0;
        byte
    }

    /// Decodes `src`, appending output bytes to `dst`.
    ///
    /// Stops at the first byte outside the alphabet; whatever the earlier
    /// symbols released is left in `dst`, but callers must not rely on it.
    #[cfg(feature = "alloc")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
    pub fn decode(&mut self, src: &[u8], dst: &mut Vec<u8>) -> DecodeResult<()> {
        for &byte in src {
            let decoded = self.push(byte)?;
            dst.extend(decoded);
        }
        Ok(())
    }
}

/// Decodes `src`, appending output bytes to `dst`.
///
/// Stops and reports an error at the first byte outside the alphabet.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_append(src: &[u8], dst: &mut Vec<u8>) -> DecodeResult<()> {
    let mut dec = Decoder::new();
    dec.decode(src, dst)?;
    dst.extend(dec.finish());
    Ok(())
}

/// Decodes `src` into a fresh buffer.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec(src: &[u8]) -> DecodeResult<Vec<u8>> {
    let mut dst = Vec::new();
    decode_append(src, &mut dst)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_the_double_quote() {
        assert!(matches!(
            decode_to_vec(b"\""),
            Err(DecodeError::BadByte(b'"'))
        ));
    }

    #[test]
    fn a_failed_push_releases_nothing() {
        let mut dec = Decoder::new();
        let mut dst = Vec::new();
        assert!(dec.decode(b"\\", &mut dst).is_err());
        assert!(dst.is_empty());
    }

    #[test]
    fn lone_trailing_symbol_is_permissive() {
        // A stray low symbol still yields one byte; a legitimate
        // truncation is indistinguishable from garbage here.
        assert_eq!(decode_to_vec(b"!").unwrap(), [0x01]);
        assert_eq!(decode_to_vec(b"~").unwrap(), [92]);
    }

    #[test]
    fn finish_leaves_the_decoder_reusable() {
        let mut dec = Decoder::new();
        let mut first = Vec::new();
        dec.decode(b"g#", &mut first).unwrap();
        first.extend(dec.finish());

        let mut second = Vec::new();
        dec.decode(b"g#", &mut second).unwrap();
        second.extend(dec.finish());

        assert_eq!(first, [0xff]);
        assert_eq!(first, second);
    }
}
