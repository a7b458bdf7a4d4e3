/*
 * Copyright (C) 2023 taylor.fish <contact@taylor.fish>
 *
 * This file is part of base93.
 *
 * base93 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * base93 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with base93. If not, see <https://www.gnu.org/licenses/>.
 */

use super::{ALPHABET, BASE, WORD_BITS, WORD_FULL, WORD_MASK};

use core::array;
use core::iter::Take;

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

/// Iterator over the symbols emitted by [`Encoder::finish`]: at most one
/// low symbol and one high symbol.
pub type Tail = Take<array::IntoIter<u8, 2>>;

/// Streaming base-93 encoder.
///
/// Input bits collect in an accumulator; every 13 (or, for short words, 14)
/// of them leave as a pair of symbols. Chunking is irrelevant: feeding a
/// byte sequence in any number of pieces produces the same symbol stream as
/// feeding it whole, as long as [`finish`](Self::finish) runs once at the
/// end.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    state: u32,
    bits: u32,
}

impl Encoder {
    pub const fn new() -> Self {
        Self { state: 0, bits: 0 }
    }

    /// Clears the encoder for a new stream.
    pub fn reset(&mut self) {
        self.state = 0;
        self.bits = 0;
    }

    /// Feeds one byte, returning the symbol pair for a completed word, if
    /// this byte completed one.
    pub fn push(&mut self, byte: u8) -> Option<[u8; 2]> {
        self.state |= u32::from(byte) << self.bits;
        self.bits += 8;

        // Extract only once more than WORD_BITS have collected, so an
        // extra bit is on hand when the word has room for it. One byte can
        // never complete two words: at most 21 bits are pending here and
        // an extraction takes at least 13 of them.
        if self.bits > WORD_BITS {
            let mut word = self.state & WORD_MASK;
            self.state >>= WORD_BITS;
            self.bits -= WORD_BITS;

            if word < WORD_FULL {
                // A short word takes one more bit without exceeding
                // WORD_MAX.
                word |= (self.state & 1) << WORD_BITS;
                self.state >>= 1;
                self.bits -= 1;
            }

            Some([
                ALPHABET[(word % BASE) as usize],
                ALPHABET[(word / BASE) as usize],
            ])
        } else {
            None
        }
    }

    /// Emits the symbols for any pending partial group and clears the
    /// encoder.
    ///
    /// A remainder of at most 8 bits whose value fits a single base-93
    /// digit needs only the low symbol; the decoder reconstructs the rest.
    pub fn finish(&mut self) -> Tail {
        let mut symbols = [0; 2];
        let mut len = 0;
        if self.bits > 0 {
            symbols[0] = ALPHABET[(self.state % BASE) as usize];
            len = 1;
            if self.bits > 8 || self.state >= BASE {
                symbols[1] = ALPHABET[(self.state / BASE) as usize];
                len = 2;
            }
        }
        self.reset();
        IntoIterator::into_iter(symbols).take(len)
    }

    /// Encodes `src`, appending the symbols to `dst`.
    #[cfg(feature = "alloc")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
    pub fn encode(&mut self, src: &[u8], dst: &mut Vec<u8>) {
        dst.reserve(super::max_encoded_len(src.len()));
        for &byte in src {
            if let Some(pair) = self.push(byte) {
                dst.extend_from_slice(&pair);
            }
        }
    }
}

/// Encodes `src`, appending the symbols to `dst`.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_append(src: &[u8], dst: &mut Vec<u8>) {
    let mut enc = Encoder::new();
    enc.encode(src, dst);
    dst.extend(enc.finish());
}

/// Encodes `src` into a fresh buffer.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_vec(src: &[u8]) -> Vec<u8> {
    let mut dst = Vec::new();
    encode_append(src, &mut dst);
    dst
}

/// Encodes `src` as a [`String`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string(src: &[u8]) -> String {
    let symbols = encode_to_vec(src);

    #[cfg(debug_assertions)]
    let symbols = String::from_utf8(symbols)
        .expect("[debug] encoded data is not valid ascii -- this is UB!")
        .into_bytes();

    // SAFETY: `ALPHABET` holds only ASCII bytes, so encoded output is
    // always valid UTF-8.
    unsafe { String::from_utf8_unchecked(symbols) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_words_absorb_an_extra_bit() {
        // Zero bytes always pack 14 bits per pair: 7 bytes are exactly
        // four pairs with nothing left to flush.
        assert_eq!(encode_to_vec(&[0; 7]), b"        ");
    }

    #[test]
    fn full_words_carry_thirteen_bits() {
        // All-ones input never leaves a short word: 13 bytes are exactly
        // eight 13-bit words.
        let out = encode_to_vec(&[0xff; 13]);
        assert_eq!(out.len(), 16);
        assert!(out.chunks(2).all(|pair| pair == &b"(z"[..]));
    }

    #[test]
    fn finish_emits_high_symbol_only_when_needed() {
        assert_eq!(encode_to_vec(&[0x00]), b" ");
        assert_eq!(encode_to_vec(&[0xff]), b"g#");
    }

    #[test]
    fn finish_leaves_the_encoder_reusable() {
        let mut enc = Encoder::new();
        let mut first = Vec::new();
        enc.encode(b"reuse", &mut first);
        first.extend(enc.finish());

        let mut second = Vec::new();
        enc.encode(b"reuse", &mut second);
        second.extend(enc.finish());

        assert_eq!(first, second);
    }
}
