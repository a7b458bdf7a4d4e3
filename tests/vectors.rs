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

use base93::decode::{decode_to_vec, DecodeError};
use base93::encode::{encode_to_string, encode_to_vec};
use base93::{max_encoded_len, ALPHABET};

const VECTORS: &[(&[u8], &str)] = &[
    (b"", ""),
    (&[0x00], " "),
    (&[0x00, 0x00], "   "),
    (&[0xff], "g#"),
    (&[0xff, 0xff], "(z("),
];

#[test]
fn encode_vectors() {
    for &(input, symbols) in VECTORS {
        assert_eq!(encode_to_string(input), symbols, "input {:?}", input);
    }
}

#[test]
fn decode_vectors() {
    for &(input, symbols) in VECTORS {
        assert_eq!(
            decode_to_vec(symbols.as_bytes()).unwrap(),
            input,
            "symbols {:?}",
            symbols,
        );
    }
}

#[test]
fn max_encoded_len_small_inputs() {
    for &(n, len) in &[(0, 0), (1, 2), (2, 3), (3, 4), (13, 16)] {
        assert_eq!(max_encoded_len(n), len, "n = {}", n);
    }
}

#[test]
fn alphabet_is_json_string_safe() {
    assert!(!ALPHABET.contains(&b'"'));
    assert!(!ALPHABET.contains(&b'\\'));
    assert!(ALPHABET.iter().all(|b| (0x20..0x7f).contains(b)));

    let mut symbols = ALPHABET.to_vec();
    symbols.sort_unstable();
    symbols.dedup();
    assert_eq!(symbols.len(), 93);
}

#[test]
fn encoded_output_stays_inside_the_alphabet() {
    for byte in 0..=255u8 {
        let symbols = encode_to_vec(&[byte, byte.wrapping_mul(31), byte]);
        assert!(
            symbols.iter().all(|s| ALPHABET.contains(s)),
            "byte {:#04x}",
            byte,
        );
    }
}

#[test]
fn rejects_bytes_outside_the_alphabet() {
    for &byte in &[b'"', b'\\', 0x00, 0x1f, 0x7f, 0x80, 0xff] {
        match decode_to_vec(&[byte]) {
            Err(DecodeError::BadByte(b)) => assert_eq!(b, byte),
            other => panic!("byte {:#04x}: expected BadByte, got {:?}", byte, other),
        }
    }
}

#[test]
fn invalid_symbol_mid_stream_is_reported() {
    // "g#" is a valid pair; the quote right after it must fail.
    assert!(matches!(
        decode_to_vec(b"g#\"g#"),
        Err(DecodeError::BadByte(b'"'))
    ));
}

#[test]
fn leviathan_round_trip() {
    let src: &[u8] = b"Man is distinguished, not only by his reason, but by \
        this singular passion from other animals, which is a lust of the \
        mind, that by a perseverance of delight in the continued and \
        indefatigable generation of knowledge, exceeds the short vehemence \
        of any carnal pleasure.";

    let encoded = encode_to_vec(src);
    assert!(encoded.len() <= max_encoded_len(src.len()));
    assert!(encoded.iter().all(|s| ALPHABET.contains(s)));
    assert_eq!(decode_to_vec(&encoded).unwrap(), src);
}
