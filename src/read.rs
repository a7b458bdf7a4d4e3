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

//! A decoding adapter for [`std::io::Read`].

use super::decode::Decoder;

use std::io::{self, Error, ErrorKind, Read};
use std::mem;

const CHUNK: usize = 1024;

/// Wraps a reader of base-93 symbols, yielding the decoded bytes.
///
/// Reads may return fewer bytes than requested; decoded bytes that did not
/// fit the destination stay buffered for later calls. When the wrapped
/// reader reports end of data, the trailing partial group is resolved
/// exactly once before this reader reports end of data itself.
///
/// A byte outside the alphabet surfaces as an error of kind
/// [`ErrorKind::InvalidData`] wrapping a
/// [`DecodeError`](crate::decode::DecodeError), and any decoded bytes not
/// yet delivered are dropped.
pub struct DecoderReader<R: Read> {
    reader: R,
    dec: Decoder,
    /// Decoded but undelivered bytes; `pos..` is still pending.
    buf: Vec<u8>,
    pos: usize,
    eof: bool,
}

impl<R: Read> DecoderReader<R> {
    /// Creates an adapter decoding from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            dec: Decoder::new(),
            buf: Vec::new(),
            pos: 0,
            eof: false,
        }
    }

    /// Rebinds the adapter to `reader` for a new stream, returning the old
    /// reader. Decoding state and buffered output are cleared; the buffer
    /// allocation is kept.
    pub fn reset(&mut self, reader: R) -> R {
        self.dec.reset();
        self.buf.clear();
        self.pos = 0;
        self.eof = false;
        mem::replace(&mut self.reader, reader)
    }

    /// Returns a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Unwraps the adapter, discarding any undelivered decoded bytes.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Read for DecoderReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        loop {
            if self.pos < self.buf.len() {
                let n = out.len().min(self.buf.len() - self.pos);
                out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
                self.pos += n;
                if self.pos == self.buf.len() {
                    self.buf.clear();
                    self.pos = 0;
                }
                return Ok(n);
            }
            if self.eof {
                return Ok(0);
            }

            let mut chunk = [0; CHUNK];
            let n = self.reader.read(&mut chunk)?;
            self.buf.clear();
            self.pos = 0;
            if n == 0 {
                self.eof = true;
                self.buf.extend(self.dec.finish());
            } else {
                let result = self.dec.decode(&chunk[..n], &mut self.buf);
                if let Err(e) = result {
                    self.buf.clear();
                    return Err(Error::new(ErrorKind::InvalidData, e));
                }
            }
        }
    }
}
