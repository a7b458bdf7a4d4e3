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

//! An encoding adapter for [`std::io::Write`].

use super::encode::Encoder;

use std::io::{self, Write};
use std::mem;

/// Wraps a writer, base-93-encoding everything written to it.
///
/// Symbols are forwarded to the wrapped writer as they are produced. Call
/// [`finish`](Self::finish) after the last write to drain the trailing
/// partial group; dropping the adapter without it loses up to 13 pending
/// bits. The wrapped writer is never flushed or closed by the adapter
/// itself.
pub struct EncoderWriter<W: Write> {
    writer: W,
    enc: Encoder,
    /// Scratch for the symbols of one `write` call, reused across calls.
    buf: Vec<u8>,
}

impl<W: Write> EncoderWriter<W> {
    /// Creates an adapter encoding to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            enc: Encoder::new(),
            buf: Vec::new(),
        }
    }

    /// Rebinds the adapter to `writer` for a new stream, returning the old
    /// writer. Encoding state is cleared; the scratch allocation is kept.
    pub fn reset(&mut self, writer: W) -> W {
        self.enc.reset();
        self.buf.clear();
        mem::replace(&mut self.writer, writer)
    }

    /// Writes the symbols for any pending partial group to the wrapped
    /// writer, completing the encoded stream.
    ///
    /// Does not flush or close the wrapped writer.
    pub fn finish(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.buf.extend(self.enc.finish());
        self.writer.write_all(&self.buf)
    }

    /// Returns a reference to the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwraps the adapter, discarding any pending encoding state.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Write for EncoderWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.clear();
        self.enc.encode(data, &mut self.buf);
        self.writer.write_all(&self.buf)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
