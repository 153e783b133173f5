// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Length-prefixed chunk form.
//!
//! Every chunk is `keyword:u32le | size:u32le | payload[size]`. The size is
//! unknown until the payload (children included) has been written, so the
//! header goes out with a zero placeholder and is patched on close.

use core::fmt;

use ldraw_core::{Colour, CommandId, Keyword, LeEncode};

use super::Sink;
use crate::attr::{self, Fragment as _};
use crate::value::ScriptString;

/// Bytes in a chunk header: keyword hash then payload size.
pub const CHUNK_HEADER_LEN: usize = 8;

/// Sink producing the binary form.
#[derive(Debug, Default, Clone)]
pub struct BinarySink {
    buf: Vec<u8>,
}

impl BinarySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Consumes the sink and returns the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl Sink for BinarySink {
    /// Offset of the chunk header.
    type Mark = usize;

    fn open_chunk(&mut self, keyword: Keyword) -> usize {
        let at = self.buf.len();
        keyword.write_le(&mut self.buf);
        0u32.write_le(&mut self.buf);
        at
    }

    fn open_object(&mut self, keyword: Keyword, name: &str, colour: Colour) -> usize {
        let at = self.open_chunk(keyword);
        attr::Name(name).emit(self);
        colour.emit(self);
        at
    }

    fn close_chunk(&mut self, at: usize) {
        let payload = self.buf.len() - at - CHUNK_HEADER_LEN;
        // Payloads past 4 GiB are not representable; saturate rather than wrap.
        let size = u32::try_from(payload).unwrap_or(u32::MAX);
        self.buf[at + 4..at + CHUNK_HEADER_LEN].copy_from_slice(&size.to_le_bytes());
    }

    fn put<V: LeEncode + fmt::Display>(&mut self, value: &V) {
        value.write_le(&mut self.buf);
    }

    fn put_command(&mut self, id: CommandId) {
        id.write_le(&mut self.buf);
    }

    fn put_keyword(&mut self, keyword: Keyword) {
        keyword.write_le(&mut self.buf);
    }

    fn put_symbol(&mut self, _name: &str, value: u32) {
        value.write_le(&mut self.buf);
    }

    fn put_str(&mut self, s: &ScriptString) {
        self.buf.extend_from_slice(s.prefix().as_bytes());
        self.buf.extend_from_slice(s.as_str().as_bytes());
    }

    fn put_raw_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }
}
