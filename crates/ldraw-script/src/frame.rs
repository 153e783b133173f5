// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Chunk-frame inspection for the binary form.
//!
//! This walks headers only: it checks that every declared size fits inside
//! its parent and hands back payload slices. It does not interpret payloads,
//! so it cannot tell a nested chunk from raw data; callers decide which
//! payloads to descend into with [`Chunk::children`].

use ldraw_core::Keyword;
use thiserror::Error;

use crate::sink::CHUNK_HEADER_LEN;

/// Framing violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Fewer than eight bytes remain where a header should start.
    #[error("incomplete chunk header at offset {offset}: need {needed} bytes, got {available}")]
    Truncated {
        /// Offset of the header within the walked buffer.
        offset: usize,
        /// Bytes a header needs.
        needed: usize,
        /// Bytes left.
        available: usize,
    },

    /// A declared size runs past the end of the buffer.
    #[error("chunk at offset {offset} declares {size} payload bytes, only {available} remain")]
    Overrun {
        /// Offset of the header within the walked buffer.
        offset: usize,
        /// Declared payload size.
        size: u32,
        /// Bytes left after the header.
        available: usize,
    },
}

/// One framed chunk, borrowing its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Keyword hash from the header.
    pub hash: u32,
    /// Offset of the header within the walked buffer.
    pub offset: usize,
    /// Payload bytes.
    pub payload: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// The header keyword, if it is in the vocabulary.
    pub fn keyword(&self) -> Option<Keyword> {
        Keyword::from_hash(self.hash)
    }

    /// Header plus payload length.
    pub fn total_len(&self) -> usize {
        CHUNK_HEADER_LEN + self.payload.len()
    }

    /// Walks the payload as a sequence of chunks.
    pub fn children(&self) -> Chunks<'a> {
        chunks(self.payload)
    }
}

/// Iterator over consecutive chunks; see [`chunks`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

/// Walks `bytes` as back-to-back chunks.
///
/// Yields an error at the first malformed header and then stops.
///
/// ```
/// use ldraw_core::{Colour, Keyword};
/// use ldraw_script::{frame, Builder, Scope};
///
/// let mut b = Builder::new();
/// b.group("G", Colour::WHITE);
/// let bytes = b.to_bytes();
/// let group = frame::chunks(&bytes).next().unwrap().unwrap();
/// assert_eq!(group.keyword(), Some(Keyword::Group));
/// let name = group.children().next().unwrap().unwrap();
/// assert_eq!(name.payload, b"G");
/// ```
pub fn chunks(bytes: &[u8]) -> Chunks<'_> {
    Chunks {
        bytes,
        offset: 0,
        failed: false,
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Result<Chunk<'a>, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset == self.bytes.len() {
            return None;
        }
        let offset = self.offset;
        let rest = &self.bytes[offset..];
        let parsed = split_chunk(rest, offset);
        match &parsed {
            Ok(chunk) => self.offset += chunk.total_len(),
            Err(_) => self.failed = true,
        }
        Some(parsed)
    }
}

fn split_chunk(rest: &[u8], offset: usize) -> Result<Chunk<'_>, FrameError> {
    let (Some(hash), Some(size)) = (read_u32(rest, 0), read_u32(rest, 4)) else {
        return Err(FrameError::Truncated {
            offset,
            needed: CHUNK_HEADER_LEN,
            available: rest.len(),
        });
    };
    let body = &rest[CHUNK_HEADER_LEN..];
    let payload = usize::try_from(size)
        .ok()
        .and_then(|len| body.get(..len))
        .ok_or(FrameError::Overrun {
            offset,
            size,
            available: body.len(),
        })?;
    Ok(Chunk {
        hash,
        offset,
        payload,
    })
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let raw = bytes.get(at..at + 4)?;
    raw.try_into().ok().map(u32::from_le_bytes)
}
