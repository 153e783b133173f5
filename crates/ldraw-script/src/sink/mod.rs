// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Emission back-ends.
//!
//! A [`Sink`] receives the same call sequence from the tree walk whichever
//! format it produces. Chunk framing is the only thing that differs, and it is
//! localised in [`ChunkGuard`]: opening a chunk returns a guard, and dropping
//! the guard closes the chunk (`}` for text, a size back-patch for binary).

use core::fmt;
use core::ops::{Deref, DerefMut};

use ldraw_core::{Colour, CommandId, Keyword, LeEncode};

use crate::value::ScriptString;

mod binary;
mod text;

pub use binary::{BinarySink, CHUNK_HEADER_LEN};
pub use text::TextSink;

/// Receiver for a depth-first scene walk.
pub trait Sink {
    /// Whatever the sink needs to close a chunk it opened.
    type Mark: Copy;

    /// Starts a chunk tagged `keyword`.
    fn open_chunk(&mut self, keyword: Keyword) -> Self::Mark;

    /// Starts an object chunk, writing its name and colour first.
    ///
    /// An empty name and [`Colour::WHITE`] are elided.
    fn open_object(&mut self, keyword: Keyword, name: &str, colour: Colour) -> Self::Mark;

    /// Finishes the chunk started at `mark`.
    fn close_chunk(&mut self, mark: Self::Mark);

    /// Writes a fixed-width value.
    fn put<V: LeEncode + fmt::Display>(&mut self, value: &V);

    /// Writes a command identifier.
    fn put_command(&mut self, id: CommandId);

    /// Writes a keyword used as a value.
    fn put_keyword(&mut self, keyword: Keyword);

    /// Writes an enumerated value: its spelling in text, `value` in binary.
    fn put_symbol(&mut self, name: &str, value: u32);

    /// Writes a length-prefixed string.
    fn put_str(&mut self, s: &ScriptString);

    /// Writes a raw string whose length is carried by the enclosing chunk.
    fn put_raw_str(&mut self, s: &str);

    /// Opens a chunk closed when the guard drops.
    fn chunk(&mut self, keyword: Keyword) -> ChunkGuard<'_, Self>
    where
        Self: Sized,
    {
        let mark = self.open_chunk(keyword);
        ChunkGuard { sink: self, mark }
    }

    /// Opens an object chunk closed when the guard drops.
    fn object(&mut self, keyword: Keyword, name: &str, colour: Colour) -> ChunkGuard<'_, Self>
    where
        Self: Sized,
    {
        let mark = self.open_object(keyword, name, colour);
        ChunkGuard { sink: self, mark }
    }
}

/// An open chunk. Writes go through the guard; dropping it closes the chunk.
#[must_use = "dropping the guard closes the chunk immediately"]
pub struct ChunkGuard<'a, S: Sink> {
    sink: &'a mut S,
    mark: S::Mark,
}

impl<S: Sink> ChunkGuard<'_, S> {
    /// Closes the chunk now.
    pub fn close(self) {}
}

impl<S: Sink> Deref for ChunkGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.sink
    }
}

impl<S: Sink> DerefMut for ChunkGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.sink
    }
}

impl<S: Sink> Drop for ChunkGuard<'_, S> {
    fn drop(&mut self) {
        self.sink.close_chunk(self.mark);
    }
}
