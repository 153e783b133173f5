// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Construction-time errors.
//!
//! Emission never fails on a tree that was built successfully, so every error
//! the crate reports comes from the builder call that would have made the tree
//! inconsistent.

use ldraw_core::{CommandId, VARINT_MAX};
use thiserror::Error;

use crate::value::ValueKind;

/// Errors raised while building a scene.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// A vertex list mixes coloured and uncoloured vertices.
    ///
    /// With per-item colour set, the colour list must be exactly as long as
    /// the vertex list; without it, the colour list must be empty.
    #[error("per-item colour mismatch: {vertices} vertices, {colours} colours")]
    PerItemColourSizeMismatch {
        /// Vertex count the call would have produced.
        vertices: usize,
        /// Colour count the call would have produced.
        colours: usize,
    },

    /// A command argument does not fit the command's signature.
    ///
    /// `expected` is `None` when too many arguments were given; `found` is
    /// `None` when too few were given.
    #[error(
        "command {command} does not accept {found:?} as argument {position} (expected {expected:?})"
    )]
    UnsupportedCommandPayload {
        /// Command being built.
        command: CommandId,
        /// Zero-based argument index.
        position: usize,
        /// Kind the signature requires at `position`.
        expected: Option<ValueKind>,
        /// Kind supplied at `position`.
        found: Option<ValueKind>,
    },

    /// A length-prefixed string is longer than the varint prefix can express.
    #[error("string of {len} bytes exceeds the {max} byte limit")]
    StringTooLong {
        /// Byte length of the rejected string.
        len: usize,
        /// Longest accepted byte length.
        max: u32,
    },
}

impl ConstructionError {
    pub(crate) const fn string_too_long(len: usize) -> Self {
        Self::StringTooLong {
            len,
            max: VARINT_MAX,
        }
    }
}

/// Result alias for builder operations.
pub type Result<T, E = ConstructionError> = core::result::Result<T, E>;
