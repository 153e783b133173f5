// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Value types and identifiers shared by every LDraw script producer.
//!
//! This crate holds the leaves of the LDraw stack:
//! - Vectors, matrices, ARGB colours, and bounding boxes with their text
//!   (`Display`) and little-endian byte ([`LeEncode`]) forms
//! - The case-insensitive FNV1a hash and the [`Keyword`] / [`CommandId`] tables
//! - The 6-bits-per-byte [`Varint`] codec used for string lengths
//!
//! # Design
//!
//! Nothing here knows about scene trees or chunk framing; that lives in
//! `ldraw-script`. Every type is `Copy` and every table is a `const`, so the
//! crate is freely shareable across threads.

#![forbid(unsafe_code)]

mod colour;
mod keyword;
mod math;
mod varint;

pub use colour::Colour;
pub use keyword::{hash_i, CommandId, Keyword, FNV_OFFSET_BASIS, FNV_PRIME};
pub use math::{BBox, Mat3, Mat4, Vec2, Vec3, Vec4};
pub use varint::{Varint, VarintError, MAX_VARINT_LEN, VARINT_MAX};

/// Fixed-width little-endian byte form of a value.
///
/// All integers and floats are written little-endian regardless of host byte
/// order. Composite values write their fields in declaration order with no
/// padding.
pub trait LeEncode {
    /// Number of bytes [`LeEncode::write_le`] appends.
    const SIZE: usize;

    /// Append the little-endian form of `self` to `out`.
    fn write_le(&self, out: &mut Vec<u8>);

    /// Little-endian form of `self` in a fresh buffer.
    fn to_le_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        self.write_le(&mut out);
        out
    }
}

impl LeEncode for u32 {
    const SIZE: usize = 4;

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl LeEncode for i32 {
    const SIZE: usize = 4;

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl LeEncode for f32 {
    const SIZE: usize = 4;

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}
