// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Float32 vectors, column-major matrices, and bounding boxes.
//!
//! Text forms are the components separated by single spaces, each printed with
//! Rust's shortest round-trip `f32` formatting. Byte forms are the components
//! as consecutive little-endian `f32`s.

mod bbox;
mod mat;
mod vec;

pub use bbox::BBox;
pub use mat::{Mat3, Mat4};
pub use vec::{Vec2, Vec3, Vec4};
