// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;

use super::{Vec3, Vec4};
use crate::LeEncode;

/// Column-major 3×3 matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    /// First column.
    pub x: Vec3,
    /// Second column.
    pub y: Vec3,
    /// Third column.
    pub z: Vec3,
}

impl Mat3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_cols(
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    );

    /// Builds a matrix from its three columns.
    pub const fn from_cols(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self { x, y, z }
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Mat3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

impl LeEncode for Mat3 {
    const SIZE: usize = 36;

    fn write_le(&self, out: &mut Vec<u8>) {
        self.x.write_le(out);
        self.y.write_le(out);
        self.z.write_le(out);
    }
}

/// Column-major 4×4 affine matrix (object-to-world transforms).
///
/// The translation lives in the `w` column; the last row is `(x.w, y.w, z.w,
/// w.w)`.
///
/// # Examples
/// ```
/// use ldraw_core::{Mat4, Vec3};
/// let m = Mat4::translation(Vec3::new(5.0, 0.0, 0.0));
/// assert!(m.is_translation());
/// assert!(!m.is_identity());
/// assert_eq!(m.pos(), Vec3::new(5.0, 0.0, 0.0));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    /// First column.
    pub x: Vec4,
    /// Second column.
    pub y: Vec4,
    /// Third column.
    pub z: Vec4,
    /// Fourth column (translation).
    pub w: Vec4,
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_cols(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );

    /// Builds a matrix from its four columns.
    pub const fn from_cols(x: Vec4, y: Vec4, z: Vec4, w: Vec4) -> Self {
        Self { x, y, z, w }
    }

    /// Pure translation by `pos`.
    pub const fn translation(pos: Vec3) -> Self {
        Self::from_cols(
            Self::IDENTITY.x,
            Self::IDENTITY.y,
            Self::IDENTITY.z,
            pos.extend(1.0),
        )
    }

    /// Non-uniform scale about the origin.
    pub const fn scale(s: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(s.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, s.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, s.z, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Rotation part as a [`Mat3`].
    pub const fn rot(&self) -> Mat3 {
        Mat3::from_cols(self.x.xyz(), self.y.xyz(), self.z.xyz())
    }

    /// Translation part.
    pub const fn pos(&self) -> Vec3 {
        self.w.xyz()
    }

    /// Copy of `self` with the translation replaced by `pos`.
    pub const fn with_pos(mut self, pos: Vec3) -> Self {
        self.w = pos.extend(self.w.w);
        self
    }

    /// Copy of `self` with the object-space axes scaled by `s`.
    ///
    /// Equivalent to `self * Mat4::scale(s)`; the translation is unchanged.
    pub fn scaled(self, s: Vec3) -> Self {
        let col = |c: Vec4, k: f32| Vec4::new(c.x * k, c.y * k, c.z * k, c.w * k);
        Self::from_cols(col(self.x, s.x), col(self.y, s.y), col(self.z, s.z), self.w)
    }

    /// `true` when every element matches the identity matrix.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `true` when the matrix only translates: the upper-left 3×3 block is the
    /// identity and the last row is `(0, 0, 0, 1)`.
    #[allow(clippy::float_cmp)]
    pub fn is_translation(&self) -> bool {
        self.rot() == Mat3::IDENTITY
            && self.x.w == 0.0
            && self.y.w == 0.0
            && self.z.w == 0.0
            && self.w.w == 1.0
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.z, self.w)
    }
}

impl LeEncode for Mat4 {
    const SIZE: usize = 64;

    fn write_le(&self, out: &mut Vec<u8>) {
        self.x.write_le(out);
        self.y.write_le(out);
        self.z.write_le(out);
        self.w.write_le(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_translation_but_not_vice_versa() {
        assert!(Mat4::IDENTITY.is_identity());
        assert!(Mat4::IDENTITY.is_translation());
        let t = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(t.is_translation());
        assert!(!t.is_identity());
    }

    #[test]
    fn scale_and_projection_are_not_translations() {
        assert!(!Mat4::scale(Vec3::new(2.0, 1.0, 1.0)).is_translation());
        let mut m = Mat4::IDENTITY;
        m.x.w = 0.5;
        assert!(!m.is_translation());
        let mut m = Mat4::translation(Vec3::ONE);
        m.w.w = 2.0;
        assert!(!m.is_translation());
    }

    #[test]
    fn with_pos_keeps_rotation() {
        let m = Mat4::scale(Vec3::splat(2.0)).with_pos(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(m.rot(), Mat3::from_cols(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ));
        assert_eq!(m.pos(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(m.w.w, 1.0);
    }

    #[test]
    fn scaled_matches_scale_matrix() {
        let s = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Mat4::IDENTITY.scaled(s), Mat4::scale(s));
        let t = Mat4::translation(Vec3::new(4.0, 5.0, 6.0)).scaled(s);
        assert_eq!(t.pos(), Vec3::new(4.0, 5.0, 6.0));
        assert!(!t.is_translation());
    }

    #[test]
    fn text_and_bytes_are_column_order() {
        assert_eq!(
            Mat4::IDENTITY.to_string(),
            "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1"
        );
        assert_eq!(Mat3::IDENTITY.to_string(), "1 0 0 0 1 0 0 0 1");

        let bytes = Mat4::translation(Vec3::new(7.0, 8.0, 9.0)).to_le_vec();
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[48..52], &7.0f32.to_le_bytes());
        assert_eq!(&bytes[60..64], &1.0f32.to_le_bytes());
        assert_eq!(Mat3::IDENTITY.to_le_vec().len(), Mat3::SIZE);
    }
}
