// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;

use super::Vec3;
use crate::LeEncode;

/// Centre/radius bounding box.
///
/// [`BBox::RESET`] (radius `(-1, -1, -1)`) marks an empty box; producers skip
/// it rather than writing it out.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BBox {
    /// Centre of the box.
    pub centre: Vec3,
    /// Half-extents along each axis.
    pub radius: Vec3,
}

impl BBox {
    /// The empty box.
    pub const RESET: Self = Self::new(Vec3::ZERO, Vec3::splat(-1.0));

    /// Creates a box from its centre and half-extents.
    pub const fn new(centre: Vec3, radius: Vec3) -> Self {
        Self { centre, radius }
    }

    /// Smallest box containing both corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let centre = Vec3::new(
            (min.x + max.x) * 0.5,
            (min.y + max.y) * 0.5,
            (min.z + max.z) * 0.5,
        );
        let radius = Vec3::new(
            (max.x - min.x).abs() * 0.5,
            (max.y - min.y).abs() * 0.5,
            (max.z - min.z).abs() * 0.5,
        );
        Self::new(centre, radius)
    }

    /// `true` for the distinguished empty box.
    pub fn is_reset(&self) -> bool {
        self.radius == Self::RESET.radius
    }

    /// Full extents (twice the radius).
    pub fn size(&self) -> Vec3 {
        self.radius.scale(2.0)
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::RESET
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.centre, self.radius)
    }
}

impl LeEncode for BBox {
    const SIZE: usize = 24;

    fn write_le(&self, out: &mut Vec<u8>) {
        self.centre.write_le(out);
        self.radius.write_le(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_box_is_default() {
        assert!(BBox::default().is_reset());
        assert!(!BBox::new(Vec3::ZERO, Vec3::ONE).is_reset());
    }

    #[test]
    fn min_max_construction() {
        let b = BBox::from_min_max(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 4.0, 2.0));
        assert_eq!(b.centre, Vec3::new(1.0, 2.0, 2.0));
        assert_eq!(b.radius, Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(b.size(), Vec3::new(4.0, 4.0, 0.0));
    }

    #[test]
    fn text_and_bytes_are_centre_then_radius() {
        let b = BBox::new(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5));
        assert_eq!(b.to_string(), "1 2 3 0.5 0.5 0.5");
        let bytes = b.to_le_vec();
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[12..16], &0.5f32.to_le_bytes());
    }
}
