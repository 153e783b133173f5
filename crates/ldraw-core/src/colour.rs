// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! 32-bit ARGB colour.

use core::fmt;

use crate::LeEncode;

/// Packed ARGB colour: alpha in the most significant byte, then red, green,
/// blue.
///
/// The text form is eight uppercase hex digits `AARRGGBB`; the byte form is the
/// packed `u32` little-endian.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Colour(pub u32);

impl Colour {
    /// Opaque white; the value every object has unless told otherwise.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque red.
    pub const RED: Self = Self(0xFFFF_0000);
    /// Opaque green.
    pub const GREEN: Self = Self(0xFF00_FF00);
    /// Opaque blue.
    pub const BLUE: Self = Self(0xFF00_00FF);

    /// Packs the four channels.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(u32::from_be_bytes([a, r, g, b]))
    }

    /// The packed value.
    pub const fn argb(self) -> u32 {
        self.0
    }

    /// Alpha channel.
    pub const fn a(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// Red channel.
    pub const fn r(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Green channel.
    pub const fn g(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Blue channel.
    pub const fn b(self) -> u8 {
        self.0.to_be_bytes()[3]
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Colour {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl LeEncode for Colour {
    const SIZE: usize = 4;

    fn write_le(&self, out: &mut Vec<u8>) {
        self.0.write_le(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack_msb_first() {
        let c = Colour::from_argb(0x80, 0x11, 0x22, 0x33);
        assert_eq!(c.argb(), 0x8011_2233);
        assert_eq!((c.a(), c.r(), c.g(), c.b()), (0x80, 0x11, 0x22, 0x33));
    }

    #[test]
    fn text_is_eight_uppercase_hex_digits() {
        assert_eq!(Colour::GREEN.to_string(), "FF00FF00");
        assert_eq!(Colour(0xab).to_string(), "000000AB");
    }

    #[test]
    fn bytes_are_little_endian_argb() {
        assert_eq!(Colour(0xFF00_FF00).to_le_vec(), vec![0x00, 0xFF, 0x00, 0xFF]);
    }
}
