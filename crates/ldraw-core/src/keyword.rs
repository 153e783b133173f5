// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Keyword identity: the FNV1a-I hash and the fixed vocabulary tables.
//!
//! Every keyword and command id is the 32-bit FNV1a hash of its ASCII-lowercased
//! spelling. The enum discriminants below are computed by [`hash_i`] at compile
//! time, so the tables cannot drift from the hash function; a collision would
//! surface as a duplicate-discriminant compile error.

use core::fmt;

use crate::LeEncode;

/// FNV1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;

/// FNV1a 32-bit prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Case-insensitive FNV1a-32 hash of `name`.
///
/// ASCII letters are lowercased before hashing; every other byte (including
/// non-ASCII UTF-8) is hashed as-is.
///
/// ```
/// use ldraw_core::hash_i;
/// assert_eq!(hash_i("Point"), 414_084_241);
/// assert_eq!(hash_i("POINT"), hash_i("point"));
/// ```
#[allow(clippy::cast_lossless)]
pub const fn hash_i(name: &str) -> u32 {
    let bytes = name.as_bytes();
    let mut h = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        h = (h ^ bytes[i].to_ascii_lowercase() as u32).wrapping_mul(FNV_PRIME);
        i += 1;
    }
    h
}

macro_rules! hashed_vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $ty:ident { $($name:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u32)]
        $vis enum $ty {
            $(
                #[doc = concat!("`", stringify!($name), "`")]
                $name = hash_i(stringify!($name)),
            )+
        }

        impl $ty {
            /// Every member, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$name),+];

            /// The member's wire value.
            pub const fn hash(self) -> u32 {
                self as u32
            }

            /// Canonical (case-preserved) spelling.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)+
                }
            }

            /// Looks a member up by its wire value.
            pub fn from_hash(hash: u32) -> Option<Self> {
                Self::ALL.iter().copied().find(|m| m.hash() == hash)
            }

            /// Looks a member up by spelling, ignoring ASCII case.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::from_hash(hash_i(name))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl LeEncode for $ty {
            const SIZE: usize = 4;

            fn write_le(&self, out: &mut Vec<u8>) {
                self.hash().write_le(out);
            }
        }
    };
}

hashed_vocabulary! {
    /// The LDraw keyword vocabulary: object types and attribute names.
    ///
    /// Text emitters write a member as `*` followed by [`Keyword::name`];
    /// binary emitters write [`Keyword::hash`] as a little-endian `u32`.
    pub enum Keyword {
        // Objects
        Point,
        Line,
        LineD,
        LineStrip,
        LineBox,
        Grid,
        Spline,
        Arrow,
        Circle,
        Rect,
        Polygon,
        Pie,
        Triangle,
        Quad,
        Plane,
        Ribbon,
        Box,
        BoxList,
        FrustumWH,
        FrustumFA,
        Sphere,
        Cylinder,
        Cone,
        Tube,
        Mesh,
        ConvexHull,
        Model,
        Chart,
        Equation,
        DirLight,
        PointLight,
        SpotLight,
        Group,
        Instance,
        Text,
        Commands,
        // Attributes
        Name,
        Colour,
        Data,
        O2W,
        Pos,
        M3x3,
        M4x4,
        Scale,
        Euler,
        Quat,
        Txfm,
        AxisId,
        Solid,
        Wireframe,
        Depth,
        PerItemColour,
        Style,
        Size,
        Width,
        Hidden,
        Alpha,
        Font,
    }
}

hashed_vocabulary! {
    /// Identifiers of the imperative commands carried in a `Commands` object.
    pub enum CommandId {
        AddToScene,
        ObjectToWorld,
        CameraToWorld,
        CameraPosition,
        Render,
    }
}
