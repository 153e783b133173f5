// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Attribute fragments.
//!
//! A fragment is a small keyword-tagged chunk that knows its default value.
//! [`Fragment::emit`] writes nothing at all when the fragment is at its
//! default, which is how the tree walk keeps default attributes out of both
//! output forms.

use ldraw_core::{Colour, Keyword, Mat4};

use crate::sink::Sink;

/// A keyword-tagged attribute chunk.
pub trait Fragment {
    /// Chunk keyword.
    const KEYWORD: Keyword;

    /// Whether the value is the default and so emits nothing.
    fn is_default(&self) -> bool;

    /// Writes the chunk payload.
    fn write_body<S: Sink>(&self, sink: &mut S);

    /// Writes the whole chunk unless the value is at its default.
    fn emit<S: Sink>(&self, sink: &mut S) {
        if self.is_default() {
            return;
        }
        let mut chunk = sink.chunk(Self::KEYWORD);
        self.write_body(&mut *chunk);
    }
}

/// Object name. Written raw; the chunk size carries its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name<'a>(pub &'a str);

impl Fragment for Name<'_> {
    const KEYWORD: Keyword = Keyword::Name;

    fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    fn write_body<S: Sink>(&self, sink: &mut S) {
        sink.put_raw_str(self.0);
    }
}

impl Fragment for Colour {
    const KEYWORD: Keyword = Keyword::Colour;

    fn is_default(&self) -> bool {
        *self == Self::WHITE
    }

    fn write_body<S: Sink>(&self, sink: &mut S) {
        sink.put(self);
    }
}

macro_rules! float_fragment {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Default)]
            pub struct $name(pub f32);

            impl Fragment for $name {
                const KEYWORD: Keyword = Keyword::$name;

                #[allow(clippy::float_cmp)]
                fn is_default(&self) -> bool {
                    self.0 == 0.0
                }

                fn write_body<S: Sink>(&self, sink: &mut S) {
                    sink.put(&self.0);
                }
            }
        )+
    };
}

float_fragment! {
    /// Point size in pixels; zero means the renderer's default.
    Size,
    /// Line width in pixels; zero means the renderer's default.
    Width,
}

macro_rules! flag_fragment {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $name(pub bool);

            impl Fragment for $name {
                const KEYWORD: Keyword = Keyword::$name;

                fn is_default(&self) -> bool {
                    !self.0
                }

                fn write_body<S: Sink>(&self, _sink: &mut S) {}
            }
        )+
    };
}

flag_fragment! {
    /// Draw as wireframe.
    Wireframe,
    /// Draw solid (closed polygons, filled shapes).
    Solid,
    /// Depth-test points against the scene.
    Depth,
    /// Vertices in the `Data` chunk are each followed by a colour.
    PerItemColour,
}

/// Axis an object is oriented along: ±1 = X, ±2 = Y, ±3 = Z, 0 = unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AxisId(pub i32);

impl AxisId {
    /// Unset.
    pub const NONE: Self = Self(0);
    /// +X.
    pub const POS_X: Self = Self(1);
    /// +Y.
    pub const POS_Y: Self = Self(2);
    /// +Z.
    pub const POS_Z: Self = Self(3);
    /// −X.
    pub const NEG_X: Self = Self(-1);
    /// −Y.
    pub const NEG_Y: Self = Self(-2);
    /// −Z.
    pub const NEG_Z: Self = Self(-3);
}

impl Fragment for AxisId {
    const KEYWORD: Keyword = Keyword::AxisId;

    fn is_default(&self) -> bool {
        self.0 == 0
    }

    fn write_body<S: Sink>(&self, sink: &mut S) {
        sink.put(&self.0);
    }
}

/// Object-to-world transform.
///
/// Identity emits nothing. A pure translation is compressed to a `Pos` child
/// holding the position; anything else is written in full as an `M4x4` child.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct O2W(pub Mat4);

impl Fragment for O2W {
    const KEYWORD: Keyword = Keyword::O2W;

    fn is_default(&self) -> bool {
        self.0.is_identity()
    }

    fn write_body<S: Sink>(&self, sink: &mut S) {
        if self.0.is_translation() {
            sink.chunk(Keyword::Pos).put(&self.0.pos());
        } else {
            sink.chunk(Keyword::M4x4).put(&self.0);
        }
    }
}

/// Marker shape for `Point` objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum PointStyle {
    /// Filled square.
    #[default]
    Square = 0,
    /// Filled circle.
    Circle = 1,
    /// Filled triangle.
    Triangle = 2,
    /// Five-pointed star.
    Star = 3,
    /// Ring.
    Annulus = 4,
}

impl PointStyle {
    /// Every style, in wire order.
    pub const ALL: [Self; 5] = [
        Self::Square,
        Self::Circle,
        Self::Triangle,
        Self::Star,
        Self::Annulus,
    ];

    /// Text spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::Circle => "Circle",
            Self::Triangle => "Triangle",
            Self::Star => "Star",
            Self::Annulus => "Annulus",
        }
    }

    /// Binary value.
    pub const fn value(self) -> u32 {
        self as u32
    }
}

/// Points always say which style they use, so the style is never elided.
impl Fragment for PointStyle {
    const KEYWORD: Keyword = Keyword::Style;

    fn is_default(&self) -> bool {
        false
    }

    fn write_body<S: Sink>(&self, sink: &mut S) {
        sink.put_symbol(self.name(), self.value());
    }
}
