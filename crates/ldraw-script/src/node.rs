// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene nodes.
//!
//! Nodes live in the [`crate::Builder`] arena and refer to their children by
//! [`NodeId`]. A node is the common attribute bundle plus a [`Shape`] holding
//! the type-specific payload.

use core::fmt;

use ldraw_core::{Colour, Keyword, LeEncode, Mat4, Vec2, Vec3};

use crate::attr::{AxisId, PointStyle};
use crate::command::Command;
use crate::error::{ConstructionError, Result};

/// Stable index of a node in its builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena index; nodes are numbered in creation order.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Attributes every object carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Common {
    /// Object name; empty is elided.
    pub name: String,
    /// Object colour; white is elided.
    pub colour: Colour,
    /// Object-to-world transform; identity is elided.
    pub o2w: Mat4,
    /// Orientation axis; zero is elided.
    pub axis_id: AxisId,
    /// Wireframe flag.
    pub wireframe: bool,
    /// Solid flag.
    pub solid: bool,
}

impl Common {
    pub(crate) fn new(name: String, colour: Colour) -> Self {
        Self {
            name,
            colour,
            ..Self::default()
        }
    }
}

impl Default for Common {
    fn default() -> Self {
        Self {
            name: String::new(),
            colour: Colour::WHITE,
            o2w: Mat4::IDENTITY,
            axis_id: AxisId::NONE,
            wireframe: false,
            solid: false,
        }
    }
}

/// Vertices with optional per-vertex colours.
///
/// Either every vertex has a colour or none does; the push methods refuse any
/// call that would mix the two.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexList<T> {
    verts: Vec<T>,
    colours: Vec<Colour>,
}

impl<T> Default for VertexList<T> {
    fn default() -> Self {
        Self {
            verts: Vec::new(),
            colours: Vec::new(),
        }
    }
}

impl<T> VertexList<T> {
    /// Vertices in insertion order.
    pub fn verts(&self) -> &[T] {
        &self.verts
    }

    /// Per-vertex colours; empty unless [`Self::per_item_colour`].
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// `true` with no vertices.
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Whether vertices carry colours.
    pub fn per_item_colour(&self) -> bool {
        !self.colours.is_empty()
    }

    /// Appends an uncoloured vertex.
    pub fn push(&mut self, vert: T) -> Result<()> {
        if self.per_item_colour() {
            return Err(self.mismatch(0));
        }
        self.verts.push(vert);
        Ok(())
    }

    /// Appends a coloured vertex.
    pub fn push_col(&mut self, vert: T, colour: Colour) -> Result<()> {
        if self.colours.len() != self.verts.len() {
            return Err(self.mismatch(1));
        }
        self.verts.push(vert);
        self.colours.push(colour);
        Ok(())
    }

    fn mismatch(&self, colours_added: usize) -> ConstructionError {
        ConstructionError::PerItemColourSizeMismatch {
            vertices: self.verts.len() + 1,
            colours: self.colours.len() + colours_added,
        }
    }
}

/// A line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point.
    pub a: Vec3,
    /// End point.
    pub b: Vec3,
}

impl Segment {
    /// Segment from `a` to `b`.
    pub const fn new(a: Vec3, b: Vec3) -> Self {
        Self { a, b }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.a, self.b)
    }
}

impl LeEncode for Segment {
    const SIZE: usize = 2 * Vec3::SIZE;

    fn write_le(&self, out: &mut Vec<u8>) {
        self.a.write_le(out);
        self.b.write_le(out);
    }
}

/// Payload of a `Point` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointData {
    /// Point positions.
    pub verts: VertexList<Vec3>,
    /// Marker shape.
    pub style: PointStyle,
    /// Marker size; zero is elided.
    pub size: f32,
    /// Depth-test flag.
    pub depth: bool,
}

/// Payload of a `Line` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineData {
    /// Segments.
    pub segments: VertexList<Segment>,
    /// Line width; zero is elided.
    pub width: f32,
}

/// Payload of a `Box` object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxData {
    /// Full width, height and depth.
    pub dim: Vec3,
}

impl Default for BoxData {
    fn default() -> Self {
        Self { dim: Vec3::ONE }
    }
}

/// Payload of a `Sphere` object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereData {
    /// Radius along each axis.
    pub radii: Vec3,
}

impl Default for SphereData {
    fn default() -> Self {
        Self { radii: Vec3::ONE }
    }
}

/// Payload of a `Polygon` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonData {
    /// Outline in the object's XY plane.
    pub verts: VertexList<Vec2>,
}

/// Payload of a `Commands` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandsData {
    /// Commands in execution order.
    pub commands: Vec<Command>,
}

/// Type-specific part of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Container with no payload.
    Group,
    /// Point cloud.
    Point(PointData),
    /// Line segments.
    Line(LineData),
    /// Axis-aligned box.
    Box(BoxData),
    /// Ellipsoid.
    Sphere(SphereData),
    /// Flat polygon.
    Polygon(PolygonData),
    /// Renderer commands.
    Commands(CommandsData),
}

impl Shape {
    /// Keyword of the object chunk.
    pub const fn keyword(&self) -> Keyword {
        match self {
            Self::Group => Keyword::Group,
            Self::Point(_) => Keyword::Point,
            Self::Line(_) => Keyword::Line,
            Self::Box(_) => Keyword::Box,
            Self::Sphere(_) => Keyword::Sphere,
            Self::Polygon(_) => Keyword::Polygon,
            Self::Commands(_) => Keyword::Commands,
        }
    }
}

/// A scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) common: Common,
    pub(crate) shape: Shape,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) const fn new(common: Common, shape: Shape) -> Self {
        Self {
            common,
            shape,
            children: Vec::new(),
        }
    }

    /// Common attributes.
    pub const fn common(&self) -> &Common {
        &self.common
    }

    /// Type-specific payload.
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Keyword of the object chunk.
    pub const fn keyword(&self) -> Keyword {
        self.shape.keyword()
    }
}
