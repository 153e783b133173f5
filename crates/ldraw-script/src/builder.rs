// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene builder and fluent node handles.
//!
//! The [`Builder`] owns every node in an arena. Factory methods on a
//! [`Scope`] (the builder itself or any handle) append a child and return a
//! handle borrowing the builder; configurators on the handle return
//! `&mut Self` so calls chain.
//!
//! ```
//! use ldraw_core::{Colour, Vec3};
//! use ldraw_script::{Builder, Object, Scope};
//!
//! let mut b = Builder::new();
//! b.r#box("", Colour::WHITE)
//!     .dim(2.0_f32)
//!     .pos(Vec3::new(5.0, 0.0, 0.0));
//! assert_eq!(b.to_string(), "*Box {*Data {2 2 2} *O2W {*Pos {5 0 0}}}");
//! ```

use core::fmt;

use ldraw_core::{BBox, Colour, CommandId, Keyword, Mat4, Vec2, Vec3};
use tracing::{debug, instrument};

use crate::attr::{AxisId, PointStyle};
use crate::command::Command;
use crate::config::ScriptConfig;
use crate::emit;
use crate::error::Result;
use crate::format::format_script;
use crate::node::{
    BoxData, Common, CommandsData, LineData, Node, NodeId, PointData, PolygonData, Segment, Shape,
    SphereData,
};
use crate::sink::{BinarySink, TextSink};
use crate::value::{ScriptString, Value};

/// Root of a scene: an ordered forest of objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Builder {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Builder {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes at every depth.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level objects in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Looks a node up.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Returns a handle to an existing node, e.g. to add siblings of its
    /// children after configuring them.
    pub fn open(&mut self, id: NodeId) -> Option<AnyHandle<'_>> {
        if id.0 < self.nodes.len() {
            Some(AnyHandle { builder: self, id })
        } else {
            None
        }
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
    }

    /// Binary form with default settings.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_with(&ScriptConfig::default())
    }

    /// Binary form.
    #[instrument(level = "debug", skip_all, fields(nodes = self.nodes.len()))]
    pub fn to_bytes_with(&self, config: &ScriptConfig) -> Vec<u8> {
        let mut sink = BinarySink::with_capacity(config.byte_capacity);
        emit::write_scene(self, &mut sink);
        let bytes = sink.into_bytes();
        debug!(len = bytes.len(), "emitted binary script");
        bytes
    }

    /// Text form, compact or pretty per `config`.
    #[instrument(level = "debug", skip_all, fields(nodes = self.nodes.len(), pretty = config.pretty))]
    pub fn to_text_with(&self, config: &ScriptConfig) -> String {
        let mut sink = TextSink::new();
        emit::write_scene(self, &mut sink);
        let compact = sink.into_string();
        let text = if config.pretty {
            format_script(&compact, &config.indent)
        } else {
            compact
        };
        debug!(len = text.len(), "emitted text script");
        text
    }

    fn insert(&mut self, parent: Option<NodeId>, common: Common, shape: Shape) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(common, shape));
        match parent.and_then(|p| self.nodes.get_mut(p.0)) {
            Some(p) => p.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

/// Compact text form.
impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sink = TextSink::new();
        emit::write_scene(self, &mut sink);
        f.write_str(sink.as_str())
    }
}

/// Anything that can hold child objects.
pub trait Scope {
    /// The builder plus the node new children attach to (`None` for roots).
    #[doc(hidden)]
    fn scope(&mut self) -> (&mut Builder, Option<NodeId>);

    /// Adds a `Group`.
    fn group(&mut self, name: impl Into<String>, colour: impl Into<Colour>) -> GroupHandle<'_> {
        let (builder, parent) = self.scope();
        let id = builder.insert(parent, Common::new(name.into(), colour.into()), Shape::Group);
        GroupHandle { builder, id }
    }

    /// Adds a `Point` cloud.
    fn points(&mut self, name: impl Into<String>, colour: impl Into<Colour>) -> PointHandle<'_> {
        let (builder, parent) = self.scope();
        let common = Common::new(name.into(), colour.into());
        let id = builder.insert(parent, common, Shape::Point(PointData::default()));
        PointHandle { builder, id }
    }

    /// Adds a `Line` object.
    fn lines(&mut self, name: impl Into<String>, colour: impl Into<Colour>) -> LineHandle<'_> {
        let (builder, parent) = self.scope();
        let common = Common::new(name.into(), colour.into());
        let id = builder.insert(parent, common, Shape::Line(LineData::default()));
        LineHandle { builder, id }
    }

    /// Adds a `Box` of unit size.
    fn r#box(&mut self, name: impl Into<String>, colour: impl Into<Colour>) -> BoxHandle<'_> {
        let (builder, parent) = self.scope();
        let common = Common::new(name.into(), colour.into());
        let id = builder.insert(parent, common, Shape::Box(BoxData::default()));
        BoxHandle { builder, id }
    }

    /// Adds a unit `Sphere`.
    fn sphere(&mut self, name: impl Into<String>, colour: impl Into<Colour>) -> SphereHandle<'_> {
        let (builder, parent) = self.scope();
        let common = Common::new(name.into(), colour.into());
        let id = builder.insert(parent, common, Shape::Sphere(SphereData::default()));
        SphereHandle { builder, id }
    }

    /// Adds a `Polygon`.
    fn polygon(&mut self, name: impl Into<String>, colour: impl Into<Colour>) -> PolygonHandle<'_> {
        let (builder, parent) = self.scope();
        let common = Common::new(name.into(), colour.into());
        let id = builder.insert(parent, common, Shape::Polygon(PolygonData::default()));
        PolygonHandle { builder, id }
    }

    /// Adds an unnamed `Commands` object.
    fn command(&mut self) -> CommandsHandle<'_> {
        let (builder, parent) = self.scope();
        let shape = Shape::Commands(CommandsData::default());
        let id = builder.insert(parent, Common::default(), shape);
        CommandsHandle { builder, id }
    }
}

impl Scope for Builder {
    fn scope(&mut self) -> (&mut Builder, Option<NodeId>) {
        (self, None)
    }
}

/// Configurators shared by every object.
pub trait Object {
    /// The node this handle edits.
    fn id(&self) -> NodeId;

    /// The owning builder.
    #[doc(hidden)]
    fn builder_mut(&mut self) -> &mut Builder;

    /// Common attributes of the node.
    fn common_mut(&mut self) -> &mut Common {
        let id = self.id();
        &mut self.builder_mut().node_mut(id).common
    }

    /// Sets the name.
    fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.common_mut().name = name.into();
        self
    }

    /// Sets the colour.
    fn col(&mut self, colour: impl Into<Colour>) -> &mut Self {
        self.common_mut().colour = colour.into();
        self
    }

    /// Sets the translation, keeping rotation and scale.
    fn pos(&mut self, pos: Vec3) -> &mut Self {
        let common = self.common_mut();
        common.o2w = common.o2w.with_pos(pos);
        self
    }

    /// Replaces the object-to-world transform.
    fn o2w(&mut self, o2w: Mat4) -> &mut Self {
        self.common_mut().o2w = o2w;
        self
    }

    /// Scales the object's axes, keeping its translation.
    fn scale(&mut self, scale: Vec3) -> &mut Self {
        let common = self.common_mut();
        common.o2w = common.o2w.scaled(scale);
        self
    }

    /// Sets the orientation axis.
    fn axis_id(&mut self, axis: AxisId) -> &mut Self {
        self.common_mut().axis_id = axis;
        self
    }

    /// Sets the wireframe flag.
    fn wireframe(&mut self, on: bool) -> &mut Self {
        self.common_mut().wireframe = on;
        self
    }

    /// Sets the solid flag.
    fn solid(&mut self, on: bool) -> &mut Self {
        self.common_mut().solid = on;
        self
    }
}

macro_rules! handles {
    ($($(#[$doc:meta])* $handle:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug)]
            pub struct $handle<'a> {
                builder: &'a mut Builder,
                id: NodeId,
            }

            impl Object for $handle<'_> {
                fn id(&self) -> NodeId {
                    self.id
                }

                fn builder_mut(&mut self) -> &mut Builder {
                    &mut *self.builder
                }
            }

            impl Scope for $handle<'_> {
                fn scope(&mut self) -> (&mut Builder, Option<NodeId>) {
                    (&mut *self.builder, Some(self.id))
                }
            }
        )+
    };
}

handles! {
    /// Handle to a `Group`.
    GroupHandle,
    /// Handle to a `Point` cloud.
    PointHandle,
    /// Handle to a `Line` object.
    LineHandle,
    /// Handle to a `Box`.
    BoxHandle,
    /// Handle to a `Sphere`.
    SphereHandle,
    /// Handle to a `Polygon`.
    PolygonHandle,
    /// Handle to a `Commands` object.
    CommandsHandle,
    /// Handle to a node of any type, from [`Builder::open`].
    AnyHandle,
}

/// Payload access and [`AnyHandle`] narrowing for a typed handle.
macro_rules! shape_access {
    ($handle:ident, $variant:ident, $data:ty, $narrow:ident) => {
        impl $handle<'_> {
            /// Runs `f` on the node's payload. Typed handles are only created
            /// for nodes of their own shape, so `None` never reaches a caller.
            fn edit<R>(&mut self, f: impl FnOnce(&mut $data) -> R) -> Option<R> {
                match &mut self.builder.node_mut(self.id).shape {
                    Shape::$variant(data) => Some(f(data)),
                    _ => None,
                }
            }
        }

        impl<'a> AnyHandle<'a> {
            #[doc = concat!("Narrows to a [`", stringify!($handle), "`] if the node is a `", stringify!($variant), "`.")]
            pub fn $narrow(self) -> Option<$handle<'a>> {
                self.narrow(|s| matches!(s, Shape::$variant(_)))
                    .map(|(builder, id)| $handle { builder, id })
            }
        }
    };
}

shape_access!(PointHandle, Point, PointData, into_points);
shape_access!(LineHandle, Line, LineData, into_lines);
shape_access!(BoxHandle, Box, BoxData, into_box);
shape_access!(SphereHandle, Sphere, SphereData, into_sphere);
shape_access!(PolygonHandle, Polygon, PolygonData, into_polygon);
shape_access!(CommandsHandle, Commands, CommandsData, into_commands);

impl<'a> AnyHandle<'a> {
    /// Keyword of the node's chunk.
    pub fn keyword(&self) -> Keyword {
        self.builder.nodes[self.id.0].keyword()
    }

    /// Narrows to a [`GroupHandle`] if the node is a `Group`.
    pub fn into_group(self) -> Option<GroupHandle<'a>> {
        self.narrow(|s| matches!(s, Shape::Group))
            .map(|(builder, id)| GroupHandle { builder, id })
    }

    fn narrow(self, is: impl FnOnce(&Shape) -> bool) -> Option<(&'a mut Builder, NodeId)> {
        if is(&self.builder.nodes[self.id.0].shape) {
            Some((self.builder, self.id))
        } else {
            None
        }
    }
}

/// Anything usable as a full extent: a [`Vec3`], a `[f32; 3]`, or a scalar
/// applied to all three axes.
pub trait Extent {
    /// The extent per axis.
    fn to_vec3(self) -> Vec3;
}

impl Extent for Vec3 {
    fn to_vec3(self) -> Vec3 {
        self
    }
}

impl Extent for [f32; 3] {
    fn to_vec3(self) -> Vec3 {
        Vec3::from(self)
    }
}

impl Extent for f32 {
    fn to_vec3(self) -> Vec3 {
        Vec3::splat(self)
    }
}

impl PointHandle<'_> {
    /// Appends an uncoloured point.
    pub fn pt(&mut self, p: Vec3) -> Result<&mut Self> {
        self.edit(|d| d.verts.push(p)).transpose()?;
        Ok(self)
    }

    /// Appends a coloured point.
    pub fn pt_col(&mut self, p: Vec3, colour: impl Into<Colour>) -> Result<&mut Self> {
        self.edit(|d| d.verts.push_col(p, colour.into())).transpose()?;
        Ok(self)
    }

    /// Appends uncoloured points, stopping at the first refusal.
    pub fn pts(&mut self, pts: impl IntoIterator<Item = Vec3>) -> Result<&mut Self> {
        for p in pts {
            self.edit(|d| d.verts.push(p)).transpose()?;
        }
        Ok(self)
    }

    /// Sets the marker shape.
    pub fn style(&mut self, style: PointStyle) -> &mut Self {
        self.edit(|d| d.style = style);
        self
    }

    /// Sets the marker size.
    pub fn size(&mut self, size: f32) -> &mut Self {
        self.edit(|d| d.size = size);
        self
    }

    /// Sets the depth-test flag.
    pub fn depth(&mut self, on: bool) -> &mut Self {
        self.edit(|d| d.depth = on);
        self
    }
}

impl LineHandle<'_> {
    /// Appends an uncoloured segment.
    pub fn line(&mut self, a: Vec3, b: Vec3) -> Result<&mut Self> {
        self.edit(|d| d.segments.push(Segment::new(a, b))).transpose()?;
        Ok(self)
    }

    /// Appends a coloured segment.
    pub fn line_col(&mut self, a: Vec3, b: Vec3, colour: impl Into<Colour>) -> Result<&mut Self> {
        self.edit(|d| d.segments.push_col(Segment::new(a, b), colour.into())).transpose()?;
        Ok(self)
    }

    /// Sets the line width.
    pub fn width(&mut self, width: f32) -> &mut Self {
        self.edit(|d| d.width = width);
        self
    }
}

impl BoxHandle<'_> {
    /// Sets the full dimensions.
    pub fn dim(&mut self, dim: impl Extent) -> &mut Self {
        self.edit(|d| d.dim = dim.to_vec3());
        self
    }

    /// Sets the half extents.
    pub fn radii(&mut self, radii: impl Extent) -> &mut Self {
        self.edit(|d| d.dim = radii.to_vec3().scale(2.0));
        self
    }

    /// Sizes and positions the box to `bbox`. A reset bbox changes nothing.
    pub fn bbox(&mut self, bbox: BBox) -> &mut Self {
        if bbox.is_reset() {
            return self;
        }
        self.edit(|d| d.dim = bbox.size());
        self.pos(bbox.centre)
    }
}

impl SphereHandle<'_> {
    /// Sets a uniform radius.
    pub fn radius(&mut self, radius: f32) -> &mut Self {
        self.radii(radius)
    }

    /// Sets the radius per axis.
    pub fn radii(&mut self, radii: impl Extent) -> &mut Self {
        self.edit(|d| d.radii = radii.to_vec3());
        self
    }
}

impl PolygonHandle<'_> {
    /// Appends an uncoloured vertex.
    pub fn pt(&mut self, p: Vec2) -> Result<&mut Self> {
        self.edit(|d| d.verts.push(p)).transpose()?;
        Ok(self)
    }

    /// Appends a coloured vertex.
    pub fn pt_col(&mut self, p: Vec2, colour: impl Into<Colour>) -> Result<&mut Self> {
        self.edit(|d| d.verts.push_col(p, colour.into())).transpose()?;
        Ok(self)
    }
}

impl CommandsHandle<'_> {
    /// Appends a command after checking `args` against its signature.
    pub fn push(&mut self, id: CommandId, args: Vec<Value>) -> Result<&mut Self> {
        let command = Command::new(id, args)?;
        self.edit(|d| d.commands.push(command));
        Ok(self)
    }

    /// Adds the scene with the given id to the renderer's view.
    pub fn add_to_scene(&mut self, scene_id: i32) -> &mut Self {
        self.typed(CommandId::AddToScene, vec![scene_id.into()])
    }

    /// Sets the object-to-world transform of the named object.
    pub fn transform_object(&mut self, name: impl Into<String>, o2w: Mat4) -> Result<&mut Self> {
        let name = ScriptString::new(name)?;
        Ok(self.typed(CommandId::ObjectToWorld, vec![name.into(), o2w.into()]))
    }

    /// Sets the camera-to-world transform.
    pub fn camera_to_world(&mut self, c2w: Mat4) -> &mut Self {
        self.typed(CommandId::CameraToWorld, vec![c2w.into()])
    }

    /// Moves the camera, keeping its orientation.
    pub fn camera_position(&mut self, pos: Vec3) -> &mut Self {
        self.typed(CommandId::CameraPosition, vec![pos.into()])
    }

    /// Asks the renderer to draw the scene with the given id.
    pub fn render(&mut self, scene_id: i32) -> &mut Self {
        self.typed(CommandId::Render, vec![scene_id.into()])
    }

    /// Appends a command whose arguments already match its signature.
    fn typed(&mut self, id: CommandId, args: Vec<Value>) -> &mut Self {
        self.edit(|d| d.commands.push(Command::from_parts(id, args)));
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ConstructionError;

    #[test]
    fn factories_append_in_order() {
        let mut b = Builder::new();
        let g = b.group("g", Colour::WHITE).id();
        let p = b.points("p", Colour::WHITE).id();
        assert_eq!(b.roots(), &[g, p]);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn children_attach_to_their_scope() {
        let mut b = Builder::new();
        let mut g = b.group("g", Colour::WHITE);
        let gid = g.id();
        let a = g.r#box("a", Colour::WHITE).id();
        let s = g.sphere("s", Colour::WHITE).id();
        assert_eq!(b.roots(), &[gid]);
        assert_eq!(b.node(gid).unwrap().children(), &[a, s]);
    }

    #[test]
    fn open_returns_to_a_node() {
        let mut b = Builder::new();
        let gid = b.group("g", Colour::WHITE).id();
        b.points("later", Colour::WHITE);

        let mut g = b.open(gid).unwrap();
        assert_eq!(g.keyword(), Keyword::Group);
        let child = g.polygon("child", Colour::WHITE).id();
        assert_eq!(b.node(gid).unwrap().children(), &[child]);

        assert!(b.open(gid).unwrap().into_points().is_none());
        assert!(b.open(gid).unwrap().into_group().is_some());
        assert!(b.open(NodeId(99)).is_none());
    }

    #[test]
    fn configurators_update_common() {
        let mut b = Builder::new();
        let id = b
            .r#box("", Colour::WHITE)
            .name("n")
            .col(0xFF00_00FFu32)
            .pos(Vec3::new(1.0, 2.0, 3.0))
            .axis_id(AxisId::POS_Z)
            .wireframe(true)
            .solid(true)
            .id();
        let common = b.node(id).unwrap().common();
        assert_eq!(common.name, "n");
        assert_eq!(common.colour, Colour::BLUE);
        assert_eq!(common.o2w, Mat4::translation(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(common.axis_id, AxisId::POS_Z);
        assert!(common.wireframe && common.solid);
    }

    #[test]
    fn scale_keeps_translation() {
        let mut b = Builder::new();
        let id = b
            .group("", Colour::WHITE)
            .pos(Vec3::new(4.0, 0.0, 0.0))
            .scale(Vec3::new(2.0, 3.0, 4.0))
            .id();
        let o2w = b.node(id).unwrap().common().o2w;
        assert_eq!(o2w.pos(), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(o2w.x.x, 2.0);
        assert_eq!(o2w.y.y, 3.0);
        assert_eq!(o2w.z.z, 4.0);
    }

    #[test]
    fn box_extents() {
        let mut b = Builder::new();
        let mut bx = b.r#box("", Colour::WHITE);
        bx.radii([1.0_f32, 2.0, 3.0]);
        let id = bx.id();
        let Shape::Box(data) = b.node(id).unwrap().shape() else {
            unreachable!()
        };
        assert_eq!(data.dim, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn bbox_sizes_and_places() {
        let mut b = Builder::new();
        let id = b
            .r#box("", Colour::WHITE)
            .bbox(BBox::new(Vec3::new(1.0, 1.0, 1.0), Vec3::splat(0.5)))
            .id();
        let node = b.node(id).unwrap();
        let Shape::Box(data) = node.shape() else {
            unreachable!()
        };
        assert_eq!(data.dim, Vec3::ONE);
        assert_eq!(node.common().o2w.pos(), Vec3::ONE);

        let id = b.r#box("", Colour::WHITE).bbox(BBox::RESET).id();
        let node = b.node(id).unwrap();
        assert_eq!(node.shape(), &Shape::Box(BoxData::default()));
        assert!(node.common().o2w.is_identity());
    }

    #[test]
    fn mixed_colouring_is_refused() {
        let mut b = Builder::new();
        let mut p = b.points("", Colour::WHITE);
        p.pt_col(Vec3::ZERO, Colour::RED).unwrap();
        let err = p.pt(Vec3::ONE).unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::PerItemColourSizeMismatch { .. }
        ));
    }

    #[test]
    fn generic_push_validates() {
        let mut b = Builder::new();
        let mut c = b.command();
        c.push(CommandId::Render, vec![Value::I32(1)]).unwrap();
        assert!(c.push(CommandId::Render, vec![Value::U32(1)]).is_err());
        let id = c.id();
        let Shape::Commands(data) = b.node(id).unwrap().shape() else {
            unreachable!()
        };
        assert_eq!(data.commands.len(), 1);
    }

    #[test]
    fn oversized_target_name_adds_no_command() {
        let mut b = Builder::new();
        let mut c = b.command();
        let id = c.id();
        c.add_to_scene(1);
        // Zeroed pages stay untouched, so the gigabyte costs no real memory.
        let name = String::from_utf8(vec![0u8; 1 << 30]).unwrap();
        let err = c.transform_object(name, Mat4::IDENTITY).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::StringTooLong {
                len: 1 << 30,
                max: ldraw_core::VARINT_MAX,
            }
        );
        let Shape::Commands(data) = b.node(id).unwrap().shape() else {
            unreachable!()
        };
        assert_eq!(data.commands.len(), 1);
        assert_eq!(data.commands[0].id(), CommandId::AddToScene);
    }

    #[test]
    fn reopened_handle_edits_its_own_payload() {
        let mut b = Builder::new();
        let id = b.points("p", Colour::WHITE).id();
        b.r#box("b", Colour::WHITE);
        b.open(id)
            .unwrap()
            .into_points()
            .unwrap()
            .size(2.5)
            .pt(Vec3::ONE)
            .unwrap();
        let Shape::Point(data) = b.node(id).unwrap().shape() else {
            unreachable!()
        };
        assert!((data.size - 2.5).abs() < f32::EPSILON);
        assert_eq!(data.verts.len(), 1);
    }
}
