// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Depth-first scene walk shared by both output forms.
//!
//! Inside an object chunk the order is fixed: name and colour (written by the
//! sink's object header), type-specific attributes, the `Data` chunk, then
//! `AxisId`, `Wireframe`, `Solid`, `O2W`, then children in insertion order.

use core::fmt;

use ldraw_core::{Keyword, LeEncode};

use crate::attr::{Depth, Fragment, PerItemColour, Size, Solid, Width, Wireframe, O2W};
use crate::builder::Builder;
use crate::node::{Common, Node, NodeId, Shape, VertexList};
use crate::sink::Sink;

pub(crate) fn write_scene<S: Sink>(builder: &Builder, sink: &mut S) {
    for &id in builder.roots() {
        write_node(builder, id, sink);
    }
}

fn write_node<S: Sink>(builder: &Builder, id: NodeId, sink: &mut S) {
    let Some(node) = builder.node(id) else {
        return;
    };
    let common = node.common();
    let mut chunk = sink.object(node.keyword(), &common.name, common.colour);
    write_payload(node, &mut *chunk);
    write_common(common, &mut *chunk);
    for &child in node.children() {
        write_node(builder, child, &mut *chunk);
    }
}

fn write_payload<S: Sink>(node: &Node, sink: &mut S) {
    match node.shape() {
        Shape::Group => {}
        Shape::Point(data) => {
            data.style.emit(sink);
            Size(data.size).emit(sink);
            Depth(data.depth).emit(sink);
            write_vertices(&data.verts, sink);
        }
        Shape::Line(data) => {
            Width(data.width).emit(sink);
            write_vertices(&data.segments, sink);
        }
        Shape::Box(data) => {
            sink.chunk(Keyword::Data).put(&data.dim);
        }
        Shape::Sphere(data) => {
            sink.chunk(Keyword::Data).put(&data.radii);
        }
        Shape::Polygon(data) => write_vertices(&data.verts, sink),
        Shape::Commands(data) => {
            for command in &data.commands {
                let mut record = sink.chunk(Keyword::Data);
                command.emit(&mut *record);
            }
        }
    }
}

fn write_vertices<T, S>(list: &VertexList<T>, sink: &mut S)
where
    T: LeEncode + fmt::Display,
    S: Sink,
{
    PerItemColour(list.per_item_colour()).emit(sink);
    let mut data = sink.chunk(Keyword::Data);
    if list.per_item_colour() {
        for (vert, colour) in list.verts().iter().zip(list.colours()) {
            data.put(vert);
            data.put(colour);
        }
    } else {
        for vert in list.verts() {
            data.put(vert);
        }
    }
}

fn write_common<S: Sink>(common: &Common, sink: &mut S) {
    common.axis_id.emit(sink);
    Wireframe(common.wireframe).emit(sink);
    Solid(common.solid).emit(sink);
    O2W(common.o2w).emit(sink);
}
