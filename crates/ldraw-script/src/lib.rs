// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! LDraw scene builder with text and binary emitters.
//!
//! A producer builds an ordered forest of typed objects through a [`Builder`]
//! and flushes it either as the whitespace-separated text form or as the
//! length-prefixed binary chunk form. Both forms come from one depth-first
//! walk over the same tree; only the [`sink::Sink`] differs.
//!
//! # Text and binary
//!
//! ```
//! use ldraw_core::{Colour, Keyword};
//! use ldraw_script::{Builder, Scope};
//!
//! let mut b = Builder::new();
//! b.group("G", Colour::WHITE);
//!
//! assert_eq!(b.to_string(), "*Group G {}");
//!
//! let bytes = b.to_bytes();
//! assert_eq!(&bytes[0..4], &Keyword::Group.hash().to_le_bytes());
//! assert_eq!(&bytes[4..8], &9u32.to_le_bytes());
//! ```
//!
//! # Failure
//!
//! Emission is infallible. Every check happens when the tree is built: a
//! builder call that would leave a node inconsistent returns a
//! [`ConstructionError`] and changes nothing.

#![forbid(unsafe_code)]

mod attr;
mod builder;
mod command;
mod config;
mod emit;
mod error;
mod format;
mod node;
mod value;

pub mod frame;
pub mod sink;

pub use attr::{
    AxisId, Depth, Fragment, Name, PerItemColour, PointStyle, Size, Solid, Width, Wireframe, O2W,
};
pub use builder::{
    AnyHandle, BoxHandle, Builder, CommandsHandle, Extent, GroupHandle, LineHandle, Object,
    PointHandle, PolygonHandle, Scope, SphereHandle,
};
pub use command::{signature, Command};
pub use config::{ConfigError, ScriptConfig};
pub use error::{ConstructionError, Result};
pub use format::format_script;
pub use frame::FrameError;
pub use node::{
    BoxData, CommandsData, Common, LineData, Node, NodeId, PointData, PolygonData, Segment, Shape,
    SphereData, VertexList,
};
pub use value::{ScriptString, Value, ValueKind};
