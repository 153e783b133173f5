// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command records carried by `Commands` objects.

use ldraw_core::CommandId;

use crate::error::{ConstructionError, Result};
use crate::sink::Sink;
use crate::value::{Value, ValueKind};

/// Argument kinds each command accepts, in order.
pub const fn signature(id: CommandId) -> &'static [ValueKind] {
    match id {
        CommandId::AddToScene | CommandId::Render => &[ValueKind::I32],
        CommandId::ObjectToWorld => &[ValueKind::Str, ValueKind::Mat4],
        CommandId::CameraToWorld => &[ValueKind::Mat4],
        CommandId::CameraPosition => &[ValueKind::Vec3],
    }
}

/// One validated command: an id and arguments matching its [`signature`].
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    id: CommandId,
    args: Vec<Value>,
}

impl Command {
    /// Checks `args` against the signature of `id`.
    ///
    /// Fails with [`ConstructionError::UnsupportedCommandPayload`] naming the
    /// first argument that is missing, surplus, or of the wrong kind.
    pub fn new(id: CommandId, args: Vec<Value>) -> Result<Self> {
        let expected = signature(id);
        let arity = expected.len().max(args.len());
        for position in 0..arity {
            let want = expected.get(position).copied();
            let got = args.get(position).map(Value::kind);
            if want != got {
                return Err(ConstructionError::UnsupportedCommandPayload {
                    command: id,
                    position,
                    expected: want,
                    found: got,
                });
            }
        }
        Ok(Self { id, args })
    }

    /// For callers whose argument kinds are fixed by their own signature.
    pub(crate) fn from_parts(id: CommandId, args: Vec<Value>) -> Self {
        debug_assert!(Self::new(id, args.clone()).is_ok());
        Self { id, args }
    }

    /// Command identifier.
    pub const fn id(&self) -> CommandId {
        self.id
    }

    /// Arguments, in signature order.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Writes the id then each argument; the caller frames the record.
    pub(crate) fn emit<S: Sink>(&self, sink: &mut S) {
        sink.put_command(self.id);
        for arg in &self.args {
            arg.emit(sink);
        }
    }
}
