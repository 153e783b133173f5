// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed payload values for command records.

use core::fmt;

use ldraw_core::{Colour, Keyword, Mat3, Mat4, Varint, Vec2, Vec3, Vec4};

use crate::error::{ConstructionError, Result};
use crate::sink::Sink;

/// A string written with a varint byte-length prefix.
///
/// The prefix is computed on construction, so a `ScriptString` always fits the
/// wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptString {
    text: String,
    prefix: Varint,
}

impl ScriptString {
    /// Wraps `text`, failing with [`ConstructionError::StringTooLong`] when its
    /// UTF-8 length exceeds [`ldraw_core::VARINT_MAX`].
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let prefix = check_len(text.len())?;
        Ok(Self { text, prefix })
    }

    /// The string contents.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The encoded byte-length prefix.
    pub fn prefix(&self) -> &Varint {
        &self.prefix
    }
}

/// Encodes a string byte length as its varint prefix.
pub(crate) fn check_len(len: usize) -> Result<Varint> {
    Varint::encode_len(len).map_err(|_| ConstructionError::string_too_long(len))
}

impl fmt::Display for ScriptString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Discriminant of [`Value`], used in command signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// 32-bit float.
    F32,
    /// Two floats.
    Vec2,
    /// Three floats.
    Vec3,
    /// Four floats.
    Vec4,
    /// Nine floats, column order.
    Mat3,
    /// Sixteen floats, column order.
    Mat4,
    /// Packed ARGB.
    Colour,
    /// Keyword hash.
    Keyword,
    /// Varint-prefixed UTF-8 string.
    Str,
}

/// A single command argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed 32-bit integer.
    I32(i32),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// 32-bit float.
    F32(f32),
    /// Two-component vector.
    Vec2(Vec2),
    /// Three-component vector.
    Vec3(Vec3),
    /// Four-component vector.
    Vec4(Vec4),
    /// 3×3 matrix.
    Mat3(Mat3),
    /// 4×4 matrix.
    Mat4(Mat4),
    /// ARGB colour.
    Colour(Colour),
    /// Keyword, written as its hash.
    Keyword(Keyword),
    /// Length-prefixed string.
    Str(ScriptString),
}

impl Value {
    /// Builds a [`Value::Str`], checking the length limit.
    pub fn str(text: impl Into<String>) -> Result<Self> {
        ScriptString::new(text).map(Self::Str)
    }

    /// Kind of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::I32(_) => ValueKind::I32,
            Self::U32(_) => ValueKind::U32,
            Self::F32(_) => ValueKind::F32,
            Self::Vec2(_) => ValueKind::Vec2,
            Self::Vec3(_) => ValueKind::Vec3,
            Self::Vec4(_) => ValueKind::Vec4,
            Self::Mat3(_) => ValueKind::Mat3,
            Self::Mat4(_) => ValueKind::Mat4,
            Self::Colour(_) => ValueKind::Colour,
            Self::Keyword(_) => ValueKind::Keyword,
            Self::Str(_) => ValueKind::Str,
        }
    }

    pub(crate) fn emit<S: Sink>(&self, sink: &mut S) {
        match self {
            Self::I32(v) => sink.put(v),
            Self::U32(v) => sink.put(v),
            Self::F32(v) => sink.put(v),
            Self::Vec2(v) => sink.put(v),
            Self::Vec3(v) => sink.put(v),
            Self::Vec4(v) => sink.put(v),
            Self::Mat3(v) => sink.put(v),
            Self::Mat4(v) => sink.put(v),
            Self::Colour(v) => sink.put(v),
            Self::Keyword(k) => sink.put_keyword(*k),
            Self::Str(s) => sink.put_str(s),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )+
    };
}

value_from! {
    i32 => I32,
    u32 => U32,
    f32 => F32,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Mat3 => Mat3,
    Mat4 => Mat4,
    Colour => Colour,
    Keyword => Keyword,
    ScriptString => Str,
}
