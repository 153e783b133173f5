// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Compact text form.
//!
//! Tokens are joined with a single space unless the previous character is
//! whitespace or `{`, or the new token starts with `}`. Keywords are written
//! as `*Name`, colours as `AARRGGBB`, floats with Rust's shortest round-trip
//! formatting.

use core::fmt::{self, Write as _};

use ldraw_core::{Colour, CommandId, Keyword, LeEncode};

use super::Sink;
use crate::value::ScriptString;

/// Sink producing the text form.
#[derive(Debug, Default, Clone)]
pub struct TextSink {
    out: String,
}

impl TextSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the sink and returns the text.
    pub fn into_string(self) -> String {
        self.out
    }

    /// Text written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    fn separate(&mut self, first: char) {
        if first == '}' {
            return;
        }
        match self.out.chars().next_back() {
            None => {}
            Some(prev) if prev.is_whitespace() || prev == '{' => {}
            Some(_) => self.out.push(' '),
        }
    }

    fn token(&mut self, token: &str) {
        if let Some(first) = token.chars().next() {
            self.separate(first);
            self.out.push_str(token);
        }
    }

    fn keyword_token(&mut self, name: &str) {
        self.separate('*');
        self.out.push('*');
        self.out.push_str(name);
    }

    fn display_token(&mut self, value: &dyn fmt::Display) {
        // Values never start with `}`; any non-brace first char spaces the same.
        self.separate('0');
        // Writing into a String cannot fail.
        let _ = write!(self.out, "{value}");
    }

    fn quoted(&mut self, s: &str) {
        self.separate('"');
        self.out.push('"');
        for c in s.chars() {
            if matches!(c, '"' | '\\') {
                self.out.push('\\');
            }
            self.out.push(c);
        }
        self.out.push('"');
    }

    fn name_token(&mut self, name: &str) {
        if is_bare_name(name) {
            self.token(name);
        } else {
            self.quoted(name);
        }
    }
}

/// Names made only of ASCII alphanumerics, `_`, `-` and `.` are written bare,
/// unless they would read back as a colour token.
fn is_bare_name(name: &str) -> bool {
    !name.is_empty()
        && !looks_like_colour(name)
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}

/// Eight hex digits, the shape of a header colour.
fn looks_like_colour(token: &str) -> bool {
    token.len() == 8 && token.bytes().all(|b| b.is_ascii_hexdigit())
}

impl Sink for TextSink {
    type Mark = ();

    fn open_chunk(&mut self, keyword: Keyword) {
        self.keyword_token(keyword.name());
        self.token("{");
    }

    fn open_object(&mut self, keyword: Keyword, name: &str, colour: Colour) {
        self.keyword_token(keyword.name());
        if !name.is_empty() {
            self.name_token(name);
        }
        if colour != Colour::WHITE {
            self.display_token(&colour);
        }
        self.token("{");
    }

    fn close_chunk(&mut self, (): ()) {
        self.token("}");
    }

    fn put<V: LeEncode + fmt::Display>(&mut self, value: &V) {
        self.display_token(value);
    }

    fn put_command(&mut self, id: CommandId) {
        self.keyword_token(id.name());
    }

    fn put_keyword(&mut self, keyword: Keyword) {
        self.keyword_token(keyword.name());
    }

    fn put_symbol(&mut self, name: &str, _value: u32) {
        self.token(name);
    }

    fn put_str(&mut self, s: &ScriptString) {
        self.quoted(s.as_str());
    }

    fn put_raw_str(&mut self, s: &str) {
        self.name_token(s);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ldraw_core::Vec3;

    #[test]
    fn empty_chunk_closes_tight() {
        let mut sink = TextSink::new();
        sink.chunk(Keyword::Wireframe).close();
        assert_eq!(sink.into_string(), "*Wireframe {}");
    }

    #[test]
    fn nested_chunks_follow_spacing_rule() {
        let mut sink = TextSink::new();
        {
            let mut o2w = sink.chunk(Keyword::O2W);
            let mut pos = o2w.chunk(Keyword::Pos);
            pos.put(&Vec3::new(1.0, 2.0, 3.0));
        }
        sink.chunk(Keyword::Solid).close();
        assert_eq!(sink.into_string(), "*O2W {*Pos {1 2 3}} *Solid {}");
    }

    #[test]
    fn object_header_elides_defaults() {
        let mut sink = TextSink::new();
        sink.object(Keyword::Group, "", Colour::WHITE).close();
        sink.object(Keyword::Group, "G", Colour(0xFF00_00FF)).close();
        sink.object(Keyword::Box, "two words", Colour::WHITE).close();
        assert_eq!(
            sink.into_string(),
            r#"*Group {} *Group G FF0000FF {} *Box "two words" {}"#
        );
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        let mut sink = TextSink::new();
        sink.put_str(&ScriptString::new(r#"a "b" \c"#).unwrap());
        assert_eq!(sink.as_str(), r#""a \"b\" \\c""#);
    }

    #[test]
    fn bare_names() {
        assert!(is_bare_name("obj_1.a-b"));
        assert!(!is_bare_name(""));
        assert!(!is_bare_name("a b"));
        assert!(!is_bare_name("a{"));
    }

    #[test]
    fn colour_shaped_names_are_quoted() {
        assert!(!is_bare_name("FF0000FF"));
        assert!(!is_bare_name("deadbeef"));
        assert!(is_bare_name("FF0000F"));
        assert!(is_bare_name("FF0000FG"));
        assert!(is_bare_name("FF0000FF0"));

        let mut sink = TextSink::new();
        sink.object(Keyword::Group, "FF0000FF", Colour(0xFF00_00FF)).close();
        assert_eq!(sink.into_string(), r#"*Group "FF0000FF" FF0000FF {}"#);
    }
}
