// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pretty-printer for compact text scripts.

use core::iter::Peekable;
use core::str::CharIndices;

/// Re-lays a compact script one chunk body per indented block.
///
/// Each `{` ends its line and indents what follows; each `}` goes on its own
/// line. Empty bodies stay inline as `{}`. Quoted strings pass through
/// untouched and runs of whitespace collapse to one space. For human
/// inspection only; the compact form is what consumers read.
///
/// ```
/// use ldraw_script::format_script;
///
/// let pretty = format_script("*Box {*Data {2 2 2} *Solid {}}", "  ");
/// assert_eq!(pretty, "*Box {\n  *Data {\n    2 2 2\n  }\n  *Solid {}\n}");
/// ```
pub fn format_script(input: &str, indent: &str) -> String {
    let mut layout = Layout {
        out: String::with_capacity(input.len() * 2),
        indent,
        depth: 0,
        mid_line: false,
    };
    let mut tokens = Tokens::new(input).peekable();
    while let Some(token) = tokens.next() {
        match token {
            Token::Open if tokens.peek() == Some(&Token::Close) => {
                tokens.next();
                layout.word("{}");
                layout.mid_line = false;
            }
            Token::Open => {
                layout.word("{");
                layout.depth += 1;
                layout.mid_line = false;
            }
            Token::Close => {
                layout.depth = layout.depth.saturating_sub(1);
                layout.mid_line = false;
                layout.word("}");
                layout.mid_line = false;
            }
            Token::Text(text) => layout.word(text),
        }
    }
    layout.out
}

struct Layout<'a> {
    out: String,
    indent: &'a str,
    depth: usize,
    mid_line: bool,
}

impl Layout<'_> {
    fn word(&mut self, word: &str) {
        if self.mid_line {
            self.out.push(' ');
        } else {
            if !self.out.is_empty() {
                self.out.push('\n');
            }
            for _ in 0..self.depth {
                self.out.push_str(self.indent);
            }
        }
        self.out.push_str(word);
        self.mid_line = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Text(&'a str),
}

struct Tokens<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    /// End offset of a quoted string whose opening quote was just consumed,
    /// honouring `\` escapes. An unterminated string runs to the end of input.
    fn quoted_end(&mut self) -> usize {
        let mut escaped = false;
        for (i, c) in self.chars.by_ref() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => return i + 1,
                _ => {}
            }
        }
        self.src.len()
    }

    fn word_end(&mut self) -> usize {
        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_whitespace() || c == '{' || c == '}' {
                return i;
            }
            self.chars.next();
        }
        self.src.len()
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while let Some(&(start, c)) = self.chars.peek() {
            match c {
                _ if c.is_whitespace() => {
                    self.chars.next();
                }
                '{' => {
                    self.chars.next();
                    return Some(Token::Open);
                }
                '}' => {
                    self.chars.next();
                    return Some(Token::Close);
                }
                '"' => {
                    self.chars.next();
                    let end = self.quoted_end();
                    let src = self.src;
                    return Some(Token::Text(&src[start..end]));
                }
                _ => {
                    let end = self.word_end();
                    let src = self.src;
                    return Some(Token::Text(&src[start..end]));
                }
            }
        }
        None
    }
}
