// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tokenization of formatted text.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::error::{Error, ErrorKind};

/// The non-breaking space character produced by non-breaking whitespace tokens.
pub const NBSP: char = '\u{a0}';

/// The kind of a [`LexedToken`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `\n`, `\r\n` or a lone `\r`.
    NewLine,
    /// A run of spaces and tabs. Lines may wrap after it.
    BreakingWhiteSpace,
    /// A run of `U+00A0` characters and `\ ` escapes. Lines never wrap here.
    NonBreakingWhiteSpace,
    /// A maximal run of ordinary characters.
    Word,
    /// An escaped pipe, `\|`, standing for a literal `|`.
    Pipe,
    /// An escaped backslash, `\\`, standing for a literal `\`.
    Backslash,
    /// A `|...|` command. The token's text is the text between the pipes.
    Command,
}

/// A single token of formatted text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexedToken<'a> {
    kind: TokenKind,
    span: Range<usize>,
    source: &'a str,
}

impl<'a> LexedToken<'a> {
    /// The token's kind.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The byte range of the token in the source, including command delimiters and escapes.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The source text covered by the token.
    pub fn source_text(&self) -> &'a str {
        &self.source[self.span.clone()]
    }

    /// For command tokens, the raw text between the delimiting pipes.
    pub fn command_text(&self) -> Option<&'a str> {
        (self.kind == TokenKind::Command)
            .then(|| &self.source[self.span.start + 1..self.span.end - 1])
    }

    /// Calls `f` with each glyph the token produces and the byte offset of its source.
    ///
    /// Escapes produce the character they stand for, and newline and command tokens produce
    /// nothing.
    pub fn for_each_glyph(&self, mut f: impl FnMut(char, usize)) {
        match self.kind {
            TokenKind::NewLine | TokenKind::Command => {}
            TokenKind::Pipe => f('|', self.span.start),
            TokenKind::Backslash => f('\\', self.span.start),
            TokenKind::Word | TokenKind::BreakingWhiteSpace => {
                for (i, c) in self.source_text().char_indices() {
                    f(c, self.span.start + i);
                }
            }
            TokenKind::NonBreakingWhiteSpace => {
                let mut chars = self.source_text().char_indices();
                while let Some((i, c)) = chars.next() {
                    if c == '\\' {
                        // The escaped space.
                        chars.next();
                    }
                    f(NBSP, self.span.start + i);
                }
            }
        }
    }

    /// Appends the token's glyphs to `out`.
    pub fn push_glyphs(&self, out: &mut String) {
        self.for_each_glyph(|c, _| out.push(c));
    }
}

/// An iterator over the tokens of a formatted text string.
///
/// The lexer is a pure function of its input. After the first error it yields nothing.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            done: false,
        }
    }

    fn token(&mut self, kind: TokenKind, end: usize) -> LexedToken<'a> {
        let span = self.pos..end;
        self.pos = end;
        LexedToken {
            kind,
            span,
            source: self.source,
        }
    }
}

fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t')
}

/// Returns the length of the non-breaking whitespace element at the start of `rest`, if any.
fn nbsp_len(rest: &str) -> Option<usize> {
    if rest.starts_with(NBSP) {
        Some(NBSP.len_utf8())
    } else if rest.starts_with("\\ ") {
        Some(2)
    } else {
        None
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<LexedToken<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.source.len() {
            return None;
        }
        let source = self.source;
        let bytes = source.as_bytes();
        let start = self.pos;
        let rest = &source[start..];
        let token = match bytes[start] {
            b'\r' if bytes.get(start + 1) == Some(&b'\n') => {
                self.token(TokenKind::NewLine, start + 2)
            }
            b'\r' | b'\n' => self.token(TokenKind::NewLine, start + 1),
            c if is_space(c) => {
                let len = rest.bytes().take_while(|&c| is_space(c)).count();
                self.token(TokenKind::BreakingWhiteSpace, start + len)
            }
            b'\\' if rest.starts_with("\\\\") => self.token(TokenKind::Backslash, start + 2),
            _ if nbsp_len(rest).is_some() => {
                let mut end = start;
                while let Some(len) = nbsp_len(&source[end..]) {
                    end += len;
                }
                self.token(TokenKind::NonBreakingWhiteSpace, end)
            }
            b'\\' if rest.starts_with("\\|") => self.token(TokenKind::Pipe, start + 2),
            b'|' => {
                let line_end = rest.find(['\r', '\n']).map_or(source.len(), |i| start + i);
                match source[start + 1..line_end].find('|') {
                    Some(i) => self.token(TokenKind::Command, start + 1 + i + 1),
                    None => {
                        self.done = true;
                        return Some(Err(Error::located(
                            ErrorKind::UnterminatedCommand,
                            start..line_end,
                            source,
                        )));
                    }
                }
            }
            _ => {
                let mut end = start;
                for (i, c) in rest.char_indices() {
                    let tail = &rest[i..];
                    if matches!(c, ' ' | '\t' | '\r' | '\n' | '|' | NBSP)
                        || tail.starts_with("\\\\")
                        || tail.starts_with("\\|")
                        || tail.starts_with("\\ ")
                    {
                        break;
                    }
                    end = start + i + c.len_utf8();
                }
                self.token(TokenKind::Word, end)
            }
        };
        Some(Ok(token))
    }
}

/// Tokenizes `source`.
///
/// Returns an empty sequence for empty input. An unterminated command is an error of kind
/// [`ErrorKind::UnterminatedCommand`].
pub fn lex(source: &str) -> Result<Vec<LexedToken<'_>>, Error> {
    Lexer::new(source).collect()
}

/// Escapes `text` so that it lays out as exactly its own characters, with no commands and
/// no non-breaking-space escapes.
///
/// Pipes become `\|` and backslashes become `\\`. This is useful for callers that fall back
/// to showing markup verbatim after a lexing or parsing error.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '|' => out.push_str("\\|"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}
