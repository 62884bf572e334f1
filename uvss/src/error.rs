// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

/// Kinds of errors that can occur when parsing UVSS source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The source ended inside a construct.
    UnexpectedEof,
    /// A character or word was found where something else was expected.
    UnexpectedToken,
    /// A `/*` comment was not closed.
    UnterminatedComment,
    /// A selector was empty or contained an invalid component.
    InvalidSelector,
    /// An identifier was expected.
    ExpectedIdentifier,
    /// A rule, condition or action had no value.
    EmptyValue,
    /// A trigger was neither a `property` nor an `event` trigger.
    UnknownTrigger,
    /// A trigger action was not `set`, `play-storyboard` or `play-sfx`.
    UnknownAction,
    /// A property trigger condition used an unknown comparison operator.
    InvalidOperator,
}

/// Error returned when parsing UVSS source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    span: Range<usize>,
    line: usize,
    column: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, span: Range<usize>, source: &str) -> Self {
        let (line, column) = line_column(source, span.start);
        Self {
            kind,
            span,
            line,
            column,
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Returns the byte span of the offending source text.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the 1-based line of the start of the span.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 1-based column, in characters, of the start of the span.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::UnexpectedEof => "unexpected end of style sheet",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnterminatedComment => "unterminated comment",
            ParseErrorKind::InvalidSelector => "invalid selector",
            ParseErrorKind::ExpectedIdentifier => "expected identifier",
            ParseErrorKind::EmptyValue => "missing value",
            ParseErrorKind::UnknownTrigger => "unknown trigger kind",
            ParseErrorKind::UnknownAction => "unknown trigger action",
            ParseErrorKind::InvalidOperator => "invalid comparison operator",
        };
        write!(f, "{msg} at {}:{}", self.line, self.column)
    }
}

impl core::error::Error for ParseError {}

fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count() + 1)
}

/// Kinds of errors that can occur when decoding binary UVSS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// The data does not start with the `UVSS` magic bytes.
    InvalidMagic,
    /// The data ended inside a node.
    UnexpectedEof,
    /// The schema version is zero or newer than this crate supports.
    UnsupportedVersion(u32),
    /// A node or enum tag had an unknown value.
    InvalidTag(u8),
    /// A string was not valid UTF-8.
    InvalidUtf8,
    /// Data remained after the document.
    TrailingBytes,
}

/// Error returned when decoding binary UVSS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    offset: usize,
}

impl DecodeError {
    pub(crate) const fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Returns the error kind.
    pub const fn kind(self) -> DecodeErrorKind {
        self.kind
    }

    /// Returns the byte offset at which the error was detected.
    pub const fn byte_offset(self) -> usize {
        self.offset
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DecodeErrorKind::InvalidMagic => write!(f, "missing UVSS magic")?,
            DecodeErrorKind::UnexpectedEof => write!(f, "unexpected end of data")?,
            DecodeErrorKind::UnsupportedVersion(version) => {
                write!(f, "unsupported schema version {version}")?;
            }
            DecodeErrorKind::InvalidTag(tag) => write!(f, "invalid tag {tag}")?,
            DecodeErrorKind::InvalidUtf8 => write!(f, "invalid UTF-8 in string")?,
            DecodeErrorKind::TrailingBytes => write!(f, "trailing bytes after document")?,
        }
        write!(f, " at byte {}", self.offset)
    }
}

impl core::error::Error for DecodeError {}
