// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lexing and parsing errors.

use core::fmt;
use core::ops::Range;

/// Error produced while lexing or parsing formatted text.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the byte span of the offending source text and,
/// once the error has been located in its source string, the 1-based line and column of the
/// start of that span.
///
/// All errors of this type are fatal for the layout pass that produced them. Conditions that
/// layout can recover from (such as unbalanced push/pop commands) never surface as an `Error`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    span: Range<usize>,
    location: Option<Location>,
}

/// A 1-based line/column position in a source string.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// The 1-based line number.
    pub line: usize,
    /// The 1-based column, counted in characters.
    pub column: usize,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, span: Range<usize>) -> Self {
        Self {
            kind,
            span,
            location: None,
        }
    }

    pub(crate) fn located(kind: ErrorKind, span: Range<usize>, source: &str) -> Self {
        Self::new(kind, span).locate(source)
    }

    /// Shifts a span that is relative to a command's inner text so that it is relative to the
    /// whole source string, and computes the line and column.
    pub(crate) fn rebase(mut self, offset: usize, source: &str) -> Self {
        self.span = self.span.start + offset..self.span.end + offset;
        self.locate(source)
    }

    fn locate(mut self, source: &str) -> Self {
        self.location = Some(location_of(source, self.span.start));
        self
    }

    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether this error was raised by the lexer or by command parsing.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns `true` for errors raised while tokenizing the source.
    pub fn is_lex_error(&self) -> bool {
        self.category() == ErrorCategory::Lex
    }

    /// Returns `true` for errors raised while parsing or resolving a command.
    pub fn is_parse_error(&self) -> bool {
        self.category() == ErrorCategory::Parse
    }

    /// The byte span of the offending source text.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The line and column of the start of the offending span, if known.
    ///
    /// Errors returned from [`lex`](crate::lex) and from layout are always located. Errors
    /// returned by [`parse_command`](crate::parse_command) are relative to the command text and
    /// carry no location.
    pub fn location(&self) -> Option<Location> {
        self.location
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ErrorKind::UnterminatedCommand => "unterminated command",
            ErrorKind::EmptyCommand => "empty command",
            ErrorKind::UnknownCommand => "unknown command",
            ErrorKind::MalformedArgument => "malformed command argument",
            ErrorKind::UnresolvedStyle => "unregistered style",
            ErrorKind::UnresolvedFont => "unregistered font",
            ErrorKind::UnresolvedColor => "unrecognized color",
            ErrorKind::UnresolvedShader => "unregistered glyph shader",
            ErrorKind::UnresolvedIcon => "unregistered icon",
        };
        match self.location {
            Some(loc) => write!(
                f,
                "{msg} at {}:{} (bytes {}..{})",
                loc.line, loc.column, self.span.start, self.span.end
            ),
            None => write!(f, "{msg} at bytes {}..{}", self.span.start, self.span.end),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A `|` opened a command that was not closed before the end of the line.
    UnterminatedCommand,
    /// A command contained no text (`||`).
    EmptyCommand,
    /// The command name is neither built in nor registered as a custom command.
    UnknownCommand,
    /// The command's argument list does not match what the command expects.
    MalformedArgument,
    /// A `style` command named a style that is not registered.
    UnresolvedStyle,
    /// A `font` command named a font that is not registered.
    UnresolvedFont,
    /// A `c` command named neither a registered color nor a valid CSS color.
    UnresolvedColor,
    /// A `shader` command named a glyph shader that is not registered.
    UnresolvedShader,
    /// An `icon` command named an icon that is not registered.
    UnresolvedIcon,
}

impl ErrorKind {
    /// Whether errors of this kind come from lexing or parsing.
    pub fn category(self) -> ErrorCategory {
        match self {
            Self::UnterminatedCommand => ErrorCategory::Lex,
            _ => ErrorCategory::Parse,
        }
    }
}

/// The coarse classification of an [`Error`].
///
/// Callers that want to fall back to laying out the source as plain text can use this to tell
/// markup problems apart from each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The source could not be tokenized.
    Lex,
    /// A command could not be parsed or one of its names could not be resolved.
    Parse,
}

/// Computes the 1-based line and column of `offset` within `source`.
///
/// `\r\n`, `\n` and a lone `\r` each end a line. Offsets past the end are clamped.
pub fn location_of(source: &str, offset: usize) -> Location {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut column = 1;
    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if i >= offset {
            break;
        }
        match c {
            '\r' => {
                if let Some(&(j, '\n')) = chars.peek() {
                    if j >= offset {
                        column += 1;
                        break;
                    }
                    chars.next();
                }
                line += 1;
                column = 1;
            }
            '\n' => {
                line += 1;
                column = 1;
            }
            _ => column += 1,
        }
    }
    Location { line, column }
}
