// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Formatted Text lays out strings with inline formatting commands into a flat, seekable stream
//! of drawing commands.
//!
//! Formatting commands are written between pipes:
//!
//! ```text
//! The |b|quick|/b| |c:#a52a2a|brown|/c| fox |icon:paw| jumps over the |style:lazy|lazy dog|/style|.
//! ```
//!
//! Layout happens in three steps:
//!
//! - The [`Lexer`] splits the source into words, whitespace, newlines and commands.
//! - Each command is parsed with [`parse_command`] and its names are resolved against a
//!   [`Registry`].
//! - The [`TextLayoutEngine`] measures glyphs with a [`GlyphMetrics`] provider, breaks lines
//!   and aligns them, producing a [`TextLayoutCommandStream`].
//!
//! The stream can be searched by position ([`TextLayoutCommandStream::search_glyphs`] and
//! friends) and replayed into a renderer with [`TextLayoutCommandStream::draw`].
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the standard library for floating point math.
//! - `libm`: Use `libm` for floating point math in `no_std` builds.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("formatted_text requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

mod command;
mod error;
mod layout;
mod lexer;
mod metrics;
mod registry;
mod settings;
mod shader;
mod stacks;
mod stream;
mod style;

#[cfg(test)]
mod tests;

pub use peniko::Color;

pub use crate::command::{CommandNode, StackOp, parse_command};
pub use crate::error::{Error, ErrorCategory, ErrorKind, Location, location_of};
pub use crate::layout::{TextLayoutEngine, layout};
pub use crate::lexer::{LexedToken, Lexer, NBSP, TokenKind, escape, lex};
pub use crate::metrics::{FontFace, FontMetrics, GlyphMetrics, MonospaceMetrics};
pub use crate::registry::Registry;
pub use crate::settings::{HorizontalAlignment, TextLayoutSettings, VerticalAlignment, WrapMode};
pub use crate::shader::{GlyphData, GlyphShader, GlyphShaderContext};
pub use crate::stacks::{LayoutStacks, StackKind};
pub use crate::stream::{
    BreakReason, Bounds, CaretPosition, Glyph, GlyphSink, IconPlacement, IconRun, LayoutCommand,
    LineBreak, LineInfo, TextLayoutCommandStream, TextRun,
};
pub use crate::style::{
    CustomCommandId, FontId, IconGlyph, IconId, LinkId, ShaderId, StyleId, TextStyle,
    TextStyleInstance,
};
