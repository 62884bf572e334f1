// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The output of layout.

mod draw;
mod search;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use peniko::Color;

use crate::{
    CustomCommandId, FontId, IconId, LayoutStacks, LinkId, Registry, ShaderId, StackKind, StyleId,
    TextLayoutSettings,
};

pub use draw::{GlyphSink, IconPlacement};

/// A contiguous sequence of glyphs on one line sharing font, style, color and shader.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Index of the first glyph of the run.
    pub glyph_start: u32,
    /// Number of glyphs in the run.
    pub glyph_count: u32,
    /// Left edge of the run.
    pub x: f32,
    /// Top of the line containing the run.
    pub y: f32,
    /// Sum of the run's glyph advances.
    pub width: f32,
    /// Index of the line containing the run.
    pub line: u32,
}

impl TextRun {
    /// The glyph indices covered by the run.
    pub fn glyphs(&self) -> Range<usize> {
        let start = self.glyph_start as usize;
        start..start + self.glyph_count as usize
    }
}

/// An inline icon.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IconRun {
    /// The registered icon.
    pub icon: IconId,
    /// Index of the single glyph the icon occupies.
    pub glyph: u32,
    /// Left edge of the icon.
    pub x: f32,
    /// Top of the line containing the icon.
    pub y: f32,
    /// Advance of the icon.
    pub width: f32,
    /// Height of the icon above the baseline.
    pub height: f32,
    /// Index of the line containing the icon.
    pub line: u32,
}

/// Why a line ended.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BreakReason {
    /// The line is the last line of the layout.
    #[default]
    None,
    /// The next unit of text did not fit, and the line was broken at whitespace.
    Regular,
    /// The source contained a newline.
    Explicit,
    /// A single unit of text was wider than the layout and was broken between glyphs.
    Emergency,
}

/// Records the measurements of a completed line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineBreak {
    /// Width of the completed line, excluding trailing breaking whitespace.
    pub width: f32,
    /// Height of the completed line.
    pub height: f32,
    /// Why the line ended.
    pub reason: BreakReason,
}

/// A single command of a [`TextLayoutCommandStream`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LayoutCommand {
    /// Draw a run of glyphs.
    Text(TextRun),
    /// Draw an icon.
    Icon(IconRun),
    /// End the current line.
    LineBreak(LineBreak),
    /// Turn bold on or off.
    Bold(bool),
    /// Turn italic on or off.
    Italic(bool),
    /// Push a named style.
    PushStyle(StyleId),
    /// Pop the innermost style.
    PopStyle,
    /// Push a font.
    PushFont(FontId),
    /// Pop the innermost font.
    PopFont,
    /// Push a color.
    PushColor(Color),
    /// Pop the innermost color.
    PopColor,
    /// Push a glyph shader.
    PushGlyphShader(ShaderId),
    /// Pop the innermost glyph shader.
    PopGlyphShader,
    /// Begin a link.
    PushLink(LinkId),
    /// End the innermost link.
    PopLink,
    /// A custom command and the value its parser produced.
    Custom {
        /// The registered command.
        id: CustomCommandId,
        /// The parsed value.
        value: u32,
    },
}

impl LayoutCommand {
    /// The pop command for the given stack.
    pub fn pop(kind: StackKind) -> Self {
        match kind {
            StackKind::Style => Self::PopStyle,
            StackKind::Font => Self::PopFont,
            StackKind::Color => Self::PopColor,
            StackKind::GlyphShader => Self::PopGlyphShader,
            StackKind::Link => Self::PopLink,
        }
    }

    /// Applies the command to `stacks`.
    ///
    /// Returns `false` for a pop of an empty stack, which leaves `stacks` unchanged. Drawing and
    /// positioning commands have no effect on the stacks.
    pub fn apply(&self, stacks: &mut LayoutStacks, registry: &Registry) -> bool {
        match *self {
            Self::Bold(bold) => stacks.set_bold(bold),
            Self::Italic(italic) => stacks.set_italic(italic),
            Self::PushStyle(id) => {
                stacks.push_style(id, registry.style(id).copied().unwrap_or_default());
            }
            Self::PushFont(font) => stacks.push_font(font),
            Self::PushColor(color) => stacks.push_color(color),
            Self::PushGlyphShader(shader) => stacks.push_shader(shader),
            Self::PushLink(link) => stacks.push_link(link),
            Self::PopStyle => return stacks.pop(StackKind::Style),
            Self::PopFont => return stacks.pop(StackKind::Font),
            Self::PopColor => return stacks.pop(StackKind::Color),
            Self::PopGlyphShader => return stacks.pop(StackKind::GlyphShader),
            Self::PopLink => return stacks.pop(StackKind::Link),
            Self::Text(_) | Self::Icon(_) | Self::LineBreak(_) | Self::Custom { .. } => {}
        }
        true
    }
}

/// A positioned glyph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Glyph {
    /// The character the glyph draws.
    pub ch: char,
    /// Left edge of the glyph.
    pub x: f32,
    /// Horizontal advance of the glyph.
    pub advance: f32,
    /// Byte offset of the glyph's source text.
    pub source: usize,
    /// Index of the line containing the glyph.
    pub line: u32,
}

/// Bounding box of a glyph or caret.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Bounds {
    /// Whether the point lies within the bounds, edges included.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// The center point.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// Metrics and extents of a single line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineInfo {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) trailing_whitespace: f32,
    pub(crate) ascent: f32,
    pub(crate) descent: f32,
    pub(crate) glyphs: Range<usize>,
    pub(crate) commands: Range<usize>,
    pub(crate) break_reason: BreakReason,
}

impl LineInfo {
    /// Left edge of the line after alignment.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Top of the line after alignment.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Width of the line, excluding trailing breaking whitespace.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Width of breaking whitespace hanging past the end of the line.
    pub fn trailing_whitespace(&self) -> f32 {
        self.trailing_whitespace
    }

    /// Height of the line: the largest ascent plus the largest descent of its content.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }

    /// Distance from the top of the line to its baseline.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Baseline of the line after alignment.
    pub fn baseline(&self) -> f32 {
        self.y + self.ascent
    }

    /// Bottom of the line after alignment.
    pub fn bottom(&self) -> f32 {
        self.y + self.height()
    }

    /// Indices of the glyphs on the line.
    pub fn glyphs(&self) -> Range<usize> {
        self.glyphs.clone()
    }

    /// Indices of the commands belonging to the line.
    pub fn commands(&self) -> Range<usize> {
        self.commands.clone()
    }

    /// Why the line ended.
    pub fn break_reason(&self) -> BreakReason {
        self.break_reason
    }
}

/// Where to draw a caret.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CaretPosition {
    /// Horizontal position of the caret.
    pub x: f32,
    /// Top of the caret.
    pub y: f32,
    /// Height of the caret.
    pub height: f32,
    /// Index of the line containing the caret.
    pub line: usize,
}

/// The result of laying out formatted text: an append-only, randomly seekable sequence of
/// [`LayoutCommand`]s, together with the glyph and line tables that make spatial queries cheap.
///
/// Every push command in the stream is matched by a pop, either from the source or appended
/// at the end of the stream. The stream is immutable once built and can be shared across
/// threads.
#[derive(Clone, Debug)]
pub struct TextLayoutCommandStream {
    pub(crate) commands: Vec<LayoutCommand>,
    pub(crate) glyphs: Vec<Glyph>,
    pub(crate) lines: Vec<LineInfo>,
    pub(crate) links: Vec<String>,
    pub(crate) settings: TextLayoutSettings,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) truncated: bool,
}

impl TextLayoutCommandStream {
    /// All commands, in order.
    pub fn commands(&self) -> &[LayoutCommand] {
        &self.commands
    }

    /// Iterates over the commands.
    pub fn iter(&self) -> core::slice::Iter<'_, LayoutCommand> {
        self.commands.iter()
    }

    /// The number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the stream contains no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the command at `index`.
    pub fn get(&self, index: usize) -> Option<&LayoutCommand> {
        self.commands.get(index)
    }

    /// The commands belonging to a line.
    pub fn line_commands(&self, line: usize) -> &[LayoutCommand] {
        self.lines
            .get(line)
            .map_or(&[], |line| &self.commands[line.commands.clone()])
    }

    /// The lines, top to bottom.
    ///
    /// There is always at least one line, even for empty input.
    pub fn lines(&self) -> &[LineInfo] {
        &self.lines
    }

    /// The total number of glyphs, including whitespace and icons.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// All glyphs, in order.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Returns the glyph at `index`.
    pub fn glyph(&self, index: usize) -> Option<&Glyph> {
        self.glyphs.get(index)
    }

    /// The characters of the glyphs in `range`.
    pub fn glyph_text(&self, range: Range<usize>) -> String {
        self.glyphs
            .get(range)
            .map(|glyphs| glyphs.iter().map(|glyph| glyph.ch).collect())
            .unwrap_or_default()
    }

    /// The bounding box of the glyph at `index`: its advance by the height of its line.
    pub fn glyph_bounds(&self, index: usize) -> Option<Bounds> {
        let glyph = self.glyphs.get(index)?;
        let line = &self.lines[glyph.line as usize];
        Some(Bounds {
            x: glyph.x,
            y: line.y,
            width: glyph.advance,
            height: line.height(),
        })
    }

    /// The index of the line containing the glyph at `index`.
    pub fn line_at_glyph(&self, index: usize) -> Option<usize> {
        self.glyphs.get(index).map(|glyph| glyph.line as usize)
    }

    /// The position of the caret placed before the glyph at `index`.
    ///
    /// `index == glyph_count()` places the caret after the last glyph. Larger indices are
    /// clamped.
    pub fn caret_position(&self, index: usize) -> CaretPosition {
        let (x, line) = match self.glyphs.get(index) {
            Some(glyph) => (glyph.x, glyph.line as usize),
            None => match self.glyphs.last() {
                Some(last) => (last.x + last.advance, last.line as usize),
                None => {
                    let line = self.lines.len() - 1;
                    (self.lines[line].x, line)
                }
            },
        };
        let info = &self.lines[line];
        CaretPosition {
            x,
            y: info.y,
            height: info.height(),
            line,
        }
    }

    /// The target of a link.
    pub fn link_target(&self, link: LinkId) -> Option<&str> {
        self.links.get(link.index()).map(String::as_str)
    }

    /// The width of the widest line.
    pub fn actual_width(&self) -> f32 {
        self.width
    }

    /// The sum of the line heights.
    pub fn actual_height(&self) -> f32 {
        self.height
    }

    /// Whether lines were dropped because they did not fit the layout height.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The settings the stream was laid out with.
    pub fn settings(&self) -> &TextLayoutSettings {
        &self.settings
    }
}

impl<'a> IntoIterator for &'a TextLayoutCommandStream {
    type Item = &'a LayoutCommand;
    type IntoIter = core::slice::Iter<'a, LayoutCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
