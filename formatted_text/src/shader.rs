// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use crate::{FontFace, FontId, LinkId};

/// Per-glyph data passed through glyph shaders on its way to a renderer.
///
/// Shaders receive this by mutable reference and may move, recolor or replace the glyph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphData {
    /// The character to draw.
    pub ch: char,
    /// Left edge of the glyph.
    pub x: f32,
    /// Baseline of the glyph.
    pub y: f32,
    /// Horizontal advance of the glyph.
    pub advance: f32,
    /// Color of the glyph.
    pub color: Color,
    /// Font of the glyph.
    pub font: FontId,
    /// Face of the glyph.
    pub face: FontFace,
}

/// Context shared by every glyph of a draw pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphShaderContext {
    /// Index of the glyph within the command stream.
    pub glyph_index: usize,
    /// Total number of glyphs in the command stream.
    pub glyph_count: usize,
    /// Index of the line containing the glyph.
    pub line_index: usize,
    /// The innermost link containing the glyph, if any.
    pub link: Option<LinkId>,
}

/// A per-glyph rendering effect selected by the `shader` command or by a style.
///
/// Only the innermost active shader runs for a glyph.
pub trait GlyphShader: Send + Sync {
    /// Modifies `glyph`, which originates at byte `source_index` of the laid out source text.
    fn execute(&self, cx: &GlyphShaderContext, glyph: &mut GlyphData, source_index: usize);
}

impl<F> GlyphShader for F
where
    F: Fn(&GlyphShaderContext, &mut GlyphData, usize) + Send + Sync,
{
    fn execute(&self, cx: &GlyphShaderContext, glyph: &mut GlyphData, source_index: usize) {
        self(cx, glyph, source_index);
    }
}
