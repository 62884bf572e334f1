// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph measurement.

use alloc::vec::Vec;

use crate::FontId;

/// The face of a font selected by the active bold and italic state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Neither bold nor italic.
    #[default]
    Regular,
    /// Bold.
    Bold,
    /// Italic.
    Italic,
    /// Bold and italic.
    BoldItalic,
}

impl FontFace {
    /// Returns the face for the given bold and italic flags.
    pub fn new(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Self::Regular,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (true, true) => Self::BoldItalic,
        }
    }

    /// Whether this face is bold.
    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    /// Whether this face is italic.
    pub fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// Vertical metrics of a font face, in the same units as glyph advances.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f32,
}

impl FontMetrics {
    /// The height of a line set in this face.
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Provides glyph advances and vertical metrics for registered fonts.
///
/// Layout calls this once per lexed token with the font and face active at that token.
pub trait GlyphMetrics {
    /// Appends one advance per `char` of `text` to `advances` and returns the face's vertical
    /// metrics.
    ///
    /// `text` may be empty, in which case only the metrics are requested.
    fn measure(
        &self,
        font: FontId,
        face: FontFace,
        text: &str,
        advances: &mut Vec<f32>,
    ) -> FontMetrics;
}

/// A [`GlyphMetrics`] implementation in which every glyph of every font has the same advance.
///
/// Bold faces may be given an extra advance so that face changes are observable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// The advance of every glyph.
    pub advance: f32,
    /// Extra advance added to glyphs set in a bold face.
    pub bold_extra: f32,
    /// The vertical metrics of every face.
    pub metrics: FontMetrics,
}

impl MonospaceMetrics {
    /// Creates metrics with the given advance, an ascent of `0.8 * line_height` and a descent of
    /// `0.2 * line_height`.
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            bold_extra: 0.0,
            metrics: FontMetrics {
                ascent: line_height * 0.8,
                descent: line_height * 0.2,
            },
        }
    }

    /// Sets the extra advance of bold glyphs.
    pub fn with_bold_extra(mut self, extra: f32) -> Self {
        self.bold_extra = extra;
        self
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn measure(
        &self,
        _font: FontId,
        face: FontFace,
        text: &str,
        advances: &mut Vec<f32>,
    ) -> FontMetrics {
        let advance = if face.is_bold() {
            self.advance + self.bold_extra
        } else {
            self.advance
        };
        advances.extend(text.chars().map(|_| advance));
        self.metrics
    }
}
