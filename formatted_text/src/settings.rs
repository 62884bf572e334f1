// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settings that control a single layout.

use peniko::Color;
use peniko::color::palette::css;

use crate::FontId;

/// Horizontal alignment of each line within the layout box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Align lines to the left edge.
    #[default]
    Left,
    /// Center each line.
    Center,
    /// Align lines to the right edge.
    Right,
}

/// Vertical alignment of the block of lines within the layout box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    /// Align the first line with the top edge.
    #[default]
    Top,
    /// Center the block of lines.
    Middle,
    /// Align the last line with the bottom edge.
    Bottom,
}

/// Whether lines wrap at the layout width.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    /// Break lines greedily at breaking whitespace, and within words that do not fit on an empty
    /// line.
    #[default]
    Word,
    /// Only break lines at newlines.
    NoWrap,
}

/// Configuration of a single layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextLayoutSettings {
    /// The font used where no `font` command or style selects one.
    pub font: FontId,
    /// The width of the layout box. `None` means unbounded.
    ///
    /// Negative and NaN widths are treated as zero, in which case every line holds one glyph.
    pub width: Option<f32>,
    /// The height of the layout box. `None` means unbounded.
    ///
    /// Lines that would extend past the height are dropped, except for the first line.
    pub height: Option<f32>,
    /// Horizontal alignment of lines.
    pub horizontal_alignment: HorizontalAlignment,
    /// Vertical alignment of the block of lines. Only meaningful when `height` is set.
    pub vertical_alignment: VerticalAlignment,
    /// Line wrapping.
    pub wrap: WrapMode,
    /// The color used where no `c` command or style selects one.
    pub color: Color,
    /// Whether text starts out bold.
    pub bold: bool,
    /// Whether text starts out italic.
    pub italic: bool,
}

impl TextLayoutSettings {
    /// Creates settings with the given default font, an unbounded box, top-left alignment, word
    /// wrapping and black text.
    pub fn new(font: FontId) -> Self {
        Self {
            font,
            width: None,
            height: None,
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            wrap: WrapMode::default(),
            color: css::BLACK,
            bold: false,
            italic: false,
        }
    }

    /// Sets the width and height of the layout box.
    pub fn with_size(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the width of the layout box.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the height of the layout box.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the alignment.
    pub fn with_alignment(
        mut self,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    ) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    /// Sets the wrap mode.
    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    /// Sets the default color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the initial bold and italic state.
    pub fn with_face(mut self, bold: bool, italic: bool) -> Self {
        self.bold = bold;
        self.italic = italic;
        self
    }

    /// The width lines are broken at, if wrapping applies.
    pub(crate) fn max_advance(&self) -> Option<f32> {
        match self.wrap {
            WrapMode::NoWrap => None,
            // `f32::max` treats NaN as missing, so NaN clamps to zero as well.
            WrapMode::Word => self.width.map(|w| w.max(0.0)),
        }
    }
}
