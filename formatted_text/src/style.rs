// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers and style types shared by layout and rendering.

use peniko::Color;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(u32::try_from(index).expect("too many registry entries"))
            }

            /// The index of this entry in its table.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Handle to a font registered with a [`Registry`](crate::Registry).
    FontId
);
define_id!(
    /// Handle to a named [`TextStyle`] registered with a [`Registry`](crate::Registry).
    StyleId
);
define_id!(
    /// Handle to a [`GlyphShader`](crate::GlyphShader) registered with a
    /// [`Registry`](crate::Registry).
    ShaderId
);
define_id!(
    /// Handle to an [`IconGlyph`] registered with a [`Registry`](crate::Registry).
    IconId
);
define_id!(
    /// Handle to a custom command registered with a [`Registry`](crate::Registry).
    CustomCommandId
);
define_id!(
    /// Index of a link target within a
    /// [`TextLayoutCommandStream`](crate::TextLayoutCommandStream).
    LinkId
);

/// A named bundle of text attributes applied by the `style` command.
///
/// Every attribute is optional. Attributes a style leaves unset fall through to enclosing
/// styles and finally to the layout settings.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TextStyle {
    /// Forces bold on or off while the style is active.
    pub bold: Option<bool>,
    /// Forces italic on or off while the style is active.
    pub italic: Option<bool>,
    /// The font used while the style is active, unless a `font` command overrides it.
    pub font: Option<FontId>,
    /// The color used while the style is active, unless a `c` command overrides it.
    pub color: Option<Color>,
    /// The glyph shader used while the style is active, unless a `shader` command overrides it.
    pub glyph_shader: Option<ShaderId>,
}

impl TextStyle {
    /// Creates a style that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bold override.
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Sets the italic override.
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Sets the font.
    pub fn font(mut self, font: FontId) -> Self {
        self.font = Some(font);
        self
    }

    /// Sets the color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the glyph shader.
    pub fn glyph_shader(mut self, shader: ShaderId) -> Self {
        self.glyph_shader = Some(shader);
        self
    }
}

/// A pushed style together with the bold and italic state it replaced.
///
/// Popping the instance restores exactly that state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextStyleInstance {
    /// The pushed style.
    pub id: StyleId,
    /// The style's attributes.
    pub style: TextStyle,
    /// Whether bold was active immediately before the push.
    pub bold_before: bool,
    /// Whether italic was active immediately before the push.
    pub italic_before: bool,
}

/// An inline image placed by the `icon` command.
///
/// An icon occupies a single glyph position. Its bottom edge sits on the baseline.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct IconGlyph {
    /// Horizontal advance of the icon.
    pub width: f32,
    /// Height of the icon above the baseline.
    pub height: f32,
}

impl IconGlyph {
    /// Creates an icon of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
