// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style, font, color, glyph shader and link stacks.

use alloc::vec::Vec;

use peniko::Color;
use smallvec::SmallVec;

use crate::{FontFace, FontId, LinkId, ShaderId, StyleId, TextStyle, TextStyleInstance};

/// Identifies one of the five layout stacks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StackKind {
    /// Named styles.
    Style,
    /// Fonts.
    Font,
    /// Colors.
    Color,
    /// Glyph shaders.
    GlyphShader,
    /// Links.
    Link,
}

/// The independent LIFO stacks active during a single layout or draw pass, plus the bold and
/// italic flags they interact with.
///
/// Attribute precedence is: an entry on the attribute's own stack, then the innermost pushed
/// style that sets the attribute, then the caller's default.
#[derive(Clone, Debug, Default)]
pub struct LayoutStacks {
    styles: SmallVec<[TextStyleInstance; 4]>,
    fonts: SmallVec<[FontId; 4]>,
    colors: SmallVec<[Color; 4]>,
    shaders: SmallVec<[ShaderId; 4]>,
    links: SmallVec<[LinkId; 2]>,
    bold: bool,
    italic: bool,
    /// Every entry currently on any stack, in push order.
    open: Vec<StackKind>,
}

impl LayoutStacks {
    /// Creates empty stacks with the given initial bold and italic state.
    pub fn new(bold: bool, italic: bool) -> Self {
        Self {
            bold,
            italic,
            ..Self::default()
        }
    }

    /// Empties every stack and resets bold and italic.
    pub fn reset(&mut self, bold: bool, italic: bool) {
        self.styles.clear();
        self.fonts.clear();
        self.colors.clear();
        self.shaders.clear();
        self.links.clear();
        self.open.clear();
        self.bold = bold;
        self.italic = italic;
    }

    /// Sets the bold flag.
    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    /// Sets the italic flag.
    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    /// Whether bold is active.
    pub fn bold(&self) -> bool {
        self.bold
    }

    /// Whether italic is active.
    pub fn italic(&self) -> bool {
        self.italic
    }

    /// The font face selected by the bold and italic flags.
    pub fn face(&self) -> FontFace {
        FontFace::new(self.bold, self.italic)
    }

    /// Pushes a style, applying its bold and italic overrides.
    pub fn push_style(&mut self, id: StyleId, style: TextStyle) {
        self.styles.push(TextStyleInstance {
            id,
            style,
            bold_before: self.bold,
            italic_before: self.italic,
        });
        if let Some(bold) = style.bold {
            self.bold = bold;
        }
        if let Some(italic) = style.italic {
            self.italic = italic;
        }
        self.open.push(StackKind::Style);
    }

    /// Pops the innermost style, restoring the bold and italic state from before its push.
    pub fn pop_style(&mut self) -> Option<TextStyleInstance> {
        let instance = self.styles.pop()?;
        self.bold = instance.bold_before;
        self.italic = instance.italic_before;
        self.close(StackKind::Style);
        Some(instance)
    }

    /// Pushes a font.
    pub fn push_font(&mut self, font: FontId) {
        self.fonts.push(font);
        self.open.push(StackKind::Font);
    }

    /// Pops the innermost font.
    pub fn pop_font(&mut self) -> Option<FontId> {
        let font = self.fonts.pop()?;
        self.close(StackKind::Font);
        Some(font)
    }

    /// Pushes a color.
    pub fn push_color(&mut self, color: Color) {
        self.colors.push(color);
        self.open.push(StackKind::Color);
    }

    /// Pops the innermost color.
    pub fn pop_color(&mut self) -> Option<Color> {
        let color = self.colors.pop()?;
        self.close(StackKind::Color);
        Some(color)
    }

    /// Pushes a glyph shader.
    pub fn push_shader(&mut self, shader: ShaderId) {
        self.shaders.push(shader);
        self.open.push(StackKind::GlyphShader);
    }

    /// Pops the innermost glyph shader.
    pub fn pop_shader(&mut self) -> Option<ShaderId> {
        let shader = self.shaders.pop()?;
        self.close(StackKind::GlyphShader);
        Some(shader)
    }

    /// Pushes a link.
    pub fn push_link(&mut self, link: LinkId) {
        self.links.push(link);
        self.open.push(StackKind::Link);
    }

    /// Pops the innermost link.
    pub fn pop_link(&mut self) -> Option<LinkId> {
        let link = self.links.pop()?;
        self.close(StackKind::Link);
        Some(link)
    }

    /// Pops the top of the given stack, returning `false` if it was empty.
    pub fn pop(&mut self, kind: StackKind) -> bool {
        match kind {
            StackKind::Style => self.pop_style().is_some(),
            StackKind::Font => self.pop_font().is_some(),
            StackKind::Color => self.pop_color().is_some(),
            StackKind::GlyphShader => self.pop_shader().is_some(),
            StackKind::Link => self.pop_link().is_some(),
        }
    }

    fn close(&mut self, kind: StackKind) {
        if let Some(i) = self.open.iter().rposition(|&open| open == kind) {
            self.open.remove(i);
        }
    }

    /// The innermost style.
    pub fn peek_style(&self) -> Option<&TextStyleInstance> {
        self.styles.last()
    }

    /// The innermost pushed font.
    pub fn peek_font(&self) -> Option<FontId> {
        self.fonts.last().copied()
    }

    /// The innermost pushed color.
    pub fn peek_color(&self) -> Option<Color> {
        self.colors.last().copied()
    }

    /// The innermost pushed glyph shader.
    pub fn peek_shader(&self) -> Option<ShaderId> {
        self.shaders.last().copied()
    }

    /// The innermost link.
    pub fn peek_link(&self) -> Option<LinkId> {
        self.links.last().copied()
    }

    /// The number of entries on the given stack.
    pub fn depth(&self, kind: StackKind) -> usize {
        match kind {
            StackKind::Style => self.styles.len(),
            StackKind::Font => self.fonts.len(),
            StackKind::Color => self.colors.len(),
            StackKind::GlyphShader => self.shaders.len(),
            StackKind::Link => self.links.len(),
        }
    }

    /// Whether every stack is empty.
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// The active font: the innermost pushed font, else the innermost style's font, else
    /// `default`.
    pub fn font(&self, default: FontId) -> FontId {
        self.peek_font()
            .or_else(|| self.styles.iter().rev().find_map(|s| s.style.font))
            .unwrap_or(default)
    }

    /// The active color: the innermost pushed color, else the innermost style's color, else
    /// `default`.
    pub fn color(&self, default: Color) -> Color {
        self.peek_color()
            .or_else(|| self.styles.iter().rev().find_map(|s| s.style.color))
            .unwrap_or(default)
    }

    /// The active glyph shader: the innermost pushed shader, else the innermost style's shader.
    pub fn shader(&self) -> Option<ShaderId> {
        self.peek_shader()
            .or_else(|| self.styles.iter().rev().find_map(|s| s.style.glyph_shader))
    }

    /// The stacks that still hold entries, most recently pushed first.
    ///
    /// Popping in this order closes every open entry in reverse push order.
    pub fn unwind_order(&self) -> impl Iterator<Item = StackKind> + '_ {
        self.open.iter().rev().copied()
    }
}
