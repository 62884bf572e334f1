// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replaying a command stream into a renderer.

use super::{LayoutCommand, TextLayoutCommandStream};
use crate::{CustomCommandId, GlyphData, GlyphShaderContext, IconId, LayoutStacks, Registry};

/// Where an icon is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IconPlacement {
    /// The registered icon.
    pub icon: IconId,
    /// Index of the glyph the icon occupies.
    pub glyph_index: usize,
    /// Left edge.
    pub x: f32,
    /// Top edge. The bottom of the icon sits on the line's baseline.
    pub y: f32,
    /// Width of the icon.
    pub width: f32,
    /// Height of the icon.
    pub height: f32,
}

/// Receives the glyphs and icons of a command stream, fully resolved.
pub trait GlyphSink {
    /// Draws a glyph. The active glyph shader, if any, has already run.
    fn glyph(&mut self, cx: &GlyphShaderContext, glyph: GlyphData);

    /// Draws an icon.
    fn icon(&mut self, icon: IconPlacement);

    /// Called for each custom command in stream order.
    fn custom(&mut self, id: CustomCommandId, value: u32) {
        let _ = (id, value);
    }
}

impl TextLayoutCommandStream {
    /// Replays the stream, resolving the font, face, color and glyph shader of every glyph from
    /// the layout stacks, and hands the results to `sink`.
    ///
    /// `registry` must be the registry the stream was laid out with.
    pub fn draw(&self, registry: &Registry, sink: &mut impl GlyphSink) {
        let mut stacks = LayoutStacks::new(self.settings.bold, self.settings.italic);
        let glyph_count = self.glyphs.len();
        for command in &self.commands {
            match *command {
                LayoutCommand::Text(run) => {
                    let line = &self.lines[run.line as usize];
                    let font = stacks.font(self.settings.font);
                    let face = stacks.face();
                    let color = stacks.color(self.settings.color);
                    let shader = stacks.shader().and_then(|id| registry.shader(id));
                    for index in run.glyphs() {
                        let glyph = &self.glyphs[index];
                        let cx = GlyphShaderContext {
                            glyph_index: index,
                            glyph_count,
                            line_index: run.line as usize,
                            link: stacks.peek_link(),
                        };
                        let mut data = GlyphData {
                            ch: glyph.ch,
                            x: glyph.x,
                            y: line.baseline(),
                            advance: glyph.advance,
                            color,
                            font,
                            face,
                        };
                        if let Some(shader) = shader {
                            shader.execute(&cx, &mut data, glyph.source);
                        }
                        sink.glyph(&cx, data);
                    }
                }
                LayoutCommand::Icon(icon) => {
                    let line = &self.lines[icon.line as usize];
                    sink.icon(IconPlacement {
                        icon: icon.icon,
                        glyph_index: icon.glyph as usize,
                        x: icon.x,
                        y: line.baseline() - icon.height,
                        width: icon.width,
                        height: icon.height,
                    });
                }
                LayoutCommand::Custom { id, value } => sink.custom(id, value),
                ref other => {
                    other.apply(&mut stacks, registry);
                }
            }
        }
    }
}
