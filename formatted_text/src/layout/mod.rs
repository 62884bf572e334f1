// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout of formatted text into a command stream.

mod alignment;
mod line_break;
mod shape;

use alloc::vec::Vec;

use self::alignment::align;
use self::line_break::{BreakLines, LineData, Position};
use self::shape::{ItemKind, LayoutData, shape};
use crate::error::Error;
use crate::{
    FontFace, Glyph, GlyphMetrics, IconRun, LayoutCommand, LayoutStacks, LineBreak, LineInfo,
    Registry, TextLayoutCommandStream, TextLayoutSettings, TextRun,
};

/// Lays out formatted text.
///
/// The engine owns scratch buffers that are reused across calls to [`layout`], so a single
/// engine should be kept around for repeated layouts. Each call is otherwise independent: the
/// stacks are reset at the start of every pass.
///
/// [`layout`]: Self::layout
#[derive(Clone, Debug, Default)]
pub struct TextLayoutEngine {
    data: LayoutData,
    stacks: LayoutStacks,
    lines: Vec<LineData>,
}

impl TextLayoutEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out `source` with the given settings, resolving names against `registry` and
    /// measuring glyphs with `metrics`.
    ///
    /// Lexing and parsing errors are returned with the byte span and location of the offending
    /// text. Unbalanced stack commands are not errors: pops of empty stacks are dropped, and
    /// pushes left open at the end are closed by pops appended to the stream in reverse push
    /// order.
    pub fn layout(
        &mut self,
        source: &str,
        settings: &TextLayoutSettings,
        registry: &Registry,
        metrics: &dyn GlyphMetrics,
    ) -> Result<TextLayoutCommandStream, Error> {
        shape(
            &mut self.data,
            &mut self.stacks,
            source,
            settings,
            registry,
            metrics,
        )?;

        let default_metrics = metrics.measure(
            settings.font,
            FontFace::new(settings.bold, settings.italic),
            "",
            &mut Vec::new(),
        );
        let truncated = BreakLines::new(
            &self.data,
            settings.max_advance(),
            settings.height,
            &mut self.lines,
        )
        .break_all(default_metrics);
        if truncated {
            log::trace!(
                "dropped lines past height {:?}, keeping {}",
                settings.height,
                self.lines.len()
            );
        }

        let mut stream = self.emit(settings, registry);
        stream.truncated = truncated;
        align(&mut stream, settings);
        Ok(stream)
    }

    /// Converts broken lines into commands, glyphs and line records.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "glyph and line indices are stored as u32"
    )]
    fn emit(
        &mut self,
        settings: &TextLayoutSettings,
        registry: &Registry,
    ) -> TextLayoutCommandStream {
        let data = &self.data;
        let stacks = &mut self.stacks;
        stacks.reset(settings.bold, settings.italic);

        let mut commands = Vec::new();
        let mut glyphs: Vec<Glyph> = Vec::with_capacity(data.glyphs.len());
        let mut lines = Vec::with_capacity(self.lines.len());
        let mut y = 0.0_f32;
        let mut width = 0.0_f32;

        for (line_index, line) in self.lines.iter().enumerate() {
            let line_no = line_index as u32;
            let command_start = commands.len();
            let glyph_start = glyphs.len();
            let mut x = 0.0_f32;
            let mut run: Option<TextRun> = None;

            let mut i = line.start.item;
            while i < data.items.len() && includes_item(line.end, i) {
                let item = &data.items[i];
                let from = if i == line.start.item {
                    line.start.glyph
                } else {
                    0
                };
                let to = if i == line.end.item {
                    line.end.glyph
                } else {
                    item.glyph_len()
                };
                match item.kind {
                    ItemKind::Command(command) => {
                        flush(&mut run, &mut commands);
                        if command.apply(stacks, registry) {
                            commands.push(command);
                        }
                    }
                    ItemKind::Text | ItemKind::Space | ItemKind::NonBreakingSpace => {
                        let shaped_glyphs =
                            &data.glyphs[item.glyphs.start + from..item.glyphs.start + to];
                        for shaped in shaped_glyphs {
                            let run = run.get_or_insert(TextRun {
                                glyph_start: glyphs.len() as u32,
                                glyph_count: 0,
                                x,
                                y,
                                width: 0.0,
                                line: line_no,
                            });
                            run.glyph_count += 1;
                            run.width += shaped.advance;
                            glyphs.push(Glyph {
                                ch: shaped.ch,
                                x,
                                advance: shaped.advance,
                                source: shaped.source,
                                line: line_no,
                            });
                            x += shaped.advance;
                        }
                    }
                    ItemKind::Icon(icon) => {
                        flush(&mut run, &mut commands);
                        let shaped = data.glyphs[item.glyphs.start];
                        commands.push(LayoutCommand::Icon(IconRun {
                            icon,
                            glyph: glyphs.len() as u32,
                            x,
                            y,
                            width: shaped.advance,
                            height: item.metrics.ascent,
                            line: line_no,
                        }));
                        glyphs.push(Glyph {
                            ch: shaped.ch,
                            x,
                            advance: shaped.advance,
                            source: shaped.source,
                            line: line_no,
                        });
                        x += shaped.advance;
                    }
                    ItemKind::NewLine => {}
                }
                i += 1;
            }
            flush(&mut run, &mut commands);

            let height = line.metrics.line_height();
            if line_index + 1 < self.lines.len() {
                commands.push(LayoutCommand::LineBreak(LineBreak {
                    width: line.width,
                    height,
                    reason: line.break_reason,
                }));
            }
            lines.push(LineInfo {
                x: 0.0,
                y,
                width: line.width,
                trailing_whitespace: line.trailing_whitespace,
                ascent: line.metrics.ascent,
                descent: line.metrics.descent,
                glyphs: glyph_start..glyphs.len(),
                commands: command_start..commands.len(),
                break_reason: line.break_reason,
            });
            y += height;
            width = width.max(line.width);
        }

        // Close everything left open, most recent first.
        let open: Vec<_> = stacks.unwind_order().collect();
        for kind in open {
            log::debug!("closing unmatched {kind:?} push at end of text");
            stacks.pop(kind);
            commands.push(LayoutCommand::pop(kind));
        }
        if let Some(last) = lines.last_mut() {
            last.commands.end = commands.len();
        }

        TextLayoutCommandStream {
            commands,
            glyphs,
            lines,
            links: data.links.clone(),
            settings: *settings,
            width,
            height: y,
            truncated: false,
        }
    }
}

/// Whether item `index` has content before the exclusive line end `end`.
fn includes_item(end: Position, index: usize) -> bool {
    index < end.item || (index == end.item && end.glyph > 0)
}

fn flush(run: &mut Option<TextRun>, commands: &mut Vec<LayoutCommand>) {
    if let Some(run) = run.take() {
        commands.push(LayoutCommand::Text(run));
    }
}

/// Lays out `source` with a temporary [`TextLayoutEngine`].
pub fn layout(
    source: &str,
    settings: &TextLayoutSettings,
    registry: &Registry,
    metrics: &dyn GlyphMetrics,
) -> Result<TextLayoutCommandStream, Error> {
    TextLayoutEngine::new().layout(source, settings, registry, metrics)
}
