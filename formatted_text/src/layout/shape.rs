// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns lexed tokens into measured items.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::ops::Range;

use crate::command::{CommandNode, StackOp, argument_span, parse_command};
use crate::error::{Error, ErrorKind};
use crate::lexer::{LexedToken, Lexer, TokenKind};
use crate::{
    FontMetrics, GlyphMetrics, IconId, LayoutCommand, LayoutStacks, LinkId, Registry,
    TextLayoutSettings,
};

/// The glyph substituted for an icon in the glyph table.
pub(crate) const OBJECT_REPLACEMENT: char = '\u{fffc}';

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum ItemKind {
    Text,
    Space,
    NonBreakingSpace,
    NewLine,
    Icon(IconId),
    Command(LayoutCommand),
}

impl ItemKind {
    /// Whether the item may share an unbreakable unit with a neighboring word.
    pub(crate) fn joins_unit(&self) -> bool {
        matches!(self, Self::Text | Self::NonBreakingSpace | Self::Command(_))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Item {
    pub(crate) kind: ItemKind,
    pub(crate) glyphs: Range<usize>,
    /// Metrics of the font active for the item. For commands, the font active after the
    /// command takes effect.
    pub(crate) metrics: FontMetrics,
}

impl Item {
    pub(crate) fn glyph_len(&self) -> usize {
        self.glyphs.len()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ShapedGlyph {
    pub(crate) ch: char,
    pub(crate) advance: f32,
    pub(crate) source: usize,
}

/// Scratch state reused across layout passes.
#[derive(Clone, Debug, Default)]
pub(crate) struct LayoutData {
    pub(crate) items: Vec<Item>,
    pub(crate) glyphs: Vec<ShapedGlyph>,
    pub(crate) links: Vec<String>,
    text: String,
    advances: Vec<f32>,
}

impl LayoutData {
    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.glyphs.clear();
        self.links.clear();
        self.text.clear();
        self.advances.clear();
    }

    /// Sum of the advances of `item`'s glyphs from `offset` onwards.
    pub(crate) fn item_width(&self, item: &Item, offset: usize) -> f32 {
        self.glyphs[item.glyphs.start + offset..item.glyphs.end]
            .iter()
            .map(|glyph| glyph.advance)
            .sum()
    }
}

/// Lexes, parses and measures `source` into `data.items`.
///
/// Pops of empty stacks are dropped here, so that every pop command that survives into the
/// items matches an earlier push.
pub(crate) fn shape(
    data: &mut LayoutData,
    stacks: &mut LayoutStacks,
    source: &str,
    settings: &TextLayoutSettings,
    registry: &Registry,
    metrics: &dyn GlyphMetrics,
) -> Result<(), Error> {
    data.clear();
    stacks.reset(settings.bold, settings.italic);
    for token in Lexer::new(source) {
        let token = token?;
        match token.kind() {
            TokenKind::Command => {
                let raw = token.command_text().unwrap_or_default();
                // Spans from command parsing are relative to the text after the opening pipe.
                let offset = token.span().start + 1;
                let node = parse_command(raw, registry).map_err(|err| err.rebase(offset, source))?;
                let resolved = resolve(node, registry, &mut data.links).map_err(|kind| {
                    Error::new(kind, argument_span(raw)).rebase(offset, source)
                })?;
                match resolved {
                    Resolved::Command(command) => {
                        if !command.apply(stacks, registry) {
                            log::debug!(
                                "ignoring {command:?} at byte {offset} with nothing to pop"
                            );
                            continue;
                        }
                        let m = measure_empty(data, stacks, settings, metrics);
                        data.items.push(Item {
                            kind: ItemKind::Command(command),
                            glyphs: data.glyphs.len()..data.glyphs.len(),
                            metrics: m,
                        });
                    }
                    Resolved::Icon(id) => {
                        let icon = registry.icon(id).copied().unwrap_or_default();
                        let start = data.glyphs.len();
                        data.glyphs.push(ShapedGlyph {
                            ch: OBJECT_REPLACEMENT,
                            advance: icon.width,
                            source: token.span().start,
                        });
                        data.items.push(Item {
                            kind: ItemKind::Icon(id),
                            glyphs: start..start + 1,
                            metrics: FontMetrics {
                                ascent: icon.height,
                                descent: 0.0,
                            },
                        });
                    }
                }
            }
            TokenKind::NewLine => {
                let m = measure_empty(data, stacks, settings, metrics);
                data.items.push(Item {
                    kind: ItemKind::NewLine,
                    glyphs: data.glyphs.len()..data.glyphs.len(),
                    metrics: m,
                });
            }
            TokenKind::BreakingWhiteSpace => {
                push_text(data, stacks, &token, ItemKind::Space, settings, metrics);
            }
            TokenKind::NonBreakingWhiteSpace => {
                push_text(
                    data,
                    stacks,
                    &token,
                    ItemKind::NonBreakingSpace,
                    settings,
                    metrics,
                );
            }
            TokenKind::Word | TokenKind::Pipe | TokenKind::Backslash => {
                push_text(data, stacks, &token, ItemKind::Text, settings, metrics);
            }
        }
    }
    Ok(())
}

fn measure_empty(
    data: &mut LayoutData,
    stacks: &LayoutStacks,
    settings: &TextLayoutSettings,
    metrics: &dyn GlyphMetrics,
) -> FontMetrics {
    data.advances.clear();
    metrics.measure(
        stacks.font(settings.font),
        stacks.face(),
        "",
        &mut data.advances,
    )
}

fn push_text(
    data: &mut LayoutData,
    stacks: &LayoutStacks,
    token: &LexedToken<'_>,
    kind: ItemKind,
    settings: &TextLayoutSettings,
    metrics: &dyn GlyphMetrics,
) {
    data.text.clear();
    token.push_glyphs(&mut data.text);
    data.advances.clear();
    let m = metrics.measure(
        stacks.font(settings.font),
        stacks.face(),
        &data.text,
        &mut data.advances,
    );
    let start = data.glyphs.len();
    let mut advances = data.advances.iter().copied();
    let glyphs = &mut data.glyphs;
    token.for_each_glyph(|ch, source| {
        glyphs.push(ShapedGlyph {
            ch,
            advance: advances.next().unwrap_or(0.0),
            source,
        });
    });
    if start == data.glyphs.len() {
        return;
    }
    data.items.push(Item {
        kind,
        glyphs: start..data.glyphs.len(),
        metrics: m,
    });
}

enum Resolved {
    Command(LayoutCommand),
    Icon(IconId),
}

/// Resolves the names in a parsed command against the registry.
fn resolve(
    node: CommandNode<'_>,
    registry: &Registry,
    links: &mut Vec<String>,
) -> Result<Resolved, ErrorKind> {
    let command = match node {
        CommandNode::Bold(bold) => LayoutCommand::Bold(bold),
        CommandNode::Italic(italic) => LayoutCommand::Italic(italic),
        CommandNode::Style(StackOp::Push(name)) => {
            LayoutCommand::PushStyle(registry.style_id(name).ok_or(ErrorKind::UnresolvedStyle)?)
        }
        CommandNode::Style(StackOp::Pop) => LayoutCommand::PopStyle,
        CommandNode::Font(StackOp::Push(name)) => {
            LayoutCommand::PushFont(registry.font_id(name).ok_or(ErrorKind::UnresolvedFont)?)
        }
        CommandNode::Font(StackOp::Pop) => LayoutCommand::PopFont,
        CommandNode::Color(StackOp::Push(name)) => {
            LayoutCommand::PushColor(registry.color(name).ok_or(ErrorKind::UnresolvedColor)?)
        }
        CommandNode::Color(StackOp::Pop) => LayoutCommand::PopColor,
        CommandNode::Shader(StackOp::Push(name)) => LayoutCommand::PushGlyphShader(
            registry
                .shader_id(name)
                .ok_or(ErrorKind::UnresolvedShader)?,
        ),
        CommandNode::Shader(StackOp::Pop) => LayoutCommand::PopGlyphShader,
        CommandNode::Link(StackOp::Push(target)) => {
            let id = LinkId::new(links.len());
            links.push(target.to_string());
            LayoutCommand::PushLink(id)
        }
        CommandNode::Link(StackOp::Pop) => LayoutCommand::PopLink,
        CommandNode::Icon(name) => {
            return registry
                .icon_id(name)
                .map(Resolved::Icon)
                .ok_or(ErrorKind::UnresolvedIcon);
        }
        CommandNode::Custom { id, argument } => LayoutCommand::Custom {
            id,
            value: registry
                .parse_command_argument(id, argument)
                .ok_or(ErrorKind::MalformedArgument)?,
        },
    };
    Ok(Resolved::Command(command))
}
