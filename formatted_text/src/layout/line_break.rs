// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use alloc::vec::Vec;

use super::shape::{ItemKind, LayoutData};
use crate::{BreakReason, FontMetrics};

/// A position between glyphs: an item and a glyph offset within it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Position {
    pub(crate) item: usize,
    pub(crate) glyph: usize,
}

impl Position {
    fn item_start(item: usize) -> Self {
        Self { item, glyph: 0 }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct LineData {
    /// First position of the line, inclusive.
    pub(crate) start: Position,
    /// End of the line, exclusive.
    pub(crate) end: Position,
    pub(crate) width: f32,
    pub(crate) trailing_whitespace: f32,
    pub(crate) metrics: FontMetrics,
    pub(crate) break_reason: BreakReason,
}

#[derive(Clone, Debug, Default)]
struct LineState {
    start: Position,
    x: f32,
    /// Width of the breaking whitespace at the end of the line so far.
    trailing: f32,
    has_glyphs: bool,
    /// The largest ascent and descent of the glyphs on the line so far.
    metrics: FontMetrics,
    /// Metrics of the most recent item visited while the line was empty. An empty line takes
    /// its height from the font active where it ends.
    fallback: FontMetrics,
}

impl LineState {
    fn new(start: Position, fallback: FontMetrics) -> Self {
        Self {
            start,
            fallback,
            ..Self::default()
        }
    }

    fn include(&mut self, metrics: FontMetrics) {
        self.metrics.ascent = self.metrics.ascent.max(metrics.ascent);
        self.metrics.descent = self.metrics.descent.max(metrics.descent);
    }

    fn line_metrics(&self) -> FontMetrics {
        if self.has_glyphs {
            self.metrics
        } else {
            self.fallback
        }
    }
}

/// Breaks the items of `data` into lines.
///
/// Lines break greedily at breaking whitespace when the next unbreakable unit would extend past
/// `max_advance`. Breaking whitespace hangs past the end of the line instead of causing a
/// break. A unit that does not fit on an empty line is broken between glyphs, with at least one
/// glyph per line.
pub(crate) struct BreakLines<'a> {
    data: &'a LayoutData,
    max_advance: Option<f32>,
    max_height: Option<f32>,
    lines: &'a mut Vec<LineData>,
    /// The bottom of the last committed line.
    committed_y: f64,
    truncated: bool,
}

impl<'a> BreakLines<'a> {
    pub(crate) fn new(
        data: &'a LayoutData,
        max_advance: Option<f32>,
        max_height: Option<f32>,
        lines: &'a mut Vec<LineData>,
    ) -> Self {
        lines.clear();
        Self {
            data,
            max_advance,
            max_height,
            lines,
            committed_y: 0.0,
            truncated: false,
        }
    }

    /// Breaks all lines, returning `true` if lines were dropped to honor the maximum height.
    ///
    /// At least one line is always produced.
    pub(crate) fn break_all(mut self, default_metrics: FontMetrics) -> bool {
        let data = self.data;
        let items = &data.items;
        let mut pos = Position::default();
        let mut line = LineState::new(pos, default_metrics);

        while pos.item < items.len() {
            let item = &items[pos.item];
            if !line.has_glyphs {
                line.fallback = item.metrics;
            }
            match item.kind {
                ItemKind::Command(_) => pos = Position::item_start(pos.item + 1),
                ItemKind::NewLine => {
                    let end = Position::item_start(pos.item + 1);
                    if !self.commit(&line, end, BreakReason::Explicit) {
                        return true;
                    }
                    pos = end;
                    line = LineState::new(pos, item.metrics);
                }
                ItemKind::Space => {
                    let width = data.item_width(item, pos.glyph);
                    line.x += width;
                    line.trailing += width;
                    line.include(item.metrics);
                    line.has_glyphs = true;
                    pos = Position::item_start(pos.item + 1);
                }
                ItemKind::Text | ItemKind::NonBreakingSpace | ItemKind::Icon(_) => {
                    let unit_end = self.unit_end(pos.item);
                    let width = self.unit_width(pos, unit_end);
                    let fits = self.max_advance.is_none_or(|max| line.x + width <= max);
                    if fits {
                        for item in &items[pos.item..unit_end] {
                            if item.glyph_len() > 0 {
                                line.include(item.metrics);
                            }
                        }
                        line.x += width;
                        line.trailing = 0.0;
                        line.has_glyphs = true;
                        pos = Position::item_start(unit_end);
                    } else if line.has_glyphs {
                        if !self.commit(&line, pos, BreakReason::Regular) {
                            return true;
                        }
                        line = LineState::new(pos, line.fallback);
                    } else {
                        match self.emergency_split(&mut line, pos, unit_end) {
                            Some(split) => {
                                if !self.commit(&line, split, BreakReason::Emergency) {
                                    return true;
                                }
                                pos = split;
                                line = LineState::new(pos, line.fallback);
                            }
                            None => pos = Position::item_start(unit_end),
                        }
                    }
                }
            }
        }

        // The final line. Skip it only when it would be an empty line left behind by a wrap.
        let wrapped_into_nothing = !line.has_glyphs
            && line.start.item >= items.len()
            && self
                .lines
                .last()
                .is_some_and(|last| last.break_reason != BreakReason::Explicit);
        if !wrapped_into_nothing {
            self.commit(&line, Position::item_start(items.len()), BreakReason::None);
        }
        self.truncated
    }

    /// The end of the unbreakable unit starting at `item`: a maximal run of text, non-breaking
    /// whitespace and commands, or a single icon.
    fn unit_end(&self, item: usize) -> usize {
        let items = &self.data.items;
        if matches!(items[item].kind, ItemKind::Icon(_)) {
            return item + 1;
        }
        let mut end = item;
        while end < items.len() && items[end].kind.joins_unit() {
            end += 1;
        }
        end
    }

    fn unit_width(&self, start: Position, end: usize) -> f32 {
        let items = &self.data.items;
        let mut width = 0.0;
        for (i, item) in items.iter().enumerate().take(end).skip(start.item) {
            let offset = if i == start.item { start.glyph } else { 0 };
            width += self.data.item_width(item, offset);
        }
        width
    }

    /// Places glyphs of the unit onto the empty `line` until the next one would overflow.
    ///
    /// Returns the position of the first glyph that did not fit, or `None` if the whole unit was
    /// placed.
    fn emergency_split(
        &self,
        line: &mut LineState,
        start: Position,
        unit_end: usize,
    ) -> Option<Position> {
        let max = self.max_advance.unwrap_or(f32::INFINITY);
        let items = &self.data.items;
        for (i, item) in items.iter().enumerate().take(unit_end).skip(start.item) {
            let offset = if i == start.item { start.glyph } else { 0 };
            for g in offset..item.glyph_len() {
                let advance = self.data.glyphs[item.glyphs.start + g].advance;
                if line.has_glyphs && line.x + advance > max {
                    return Some(Position { item: i, glyph: g });
                }
                line.x += advance;
                line.trailing = 0.0;
                line.has_glyphs = true;
                line.include(item.metrics);
            }
        }
        None
    }

    /// Commits `line`, ending at `end`. Returns `false`, and commits nothing, if the line would
    /// extend past the maximum height. The first line is always committed.
    fn commit(&mut self, line: &LineState, end: Position, reason: BreakReason) -> bool {
        let metrics = line.line_metrics();
        let bottom = self.committed_y + f64::from(metrics.line_height());
        if let Some(max_height) = self.max_height {
            if !self.lines.is_empty() && bottom > f64::from(max_height) {
                self.truncated = true;
                return false;
            }
        }
        self.committed_y = bottom;
        self.lines.push(LineData {
            start: line.start,
            end,
            width: line.x - line.trailing,
            trailing_whitespace: line.trailing,
            metrics,
            break_reason: reason,
        });
        true
    }
}
