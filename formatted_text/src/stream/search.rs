// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing.

use smallvec::SmallVec;

use super::{LayoutCommand, LineInfo, TextLayoutCommandStream};
use crate::LinkId;

impl TextLayoutCommandStream {
    /// The line whose vertical extent contains `y`, edges included.
    ///
    /// A point on the boundary between two lines belongs to the upper line.
    pub fn line_at(&self, y: f32) -> Option<usize> {
        let index = self.lines.partition_point(|line| line.bottom() < y);
        let line = self.lines.get(index)?;
        (y >= line.y).then_some(index)
    }

    /// The line vertically nearest to `y`.
    pub fn nearest_line(&self, y: f32) -> usize {
        let index = self.lines.partition_point(|line| line.bottom() < y);
        index.min(self.lines.len() - 1)
    }

    /// The glyph nearest to the point, if the point lies within the vertical extent of a line
    /// that holds glyphs.
    ///
    /// Within a line, the glyph whose horizontal extent contains `x` is returned. A point on the
    /// boundary between two glyphs resolves to the earlier one, and points past either end of
    /// the line resolve to the first or last glyph.
    ///
    /// A point above the first line or below the last yields `None` rather than clamping.
    /// [`search_glyphs_snap_to_line`](Self::search_glyphs_snap_to_line) clamps instead.
    pub fn search_glyphs(&self, x: f32, y: f32) -> Option<usize> {
        let line = self.line_at(y)?;
        self.nearest_glyph_on_line(&self.lines[line], x)
    }

    /// Like [`search_glyphs`](Self::search_glyphs), but a point above or below every line
    /// searches the vertically nearest line.
    pub fn search_glyphs_snap_to_line(&self, x: f32, y: f32) -> Option<usize> {
        let line = self.nearest_line(y);
        self.nearest_glyph_on_line(&self.lines[line], x)
    }

    /// The insertion point nearest to the point: the index of the glyph a caret at the point
    /// would precede.
    ///
    /// Points outside the layout snap to the nearest line. A point on the right half of a glyph
    /// yields the index after it. An empty line yields the index of its first position.
    pub fn search_insertion_points(&self, x: f32, y: f32) -> usize {
        let line = &self.lines[self.nearest_line(y)];
        match self.nearest_glyph_on_line(line, x) {
            Some(index) => {
                let glyph = &self.glyphs[index];
                if x > glyph.x + glyph.advance * 0.5 {
                    index + 1
                } else {
                    index
                }
            }
            None => line.glyphs.start,
        }
    }

    /// The innermost link under the point, if any.
    pub fn search_links(&self, x: f32, y: f32) -> Option<LinkId> {
        let index = self.search_glyphs(x, y)?;
        let bounds = self.glyph_bounds(index)?;
        if !bounds.contains(x, y) {
            return None;
        }
        self.link_at_glyph(index)
    }

    /// The innermost link containing the glyph at `index`.
    pub fn link_at_glyph(&self, index: usize) -> Option<LinkId> {
        let mut links: SmallVec<[LinkId; 2]> = SmallVec::new();
        for command in &self.commands {
            match *command {
                LayoutCommand::PushLink(link) => links.push(link),
                LayoutCommand::PopLink => {
                    links.pop();
                }
                LayoutCommand::Text(run) if run.glyphs().contains(&index) => {
                    return links.last().copied();
                }
                LayoutCommand::Icon(icon) if icon.glyph as usize == index => {
                    return links.last().copied();
                }
                _ => {}
            }
        }
        None
    }

    fn nearest_glyph_on_line(&self, line: &LineInfo, x: f32) -> Option<usize> {
        let glyphs = &self.glyphs[line.glyphs.clone()];
        if glyphs.is_empty() {
            return None;
        }
        let offset = glyphs
            .partition_point(|glyph| glyph.x + glyph.advance < x)
            .min(glyphs.len() - 1);
        Some(line.glyphs.start + offset)
    }
}
