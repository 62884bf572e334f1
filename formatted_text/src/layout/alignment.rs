// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal and vertical alignment of laid out lines.

use crate::{
    HorizontalAlignment, LayoutCommand, TextLayoutCommandStream, TextLayoutSettings,
    VerticalAlignment,
};

/// Offsets lines, glyphs and runs according to the alignment settings.
///
/// Lines are aligned within the layout width, or within the widest line when the width is
/// unbounded. Lines wider than the alignment width are left-aligned. The block of lines is
/// aligned vertically only when the layout height is bounded and larger than the block.
pub(crate) fn align(stream: &mut TextLayoutCommandStream, settings: &TextLayoutSettings) {
    let alignment_width = settings
        .width
        .map(|width| width.max(0.0))
        .unwrap_or(stream.width);

    let free_height = settings
        .height
        .map_or(0.0, |height| (height - stream.height).max(0.0));
    let offset_y = match settings.vertical_alignment {
        VerticalAlignment::Top => 0.0,
        VerticalAlignment::Middle => free_height * 0.5,
        VerticalAlignment::Bottom => free_height,
    };

    for line in &mut stream.lines {
        let free_space = alignment_width - line.width;
        let offset_x = if free_space <= 0.0 {
            0.0
        } else {
            match settings.horizontal_alignment {
                HorizontalAlignment::Left => 0.0,
                HorizontalAlignment::Center => free_space * 0.5,
                HorizontalAlignment::Right => free_space,
            }
        };
        line.x += offset_x;
        line.y += offset_y;
        for glyph in &mut stream.glyphs[line.glyphs.clone()] {
            glyph.x += offset_x;
        }
        for command in &mut stream.commands[line.commands.clone()] {
            match command {
                LayoutCommand::Text(run) => {
                    run.x += offset_x;
                    run.y += offset_y;
                }
                LayoutCommand::Icon(icon) => {
                    icon.x += offset_x;
                    icon.y += offset_y;
                }
                _ => {}
            }
        }
    }
}
