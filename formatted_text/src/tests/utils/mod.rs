// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod env;
mod sink;

pub(crate) use env::{ADVANCE, LINE_HEIGHT, TestEnv};
pub(crate) use sink::RecordingSink;

use alloc::string::String;
use alloc::vec::Vec;

use crate::{LayoutCommand, StackKind, TextLayoutCommandStream};

/// The text of each line, including hanging whitespace.
pub(crate) fn line_texts(stream: &TextLayoutCommandStream) -> Vec<String> {
    stream
        .lines()
        .iter()
        .map(|line| stream.glyph_text(line.glyphs()))
        .collect()
}

/// The stack touched by a push or pop command, and whether it is a push.
pub(crate) fn stack_effect(command: &LayoutCommand) -> Option<(StackKind, bool)> {
    Some(match command {
        LayoutCommand::PushStyle(_) => (StackKind::Style, true),
        LayoutCommand::PopStyle => (StackKind::Style, false),
        LayoutCommand::PushFont(_) => (StackKind::Font, true),
        LayoutCommand::PopFont => (StackKind::Font, false),
        LayoutCommand::PushColor(_) => (StackKind::Color, true),
        LayoutCommand::PopColor => (StackKind::Color, false),
        LayoutCommand::PushGlyphShader(_) => (StackKind::GlyphShader, true),
        LayoutCommand::PopGlyphShader => (StackKind::GlyphShader, false),
        LayoutCommand::PushLink(_) => (StackKind::Link, true),
        LayoutCommand::PopLink => (StackKind::Link, false),
        _ => return None,
    })
}

/// Asserts that every pop in the stream matches an earlier push on the same stack and that
/// nothing is left open at the end.
pub(crate) fn assert_balanced(stream: &TextLayoutCommandStream) {
    let mut depths = [0_usize; 5];
    for command in stream {
        if let Some((kind, push)) = stack_effect(command) {
            let depth = &mut depths[kind as usize];
            if push {
                *depth += 1;
            } else {
                assert!(
                    *depth > 0,
                    "unmatched {command:?} in {:?}",
                    stream.commands()
                );
                *depth -= 1;
            }
        }
    }
    assert_eq!(depths, [0; 5], "unclosed pushes in {:?}", stream.commands());
}

/// The commands of the stream with text runs replaced by their text, for compact assertions.
pub(crate) fn describe(stream: &TextLayoutCommandStream) -> Vec<String> {
    stream
        .iter()
        .map(|command| match command {
            LayoutCommand::Text(run) => {
                alloc::format!("text {:?}", stream.glyph_text(run.glyphs()))
            }
            LayoutCommand::Icon(_) => String::from("icon"),
            LayoutCommand::LineBreak(_) => String::from("break"),
            LayoutCommand::Bold(bold) => alloc::format!("bold {bold}"),
            LayoutCommand::Italic(italic) => alloc::format!("italic {italic}"),
            LayoutCommand::PushStyle(_) => String::from("push style"),
            LayoutCommand::PopStyle => String::from("pop style"),
            LayoutCommand::PushFont(_) => String::from("push font"),
            LayoutCommand::PopFont => String::from("pop font"),
            LayoutCommand::PushColor(_) => String::from("push color"),
            LayoutCommand::PopColor => String::from("pop color"),
            LayoutCommand::PushGlyphShader(_) => String::from("push shader"),
            LayoutCommand::PopGlyphShader => String::from("pop shader"),
            LayoutCommand::PushLink(_) => String::from("push link"),
            LayoutCommand::PopLink => String::from("pop link"),
            LayoutCommand::Custom { value, .. } => alloc::format!("custom {value}"),
        })
        .collect()
}
