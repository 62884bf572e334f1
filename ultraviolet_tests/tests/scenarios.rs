// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use formatted_text::{
    LayoutCommand, StackKind, TextLayoutEngine, TextLayoutSettings, TokenKind, layout, lex,
};
use peniko::color::palette::css;

use crate::util::{Glyphs, describe, line_texts, metrics, text_registry};

#[test]
fn hello_world() {
    let (registry, body) = text_registry();
    let settings = TextLayoutSettings::new(body).with_width(1000.0);
    let stream = layout("Hello |c:red|world|/c|!", &settings, &registry, &metrics()).unwrap();

    assert_eq!(stream.lines().len(), 1);
    assert_eq!(
        describe(&stream),
        [
            "text \"Hello \"",
            "push color",
            "text \"world\"",
            "pop color",
            "text \"!\""
        ]
    );
    assert_eq!(stream.commands()[1], LayoutCommand::PushColor(css::RED));

    let mut glyphs = Glyphs::default();
    stream.draw(&registry, &mut glyphs);
    let colors: Vec<_> = glyphs.0.iter().map(|glyph| glyph.color).collect();
    assert_eq!(colors.len(), 12);
    assert!(colors[..6].iter().all(|&color| color == css::BLACK));
    assert!(colors[6..11].iter().all(|&color| color == css::RED));
    assert_eq!(colors[11], css::BLACK);
}

#[test]
fn wraps_before_the_overflowing_word() {
    let (registry, body) = text_registry();
    // "alpha beta" is 100px wide.
    let settings = TextLayoutSettings::new(body).with_width(101.0);
    let stream = layout("alpha beta gamma", &settings, &registry, &metrics()).unwrap();

    assert_eq!(line_texts(&stream), ["alpha beta ", "gamma"]);
    assert_eq!(
        stream
            .iter()
            .filter(|command| matches!(command, LayoutCommand::LineBreak(_)))
            .count(),
        1
    );
    let second = &stream.lines()[1];
    let y = second.y() + second.height() * 0.5;
    assert_eq!(stream.search_glyphs_snap_to_line(-50.0, y), Some(11));
    assert_eq!(stream.glyph(11).map(|glyph| glyph.ch), Some('g'));
}

#[test]
fn exact_fit_does_not_wrap() {
    let (registry, body) = text_registry();
    let settings = TextLayoutSettings::new(body).with_width(80.0);
    let stream = layout("abc defg", &settings, &registry, &metrics()).unwrap();
    assert_eq!(line_texts(&stream), ["abc defg"]);

    let settings = TextLayoutSettings::new(body).with_width(79.0);
    let stream = layout("abc defg", &settings, &registry, &metrics()).unwrap();
    assert_eq!(line_texts(&stream), ["abc ", "defg"]);
}

#[test]
fn unmatched_pushes_close_in_reverse() {
    let (registry, body) = text_registry();
    let settings = TextLayoutSettings::new(body);
    let stream = layout("|b||c:red||font:body|x", &settings, &registry, &metrics()).unwrap();

    let tail: Vec<_> = stream.commands().iter().rev().take(2).copied().collect();
    assert_eq!(
        tail,
        [
            LayoutCommand::pop(StackKind::Color),
            LayoutCommand::pop(StackKind::Font),
        ]
    );
    // Bold is a flag rather than a stack, so nothing closes it.
    assert_eq!(stream.commands()[0], LayoutCommand::Bold(true));
}

#[test]
fn plain_text_lexes_without_commands() {
    let source = "plain text\twith\r\nbreaks and \\| escapes";
    let tokens = lex(source).unwrap();
    assert!(
        tokens
            .iter()
            .all(|token| token.kind() != TokenKind::Command)
    );
    let rebuilt: String = tokens.iter().map(|token| token.source_text()).collect();
    assert_eq!(rebuilt, source);
}

#[test]
fn glyph_centers_search_back_to_themselves() {
    let (registry, body) = text_registry();
    let settings = TextLayoutSettings::new(body).with_width(60.0);
    let stream = TextLayoutEngine::new()
        .layout("one |b|two|/b| three four", &settings, &registry, &metrics())
        .unwrap();
    assert!(stream.lines().len() > 1);
    for index in 0..stream.glyph_count() {
        let (x, y) = stream.glyph_bounds(index).unwrap().center();
        assert_eq!(stream.search_glyphs(x, y), Some(index));
    }
}
