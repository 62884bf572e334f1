// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup is instantiated, styled and bound, then every text block is laid out.

use formatted_text::{
    Registry, TextLayoutCommandStream, TextLayoutEngine, TextLayoutSettings, escape,
};
use peniko::color::palette::css;
use uvml::{Element, HandlerTable, InstantiationOptions, Value, instantiate};
use uvss::StyleSheet;

use crate::util::{Glyphs, line_texts, metrics, text_registry, type_registry};

const PAGE: &str = r#"
<StackPanel>
    <TextBlock Name="greeting" Class="title">Hello |c:red|world|/c|!</TextBlock>
    <TextBlock Name="wrapped">alpha beta gamma</TextBlock>
    <TextBlock Name="broken">oops |c:red</TextBlock>
    <TextBlock Name="unknown">|sparkle|shiny</TextBlock>
    <TextBlock Name="path">|sparkle|C:\ dir</TextBlock>
    <TextBlock Name="bound" Text="{{ user.name }}"/>
</StackPanel>
"#;

const SHEET: &str = "
TextBlock { Width: 101; }
.title { Width: 1000; Foreground: blue; }
";

/// Lays out an element's text with settings taken from its properties. Text that is not
/// valid formatted text is laid out literally instead.
fn layout_text_block(
    engine: &mut TextLayoutEngine,
    registry: &Registry,
    element: Element<'_>,
) -> TextLayoutCommandStream {
    let font = registry.font_id("body").unwrap();
    let mut settings = TextLayoutSettings::new(font);
    if let Some(width) = element.value("Width").and_then(Value::as_number) {
        settings = settings.with_width(width as f32);
    }
    if let Some(Value::Color(color)) = element.value("Foreground") {
        settings = settings.with_color(*color);
    }
    let text = element.value("Text").and_then(Value::as_str).unwrap_or("");
    match engine.layout(text, &settings, registry, &metrics()) {
        Ok(stream) => stream,
        Err(err) if err.is_lex_error() || err.is_parse_error() => engine
            .layout(&escape(text), &settings, registry, &metrics())
            .unwrap(),
        Err(err) => panic!("unexpected layout error: {err}"),
    }
}

#[test]
fn styled_markup_lays_out() {
    let types = type_registry();
    let sheet = StyleSheet::parse(SHEET).unwrap();
    let options = InstantiationOptions::default().with_style_sheet(&sheet);
    let tree = instantiate(PAGE, &types, &HandlerTable::new(), options).unwrap();
    let (registry, _) = text_registry();
    let mut engine = TextLayoutEngine::new();

    let greeting = tree.find_by_name("greeting").unwrap();
    let stream = layout_text_block(&mut engine, &registry, greeting);
    assert_eq!(line_texts(&stream), ["Hello world!"]);
    assert_eq!(stream.settings().color, css::BLUE);
    let mut glyphs = Glyphs::default();
    stream.draw(&registry, &mut glyphs);
    assert_eq!(glyphs.0[0].color, css::BLUE);
    assert_eq!(glyphs.0[6].color, css::RED);
    assert_eq!(glyphs.0[11].color, css::BLUE);

    let wrapped = tree.find_by_name("wrapped").unwrap();
    assert_eq!(wrapped.value("Width"), Some(&Value::Number(101.0)));
    let stream = layout_text_block(&mut engine, &registry, wrapped);
    assert_eq!(line_texts(&stream), ["alpha beta ", "gamma"]);
}

#[test]
fn invalid_text_falls_back_to_literal_layout() {
    let types = type_registry();
    let tree = instantiate(
        PAGE,
        &types,
        &HandlerTable::new(),
        InstantiationOptions::default(),
    )
    .unwrap();
    let (registry, _) = text_registry();
    let mut engine = TextLayoutEngine::new();

    let cases = [
        ("broken", "oops |c:red"),
        ("unknown", "|sparkle|shiny"),
        ("path", "|sparkle|C:\\ dir"),
    ];
    for (name, text) in cases {
        let element = tree.find_by_name(name).unwrap();
        let stream = layout_text_block(&mut engine, &registry, element);
        assert_eq!(stream.glyph_text(0..stream.glyph_count()), text);
        assert_eq!(stream.len(), 1, "{name} should be a single run");
    }
}

#[test]
fn bound_text_lays_out_after_update() {
    let types = type_registry();
    let mut tree = instantiate(
        PAGE,
        &types,
        &HandlerTable::new(),
        InstantiationOptions::default(),
    )
    .unwrap();
    let (registry, _) = text_registry();
    let mut engine = TextLayoutEngine::new();

    let bound = tree.find_by_name("bound").unwrap().id();
    let stream = layout_text_block(&mut engine, &registry, tree.get(bound));
    assert_eq!(stream.glyph_count(), 0);

    let updated = tree.update_bindings(&|path: &str| {
        (path == "user.name").then(|| Value::from("|b|Ada|/b|"))
    });
    assert_eq!(updated, 1);
    let stream = layout_text_block(&mut engine, &registry, tree.get(bound));
    assert_eq!(line_texts(&stream), ["Ada"]);
}
