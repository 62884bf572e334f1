// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use formatted_text::{
    FontId, GlyphData, GlyphShaderContext, GlyphSink, IconPlacement, LayoutCommand,
    MonospaceMetrics, Registry, TextLayoutCommandStream,
};
use uvml::{TypeDescriptor, TypeRegistry, ValueType};

/// Every glyph is 10px wide and every line 20px tall.
pub(crate) fn metrics() -> MonospaceMetrics {
    MonospaceMetrics::new(10.0, 20.0)
}

/// A formatted text registry with one font.
pub(crate) fn text_registry() -> (Registry, FontId) {
    let mut registry = Registry::new();
    let body = registry.register_font("body");
    (registry, body)
}

/// Widget types for markup tests.
pub(crate) fn type_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDescriptor::new("UIElement")
                .with_property("Width", ValueType::Number)
                .with_property("Foreground", ValueType::Color)
                .with_event("Click"),
        )
        .register(
            TypeDescriptor::new("StackPanel")
                .with_base("UIElement")
                .with_collection("Children", ValueType::Element)
                .with_content_property("Children"),
        )
        .register(
            TypeDescriptor::new("TextBlock")
                .with_base("UIElement")
                .with_property("Text", ValueType::String)
                .with_content_property("Text"),
        );
    registry
}

/// Names the commands of a stream, with the text of each run.
pub(crate) fn describe(stream: &TextLayoutCommandStream) -> Vec<String> {
    stream
        .commands()
        .iter()
        .map(|command| match command {
            LayoutCommand::Text(run) => format!("text {:?}", stream.glyph_text(run.glyphs())),
            LayoutCommand::LineBreak(_) => "break".into(),
            LayoutCommand::PushColor(_) => "push color".into(),
            LayoutCommand::PopColor => "pop color".into(),
            LayoutCommand::Bold(bold) => format!("bold {bold}"),
            LayoutCommand::PushFont(_) => "push font".into(),
            LayoutCommand::PopFont => "pop font".into(),
            LayoutCommand::PushStyle(_) => "push style".into(),
            LayoutCommand::PopStyle => "pop style".into(),
            other => format!("{other:?}"),
        })
        .collect()
}

/// Collects the glyphs of a draw pass.
#[derive(Default)]
pub(crate) struct Glyphs(pub(crate) Vec<GlyphData>);

impl GlyphSink for Glyphs {
    fn glyph(&mut self, _: &GlyphShaderContext, glyph: GlyphData) {
        self.0.push(glyph);
    }

    fn icon(&mut self, _: IconPlacement) {}
}

/// The glyph text of each line.
pub(crate) fn line_texts(stream: &TextLayoutCommandStream) -> Vec<String> {
    stream
        .lines()
        .iter()
        .map(|line| stream.glyph_text(line.glyphs()))
        .collect()
}
