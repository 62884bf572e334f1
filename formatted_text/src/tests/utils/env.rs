// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::color::palette::css;

use crate::{
    Error, FontId, FontMetrics, GlyphData, GlyphShaderContext, IconGlyph, MonospaceMetrics,
    Registry, TextLayoutCommandStream, TextLayoutEngine, TextLayoutSettings, TextStyle,
};

/// Advance of every regular glyph.
pub(crate) const ADVANCE: f32 = 10.0;
/// Height of every line of text.
pub(crate) const LINE_HEIGHT: f32 = 20.0;

pub(crate) struct TestEnv {
    pub(crate) registry: Registry,
    pub(crate) metrics: MonospaceMetrics,
    pub(crate) engine: TextLayoutEngine,
    pub(crate) body: FontId,
    pub(crate) heading: FontId,
}

impl TestEnv {
    /// A registry with two fonts, a named color, two styles, a shader, an icon and a custom
    /// command.
    pub(crate) fn new() -> Self {
        let mut registry = Registry::new();
        let body = registry.register_font("body");
        let heading = registry.register_font("heading");
        registry.register_color("accent", css::ORANGE);
        registry.register_style("em", TextStyle::new().italic(true).color(css::GRAY));
        registry.register_style("title", TextStyle::new().bold(true).font(heading));
        registry.register_shader(
            "lift",
            |_: &GlyphShaderContext, glyph: &mut GlyphData, _: usize| glyph.y -= 2.0,
        );
        registry.register_icon("star", IconGlyph::new(12.0, 24.0));
        registry.register_command("wave", |argument| argument?.parse().ok());
        registry.register_command("pause", |argument| match argument {
            None => Some(0),
            Some(_) => None,
        });
        Self {
            registry,
            metrics: MonospaceMetrics {
                advance: ADVANCE,
                bold_extra: 0.0,
                metrics: FontMetrics {
                    ascent: 16.0,
                    descent: 4.0,
                },
            },
            engine: TextLayoutEngine::new(),
            body,
            heading,
        }
    }

    pub(crate) fn settings(&self) -> TextLayoutSettings {
        TextLayoutSettings::new(self.body)
    }

    pub(crate) fn try_layout(
        &mut self,
        source: &str,
        settings: &TextLayoutSettings,
    ) -> Result<TextLayoutCommandStream, Error> {
        self.engine
            .layout(source, settings, &self.registry, &self.metrics)
    }

    pub(crate) fn layout(
        &mut self,
        source: &str,
        settings: &TextLayoutSettings,
    ) -> TextLayoutCommandStream {
        self.try_layout(source, settings)
            .unwrap_or_else(|err| panic!("layout of {source:?} failed: {err}"))
    }

    /// Lays out `source` with an unbounded box.
    pub(crate) fn layout_unbounded(&mut self, source: &str) -> TextLayoutCommandStream {
        let settings = self.settings();
        self.layout(source, &settings)
    }
}
