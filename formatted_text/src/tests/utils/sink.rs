// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::{CustomCommandId, GlyphData, GlyphShaderContext, GlyphSink, IconPlacement};

/// Records everything a draw pass produces.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) glyphs: Vec<(GlyphShaderContext, GlyphData)>,
    pub(crate) icons: Vec<IconPlacement>,
    pub(crate) custom: Vec<(CustomCommandId, u32)>,
}

impl GlyphSink for RecordingSink {
    fn glyph(&mut self, cx: &GlyphShaderContext, glyph: GlyphData) {
        self.glyphs.push((*cx, glyph));
    }

    fn icon(&mut self, icon: IconPlacement) {
        self.icons.push(icon);
    }

    fn custom(&mut self, id: CustomCommandId, value: u32) {
        self.custom.push((id, value));
    }
}
