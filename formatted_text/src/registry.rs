// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named resources referenced from formatted text.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::{CustomCommandId, FontId, GlyphShader, IconGlyph, IconId, ShaderId, StyleId, TextStyle};

type CustomParser = Box<dyn Fn(Option<&str>) -> Option<u32> + Send + Sync>;

struct CustomCommand {
    name: String,
    parse: CustomParser,
}

/// The set of fonts, styles, colors, glyph shaders, icons and custom commands that formatted
/// text may refer to by name.
///
/// A registry is built by the host application and is read-only during layout, so one registry
/// can serve any number of concurrent layout passes.
#[derive(Default)]
pub struct Registry {
    fonts: Vec<String>,
    font_names: HashMap<String, FontId>,
    styles: Vec<TextStyle>,
    style_names: HashMap<String, StyleId>,
    colors: HashMap<String, Color>,
    shaders: Vec<Arc<dyn GlyphShader>>,
    shader_names: HashMap<String, ShaderId>,
    icons: Vec<IconGlyph>,
    icon_names: HashMap<String, IconId>,
    custom: Vec<CustomCommand>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("fonts", &self.fonts)
            .field("styles", &self.style_names.len())
            .field("colors", &self.colors.len())
            .field("shaders", &self.shaders.len())
            .field("icons", &self.icons.len())
            .field("custom", &self.custom.len())
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a font under `name`, returning its handle.
    ///
    /// Registering the same name twice returns the existing handle.
    pub fn register_font(&mut self, name: &str) -> FontId {
        if let Some(id) = self.font_names.get(name) {
            return *id;
        }
        let id = FontId::new(self.fonts.len());
        self.fonts.push(name.to_string());
        self.font_names.insert(name.to_string(), id);
        id
    }

    /// Registers a style under `name`, replacing any style previously registered under it.
    pub fn register_style(&mut self, name: &str, style: TextStyle) -> StyleId {
        if let Some(&id) = self.style_names.get(name) {
            self.styles[id.index()] = style;
            return id;
        }
        let id = StyleId::new(self.styles.len());
        self.styles.push(style);
        self.style_names.insert(name.to_string(), id);
        id
    }

    /// Registers a named color.
    ///
    /// Registered names take precedence over CSS color keywords.
    pub fn register_color(&mut self, name: &str, color: Color) {
        self.colors.insert(name.to_string(), color);
    }

    /// Registers a glyph shader under `name`.
    pub fn register_shader(&mut self, name: &str, shader: impl GlyphShader + 'static) -> ShaderId {
        let shader: Arc<dyn GlyphShader> = Arc::new(shader);
        if let Some(&id) = self.shader_names.get(name) {
            self.shaders[id.index()] = shader;
            return id;
        }
        let id = ShaderId::new(self.shaders.len());
        self.shaders.push(shader);
        self.shader_names.insert(name.to_string(), id);
        id
    }

    /// Registers an icon under `name`.
    pub fn register_icon(&mut self, name: &str, icon: IconGlyph) -> IconId {
        if let Some(&id) = self.icon_names.get(name) {
            self.icons[id.index()] = icon;
            return id;
        }
        let id = IconId::new(self.icons.len());
        self.icons.push(icon);
        self.icon_names.insert(name.to_string(), id);
        id
    }

    /// Registers a custom command.
    ///
    /// `parse` receives the command's argument, if any, and returns the opaque value recorded in
    /// the command stream, or `None` if the argument is malformed. Command names are matched
    /// without regard to ASCII case. Built-in commands take precedence over custom commands of
    /// the same name.
    pub fn register_command(
        &mut self,
        name: &str,
        parse: impl Fn(Option<&str>) -> Option<u32> + Send + Sync + 'static,
    ) -> CustomCommandId {
        let parse: CustomParser = Box::new(parse);
        if let Some(id) = self.command_id(name) {
            self.custom[id.index()].parse = parse;
            return id;
        }
        let id = CustomCommandId::new(self.custom.len());
        self.custom.push(CustomCommand {
            name: name.to_string(),
            parse,
        });
        id
    }

    /// Looks up a font by name.
    pub fn font_id(&self, name: &str) -> Option<FontId> {
        self.font_names.get(name).copied()
    }

    /// Returns the name a font was registered under.
    pub fn font_name(&self, id: FontId) -> Option<&str> {
        self.fonts.get(id.index()).map(String::as_str)
    }

    /// Looks up a style by name.
    pub fn style_id(&self, name: &str) -> Option<StyleId> {
        self.style_names.get(name).copied()
    }

    /// Returns a registered style.
    pub fn style(&self, id: StyleId) -> Option<&TextStyle> {
        self.styles.get(id.index())
    }

    /// Resolves a color by registered name or, failing that, by CSS color syntax
    /// (`#rrggbb`, `#rrggbbaa`, `rgb(...)`, keywords such as `red`).
    pub fn color(&self, name: &str) -> Option<Color> {
        if let Some(color) = self.colors.get(name) {
            return Some(*color);
        }
        parse_color(name)
            .ok()
            .map(|color| color.to_alpha_color::<Srgb>())
    }

    /// Looks up a glyph shader by name.
    pub fn shader_id(&self, name: &str) -> Option<ShaderId> {
        self.shader_names.get(name).copied()
    }

    /// Returns a registered glyph shader.
    pub fn shader(&self, id: ShaderId) -> Option<&dyn GlyphShader> {
        self.shaders.get(id.index()).map(|shader| &**shader)
    }

    /// Looks up an icon by name.
    pub fn icon_id(&self, name: &str) -> Option<IconId> {
        self.icon_names.get(name).copied()
    }

    /// Returns a registered icon.
    pub fn icon(&self, id: IconId) -> Option<&IconGlyph> {
        self.icons.get(id.index())
    }

    /// Looks up a custom command by name, ignoring ASCII case.
    pub fn command_id(&self, name: &str) -> Option<CustomCommandId> {
        self.custom
            .iter()
            .position(|command| command.name.eq_ignore_ascii_case(name))
            .map(CustomCommandId::new)
    }

    /// Returns the name a custom command was registered under.
    pub fn command_name(&self, id: CustomCommandId) -> Option<&str> {
        self.custom
            .get(id.index())
            .map(|command| command.name.as_str())
    }

    /// Runs a custom command's argument parser.
    pub(crate) fn parse_command_argument(
        &self,
        id: CustomCommandId,
        argument: Option<&str>,
    ) -> Option<u32> {
        self.custom
            .get(id.index())
            .and_then(|command| (command.parse)(argument))
    }
}
