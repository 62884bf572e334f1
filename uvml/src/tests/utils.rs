// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    Element, ElementTree, HandlerTable, InstantiationOptions, TypeDescriptor, TypeRegistry, Value,
    ValueType, instantiate,
};

/// A small widget library.
pub(crate) fn registry() -> TypeRegistry {
    let resource = TypeDescriptor::new("Resource").with_property("Key", ValueType::String);
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeDescriptor::new("UIElement")
                .with_property("Width", ValueType::Number)
                .with_default("Opacity", ValueType::Number, 1.0)
                .with_default("IsEnabled", ValueType::Bool, true)
                .with_property("Foreground", ValueType::Color)
                .with_event("Loaded"),
        )
        .register(
            TypeDescriptor::new("Panel")
                .with_base("UIElement")
                .with_collection("Children", ValueType::Element)
                .with_content_property("Children"),
        )
        .register(
            TypeDescriptor::new("Grid")
                .with_base("Panel")
                .with_default("Row", ValueType::Integer, 0_i64),
        )
        .register(
            TypeDescriptor::new("Button")
                .with_base("UIElement")
                .with_property("Content", ValueType::Element)
                .with_content_property("Content")
                .with_event("Click"),
        )
        .register(
            TypeDescriptor::new("TextBlock")
                .with_base("UIElement")
                .with_property("Text", ValueType::String)
                .with_content_property("Text"),
        )
        .register(
            TypeDescriptor::new("ComboBox")
                .with_base("UIElement")
                .with_collection("Items", ValueType::String)
                .with_content_property("Items")
                .with_event("SelectionChanged"),
        )
        .register(resource);
    registry
}

pub(crate) fn handlers() -> HandlerTable {
    let mut handlers = HandlerTable::new();
    handlers.register("OnOk");
    handlers.register("OnCancel");
    handlers
}

pub(crate) fn build<'r>(markup: &str, registry: &'r TypeRegistry) -> ElementTree<'r> {
    instantiate(
        markup,
        registry,
        &handlers(),
        InstantiationOptions::default(),
    )
    .unwrap()
}

pub(crate) fn named<'t>(tree: &'t ElementTree<'_>, name: &str) -> Element<'t> {
    tree.find_by_name(name)
        .unwrap_or_else(|| panic!("no element named {name}"))
}

pub(crate) fn number(value: f64) -> Value {
    Value::Number(value)
}
