// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{build, handlers, named, number, registry};
use crate::{ErrorKind, InstantiationOptions, Value, ValueType, instantiate};

const WINDOW: &str = r##"
<Grid Name="root" Class="window dark">
    <Button Name="ok" Click="OnOk" Grid.Row="1" Width="120">
        <Button.Content>
            <TextBlock Name="label">OK</TextBlock>
        </Button.Content>
    </Button>
    <ComboBox Name="choices" IsEnabled="False" Foreground="#ff0000">
        <ComboBox.Items>Red</ComboBox.Items>
        Blue
    </ComboBox>
    <TextBlock Name="status" Text="Ready">
        <Grid.Row>2</Grid.Row>
    </TextBlock>
</Grid>
"##;

#[test]
fn builds_elements_in_document_order() {
    let registry = registry();
    let tree = build(WINDOW, &registry);

    let types: Vec<_> = tree.iter().map(|element| element.type_name()).collect();
    assert_eq!(
        types,
        ["Grid", "Button", "TextBlock", "ComboBox", "TextBlock"]
    );
    let root = tree.root();
    assert_eq!(root.name(), Some("root"));
    assert!(root.parent().is_none());
    let children: Vec<_> = root.children().map(|child| child.name()).collect();
    assert_eq!(children, [Some("ok"), Some("choices"), Some("status")]);

    let label = named(&tree, "label");
    assert_eq!(label.parent().unwrap().id(), named(&tree, "ok").id());
}

#[test]
fn content_collects_into_the_content_property() {
    let registry = registry();
    let tree = build(WINDOW, &registry);
    let ids: Vec<_> = tree
        .root()
        .children()
        .map(|child| Value::Element(child.id()))
        .collect();
    assert_eq!(tree.root().local_value("Children"), Some(&Value::List(ids)));
}

#[test]
fn attributes_convert_to_property_types() {
    let registry = registry();
    let tree = build(WINDOW, &registry);

    let ok = named(&tree, "ok");
    assert_eq!(ok.local_value("Width"), Some(&number(120.0)));
    let choices = named(&tree, "choices");
    assert_eq!(choices.value("IsEnabled"), Some(&Value::Bool(false)));
    assert_eq!(
        choices.value("Foreground"),
        Value::convert(ValueType::Color, "red").as_ref()
    );
    assert_eq!(
        named(&tree, "status").value("Text"),
        Some(&Value::from("Ready"))
    );
}

#[test]
fn name_and_class_are_reserved() {
    let registry = registry();
    let tree = build(WINDOW, &registry);
    let root = tree.root();
    assert_eq!(root.classes().collect::<Vec<_>>(), ["window", "dark"]);
    assert!(root.local_value("Name").is_none());
    assert!(tree.find_by_name("missing").is_none());
}

#[test]
fn property_elements_set_their_property() {
    let registry = registry();
    let tree = build(WINDOW, &registry);
    let ok = named(&tree, "ok");
    let label = named(&tree, "label");
    assert_eq!(ok.value("Content"), Some(&Value::Element(label.id())));
    assert_eq!(label.value("Text"), Some(&Value::from("OK")));
}

#[test]
fn attached_properties_use_the_owner_type() {
    let registry = registry();
    let tree = build(WINDOW, &registry);
    assert_eq!(
        named(&tree, "ok").value("Grid.Row"),
        Some(&Value::Integer(1))
    );
    assert_eq!(
        named(&tree, "status").value("Grid.Row"),
        Some(&Value::Integer(2))
    );
    // Not set anywhere, so the owner's default applies.
    assert_eq!(
        named(&tree, "label").value("Grid.Row"),
        Some(&Value::Integer(0))
    );
}

#[test]
fn collection_items_accumulate() {
    let registry = registry();
    let tree = build(WINDOW, &registry);
    assert_eq!(
        named(&tree, "choices").value("Items"),
        Some(&Value::List(vec!["Red".into(), "Blue".into()]))
    );
}

#[test]
fn event_attributes_attach_handlers() {
    let registry = registry();
    let handlers = handlers();
    let tree = instantiate(
        WINDOW,
        &registry,
        &handlers,
        InstantiationOptions::default(),
    )
    .unwrap();
    let ok = named(&tree, "ok");

    let mut raised = Vec::new();
    let count = tree.raise(ok.id(), "Click", |handler| raised.push(handler));
    assert_eq!(count, 1);
    assert_eq!(raised, [handlers.get("OnOk").unwrap()]);
    assert_eq!(tree.raise(ok.id(), "Loaded", |_| panic!("no handler")), 0);
}

fn error_kind(markup: &str) -> ErrorKind {
    let registry = registry();
    instantiate(
        markup,
        &registry,
        &handlers(),
        InstantiationOptions::default(),
    )
    .unwrap_err()
    .kind()
    .clone()
}

#[test]
fn reports_errors() {
    assert!(matches!(
        error_kind("<Panel><Slider/></Panel>"),
        ErrorKind::UnknownType(name) if name == "Slider"
    ));
    assert!(matches!(
        error_kind(r#"<Panel Height="3"/>"#),
        ErrorKind::UnknownMember { member, .. } if member == "Height"
    ));
    assert!(matches!(
        error_kind(r#"<Panel Width="wide"/>"#),
        ErrorKind::InvalidValue { expected: ValueType::Number, .. }
    ));
    assert!(matches!(
        error_kind(r#"<Panel><Button Click="OnMissing"/></Panel>"#),
        ErrorKind::UnknownHandler(name) if name == "OnMissing"
    ));
    assert!(matches!(
        error_kind(r#"<Panel Children="x"/>"#),
        ErrorKind::CollectionMisuse(_)
    ));
    assert!(matches!(
        error_kind("<Panel><Button><TextBlock/><TextBlock/></Button></Panel>"),
        ErrorKind::CollectionMisuse(member) if member == "Content"
    ));
    assert!(matches!(
        error_kind("<Panel><Resource>text</Resource></Panel>"),
        ErrorKind::NoContentProperty(name) if name == "Resource"
    ));
    assert!(matches!(
        error_kind(r#"<Panel><Button Name="a"/><Button Name="a"/></Panel>"#),
        ErrorKind::DuplicateName(name) if name == "a"
    ));
    assert!(matches!(
        error_kind("<Resource/>"),
        ErrorKind::InvalidRoot { .. }
    ));
    assert!(matches!(error_kind("<Panel>"), ErrorKind::Xml(_)));
}

#[test]
fn errors_carry_position_and_source() {
    let registry = registry();
    let err = instantiate(
        "<Panel>\n  <Slider/>\n</Panel>",
        &registry,
        &handlers(),
        InstantiationOptions::default(),
    )
    .unwrap_err();
    assert_eq!((err.line(), err.column()), (2, 3));
    assert_eq!(err.to_string(), "unknown type `Slider` at 2:3");
    assert!(core::error::Error::source(&err).is_none());

    let err = instantiate(
        "<Panel>",
        &registry,
        &handlers(),
        InstantiationOptions::default(),
    )
    .unwrap_err();
    assert!(core::error::Error::source(&err).is_some());
}

#[test]
fn options_relax_checks() {
    let registry = registry();
    let options = InstantiationOptions::default()
        .with_ignore_unknown_attributes(true)
        .with_root_type(None);
    let tree = instantiate(
        r#"<Resource Key="k" Color="red"/>"#,
        &registry,
        &handlers(),
        options,
    )
    .unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().value("Key"), Some(&Value::from("k")));
    assert!(tree.root().value("Color").is_none());
}
