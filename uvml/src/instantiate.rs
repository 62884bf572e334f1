// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building an element tree from UVML markup.

use roxmltree::{Document, Node};
use uvss::StyleSheet;

use crate::error::{Error, ErrorKind};
use crate::mutator::{
    CollectionItemMutator, EventHandlerMutator, Mutator, MutatorValue, StandardPropertyMutator,
};
use crate::registry::PropertyKind;
use crate::{ElementId, ElementTree, HandlerTable, TypeRegistry};

/// Options for [`instantiate`].
#[derive(Copy, Clone, Debug)]
pub struct InstantiationOptions<'a> {
    /// Log and skip attributes that name no member instead of failing.
    pub ignore_unknown_attributes: bool,
    /// A style sheet to apply once the tree is built.
    pub style_sheet: Option<&'a StyleSheet>,
    /// The type the root element must derive from, if any.
    pub root_type: Option<&'a str>,
}

impl Default for InstantiationOptions<'_> {
    fn default() -> Self {
        Self {
            ignore_unknown_attributes: false,
            style_sheet: None,
            root_type: Some("UIElement"),
        }
    }
}

impl<'a> InstantiationOptions<'a> {
    /// Sets whether unknown attributes are skipped rather than rejected.
    #[must_use]
    pub fn with_ignore_unknown_attributes(mut self, ignore: bool) -> Self {
        self.ignore_unknown_attributes = ignore;
        self
    }

    /// Applies `sheet` to the tree once it is built.
    #[must_use]
    pub fn with_style_sheet(mut self, sheet: &'a StyleSheet) -> Self {
        self.style_sheet = Some(sheet);
        self
    }

    /// Sets the type the root element must derive from.
    #[must_use]
    pub fn with_root_type(mut self, root_type: Option<&'a str>) -> Self {
        self.root_type = root_type;
        self
    }
}

/// Instantiates the element tree described by `markup`.
///
/// Each XML element names a registered type. Its attributes set properties, attach event
/// handlers from `handlers`, or set the reserved `Name` and `Class` members. Child elements
/// named `Type.Property` set that property (or, when `Type` is not the element's own type,
/// the attached property `Type.Property`). Other child elements and text become the value of
/// the type's content property. Values written as `{{path}}` are bindings, resolved by
/// [`ElementTree::update_bindings`].
pub fn instantiate<'r>(
    markup: &str,
    registry: &'r TypeRegistry,
    handlers: &HandlerTable,
    options: InstantiationOptions<'_>,
) -> Result<ElementTree<'r>, Error> {
    let document = Document::parse(markup)?;
    let root = document.root_element();
    let mut builder = Builder {
        document: &document,
        registry,
        handlers,
        options,
        tree: ElementTree::new(registry),
    };

    let type_name = root.tag_name().name();
    if let Some(expected) = options.root_type {
        if registry.get(type_name).is_some() && !registry.is_a(type_name, expected) {
            let kind = ErrorKind::InvalidRoot {
                type_name: type_name.into(),
                expected: expected.into(),
            };
            return Err(builder.error(kind, root));
        }
    }
    builder.element(root, None)?;

    let mut tree = builder.tree;
    if let Some(sheet) = options.style_sheet {
        tree.apply_styles(sheet);
    }
    Ok(tree)
}

struct Builder<'a, 'input, 'r> {
    document: &'a Document<'input>,
    registry: &'r TypeRegistry,
    handlers: &'a HandlerTable,
    options: InstantiationOptions<'a>,
    tree: ElementTree<'r>,
}

impl<'input> Builder<'_, 'input, '_> {
    fn error(&self, kind: ErrorKind, node: Node<'_, 'input>) -> Error {
        Error::new(kind, self.document.text_pos_at(node.range().start))
    }

    fn element(
        &mut self,
        node: Node<'_, 'input>,
        parent: Option<ElementId>,
    ) -> Result<ElementId, Error> {
        let registry = self.registry;
        let type_name = node.tag_name().name();
        if registry.get(type_name).is_none() {
            return Err(self.error(ErrorKind::UnknownType(type_name.into()), node));
        }
        let id = self.tree.push(type_name, parent);

        let mut mutators = Vec::new();
        for attribute in node.attributes() {
            if let Some(mutator) = self.attribute(node, id, attribute.name(), attribute.value())? {
                mutators.push(mutator);
            }
        }

        let mut content = Vec::new();
        for child in node.children() {
            if child.is_text() {
                let text = child.text().unwrap_or_default().trim();
                if !text.is_empty() {
                    content.push(MutatorValue::from_text(text));
                }
            } else if !child.is_element() {
                continue;
            } else if let Some((owner, property)) = child.tag_name().name().split_once('.') {
                let member = if registry.is_a(type_name, owner) {
                    property.into()
                } else {
                    format!("{owner}.{property}")
                };
                let values = self.values(child, id)?;
                let mutator = self.member_mutator(child, type_name, &member, values)?;
                mutators.push(mutator);
            } else {
                content.push(MutatorValue::Element(self.element(child, Some(id))?));
            }
        }

        if !content.is_empty() {
            let Some(member) = registry.content_property(type_name) else {
                let kind = ErrorKind::NoContentProperty(type_name.into());
                return Err(self.error(kind, node));
            };
            let mutator = self.member_mutator(node, type_name, member, content)?;
            mutators.push(mutator);
        }

        for mutator in &mutators {
            mutator
                .mutate(&mut self.tree, id)
                .map_err(|kind| self.error(kind, node))?;
        }
        Ok(id)
    }

    /// The text and elements inside a property element.
    fn values(
        &mut self,
        node: Node<'_, 'input>,
        owner: ElementId,
    ) -> Result<Vec<MutatorValue>, Error> {
        let mut values = Vec::new();
        for child in node.children() {
            if child.is_element() {
                values.push(MutatorValue::Element(self.element(child, Some(owner))?));
            } else if child.is_text() {
                let text = child.text().unwrap_or_default().trim();
                if !text.is_empty() {
                    values.push(MutatorValue::from_text(text));
                }
            }
        }
        Ok(values)
    }

    fn attribute(
        &mut self,
        node: Node<'_, 'input>,
        id: ElementId,
        name: &str,
        value: &str,
    ) -> Result<Option<Mutator>, Error> {
        let registry = self.registry;
        let type_name = node.tag_name().name();
        match name {
            "Name" => {
                if self.tree.names.contains_key(value) {
                    return Err(self.error(ErrorKind::DuplicateName(value.into()), node));
                }
                self.tree.names.insert(value.into(), id);
                self.tree.node_mut(id).name = Some(value.into());
                Ok(None)
            }
            "Class" => {
                let classes = &mut self.tree.node_mut(id).classes;
                classes.extend(value.split_whitespace().map(String::from));
                Ok(None)
            }
            _ if !name.contains('.') && registry.has_event(type_name, name) => {
                let Some(handler) = self.handlers.get(value.trim()) else {
                    let kind = ErrorKind::UnknownHandler(value.trim().into());
                    return Err(self.error(kind, node));
                };
                let mutator = EventHandlerMutator::new(name, handler);
                Ok(Some(Mutator::EventHandler(mutator)))
            }
            _ => match registry.member_property(type_name, name) {
                Some(descriptor) if descriptor.kind == PropertyKind::Scalar => {
                    Ok(Some(Mutator::StandardProperty(StandardPropertyMutator::new(
                        name,
                        descriptor.value_type,
                        MutatorValue::from_text(value),
                    ))))
                }
                Some(_) => Err(self.error(ErrorKind::CollectionMisuse(name.into()), node)),
                None if self.options.ignore_unknown_attributes => {
                    log::debug!("ignoring unknown attribute `{name}` on `{type_name}`");
                    Ok(None)
                }
                None => Err(self.error(
                    ErrorKind::UnknownMember {
                        type_name: type_name.into(),
                        member: name.into(),
                    },
                    node,
                )),
            },
        }
    }

    /// Chooses the mutator for assigning `values` to a property member.
    fn member_mutator(
        &self,
        node: Node<'_, 'input>,
        type_name: &str,
        member: &str,
        mut values: Vec<MutatorValue>,
    ) -> Result<Mutator, Error> {
        let Some(descriptor) = self.registry.member_property(type_name, member) else {
            let kind = ErrorKind::UnknownMember {
                type_name: type_name.into(),
                member: member.into(),
            };
            return Err(self.error(kind, node));
        };
        let value_type = descriptor.value_type;
        match descriptor.kind {
            PropertyKind::Collection => Ok(Mutator::CollectionItem(CollectionItemMutator::new(
                member, value_type, values,
            ))),
            PropertyKind::Scalar if values.len() == 1 => {
                let value = values.remove(0);
                Ok(Mutator::StandardProperty(StandardPropertyMutator::new(
                    member, value_type, value,
                )))
            }
            PropertyKind::Scalar => {
                Err(self.error(ErrorKind::CollectionMisuse(member.into()), node))
            }
        }
    }
}
