// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strategies for applying markup members to instantiated elements.

use crate::error::ErrorKind;
use crate::tree::Binding;
use crate::{ElementId, ElementTree, HandlerId, Value, ValueType};

/// A value as written in markup, before instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutatorValue {
    /// Text to convert to the member's type.
    Literal(String),
    /// A `{{path}}` binding, resolved later by [`ElementTree::update_bindings`].
    Binding(String),
    /// A child element.
    Element(ElementId),
}

impl MutatorValue {
    /// Classifies attribute or text content, recognizing `{{path}}` bindings.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed
            .strip_prefix("{{")
            .and_then(|rest| rest.strip_suffix("}}"))
        {
            Some(path) => Self::Binding(path.trim().into()),
            None => Self::Literal(text.into()),
        }
    }

    fn instantiate(&self, member: &str, value_type: ValueType) -> Result<Value, ErrorKind> {
        let invalid = |value: &str| ErrorKind::InvalidValue {
            member: member.into(),
            value: value.into(),
            expected: value_type,
        };
        match self {
            Self::Literal(text) => Value::convert(value_type, text).ok_or_else(|| invalid(text)),
            Self::Element(id) if value_type == ValueType::Element => Ok(Value::Element(*id)),
            Self::Element(_) => Err(invalid("element")),
            Self::Binding(path) => Err(invalid(path)),
        }
    }
}

/// Sets a scalar property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandardPropertyMutator {
    member: String,
    value_type: ValueType,
    value: MutatorValue,
}

impl StandardPropertyMutator {
    /// Creates a mutator setting `member` to `value`.
    pub fn new(member: impl Into<String>, value_type: ValueType, value: MutatorValue) -> Self {
        Self {
            member: member.into(),
            value_type,
            value,
        }
    }

    /// Instantiates the value. Bindings have no value until they are updated, so they yield
    /// `None`.
    pub fn instantiate_value(&self) -> Result<Option<Value>, ErrorKind> {
        match &self.value {
            MutatorValue::Binding(_) => Ok(None),
            value => value.instantiate(&self.member, self.value_type).map(Some),
        }
    }

    /// Sets the value on `target`, or records the binding.
    pub fn mutate(&self, tree: &mut ElementTree<'_>, target: ElementId) -> Result<(), ErrorKind> {
        if let MutatorValue::Binding(path) = &self.value {
            tree.node_mut(target).bindings.push(Binding {
                member: self.member.clone(),
                path: path.clone(),
                value_type: self.value_type,
            });
            return Ok(());
        }
        if let Some(value) = self.instantiate_value()? {
            tree.set_local(target, self.member.clone(), value);
        }
        Ok(())
    }
}

/// Appends items to a collection property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionItemMutator {
    member: String,
    item_type: ValueType,
    items: Vec<MutatorValue>,
}

impl CollectionItemMutator {
    /// Creates a mutator appending `items` to `member`.
    pub fn new(member: impl Into<String>, item_type: ValueType, items: Vec<MutatorValue>) -> Self {
        Self {
            member: member.into(),
            item_type,
            items,
        }
    }

    /// The current items of the collection on `target`, if it has been created.
    pub fn get_collection<'t>(
        &self,
        tree: &'t ElementTree<'_>,
        target: ElementId,
    ) -> Option<&'t [Value]> {
        tree.node(target).local.get(&self.member)?.as_list()
    }

    /// Creates an empty collection sized for this mutator's items.
    pub fn create_collection(&self) -> Vec<Value> {
        Vec::with_capacity(self.items.len())
    }

    /// Stores `items` as the collection on `target`.
    pub fn set_collection(&self, tree: &mut ElementTree<'_>, target: ElementId, items: Vec<Value>) {
        tree.set_local(target, self.member.clone(), Value::List(items));
    }

    /// Instantiates the items to append.
    pub fn instantiate_items(&self) -> Result<Vec<Value>, ErrorKind> {
        self.items
            .iter()
            .map(|item| match item {
                MutatorValue::Binding(_) => Err(ErrorKind::CollectionMisuse(self.member.clone())),
                item => item.instantiate(&self.member, self.item_type),
            })
            .collect()
    }

    /// Appends the items to the collection on `target`, creating it first if needed.
    pub fn mutate(&self, tree: &mut ElementTree<'_>, target: ElementId) -> Result<(), ErrorKind> {
        let items = self.instantiate_items()?;
        let mut collection = match self.get_collection(tree, target) {
            Some(existing) => existing.to_vec(),
            None => self.create_collection(),
        };
        collection.extend(items);
        self.set_collection(tree, target, collection);
        Ok(())
    }
}

/// Attaches a handler to an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventHandlerMutator {
    event: String,
    handler: HandlerId,
}

impl EventHandlerMutator {
    /// Creates a mutator attaching `handler` to `event`.
    pub fn new(event: impl Into<String>, handler: HandlerId) -> Self {
        Self {
            event: event.into(),
            handler,
        }
    }

    /// The handler to attach.
    pub fn instantiate_value(&self) -> HandlerId {
        self.handler
    }

    /// Attaches the handler to `target` after any already attached.
    pub fn mutate(&self, tree: &mut ElementTree<'_>, target: ElementId) {
        tree.node_mut(target)
            .handlers
            .push((self.event.clone(), self.instantiate_value()));
    }
}

/// How one member of a markup element is applied to its instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutator {
    /// Sets a scalar property.
    StandardProperty(StandardPropertyMutator),
    /// Appends to a collection property.
    CollectionItem(CollectionItemMutator),
    /// Attaches an event handler.
    EventHandler(EventHandlerMutator),
}

impl Mutator {
    /// The property or event the mutator applies to.
    pub fn member(&self) -> &str {
        match self {
            Self::StandardProperty(mutator) => &mutator.member,
            Self::CollectionItem(mutator) => &mutator.member,
            Self::EventHandler(mutator) => &mutator.event,
        }
    }

    /// Applies the mutator to `target`.
    pub fn mutate(&self, tree: &mut ElementTree<'_>, target: ElementId) -> Result<(), ErrorKind> {
        match self {
            Self::StandardProperty(mutator) => mutator.mutate(tree, target),
            Self::CollectionItem(mutator) => mutator.mutate(tree, target),
            Self::EventHandler(mutator) => {
                mutator.mutate(tree, target);
                Ok(())
            }
        }
    }
}
