// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type metadata looked up by name while instantiating markup.

use hashbrown::HashMap;

use crate::{Value, ValueType};

/// Whether a property holds one value or a list of items.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// A single value.
    Scalar,
    /// A list of items.
    Collection,
}

/// Describes one property of a type.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDescriptor {
    /// Scalar or collection.
    pub kind: PropertyKind,
    /// The type of the value, or of each item for collections.
    pub value_type: ValueType,
    /// Value used when neither markup nor a style sheet sets the property.
    pub default: Option<Value>,
}

/// Describes a type that markup can instantiate.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDescriptor {
    name: String,
    base: Option<String>,
    properties: HashMap<String, PropertyDescriptor>,
    events: Vec<String>,
    content_property: Option<String>,
}

impl TypeDescriptor {
    /// Creates a descriptor with no members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            properties: HashMap::new(),
            events: Vec::new(),
            content_property: None,
        }
    }

    /// Sets the base type, whose members are inherited.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Adds a scalar property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.properties.insert(
            name.into(),
            PropertyDescriptor {
                kind: PropertyKind::Scalar,
                value_type,
                default: None,
            },
        );
        self
    }

    /// Adds a scalar property with a default value.
    #[must_use]
    pub fn with_default(
        mut self,
        name: impl Into<String>,
        value_type: ValueType,
        default: impl Into<Value>,
    ) -> Self {
        self.properties.insert(
            name.into(),
            PropertyDescriptor {
                kind: PropertyKind::Scalar,
                value_type,
                default: Some(default.into()),
            },
        );
        self
    }

    /// Adds a collection property whose items have type `item_type`.
    #[must_use]
    pub fn with_collection(mut self, name: impl Into<String>, item_type: ValueType) -> Self {
        self.properties.insert(
            name.into(),
            PropertyDescriptor {
                kind: PropertyKind::Collection,
                value_type: item_type,
                default: None,
            },
        );
        self
    }

    /// Adds an event.
    #[must_use]
    pub fn with_event(mut self, name: impl Into<String>) -> Self {
        self.events.push(name.into());
        self
    }

    /// Names the property that receives child elements and text content.
    #[must_use]
    pub fn with_content_property(mut self, name: impl Into<String>) -> Self {
        self.content_property = Some(name.into());
        self
    }

    /// The type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base type name.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }
}

/// Maps type names to their descriptors.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type, replacing any type of the same name.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Returns the descriptor of `type_name`.
    pub fn get(&self, type_name: &str) -> Option<&TypeDescriptor> {
        self.types.get(type_name)
    }

    /// Iterates over `type_name` and its registered base types, most derived first.
    pub fn ancestry<'a>(&'a self, type_name: &str) -> impl Iterator<Item = &'a TypeDescriptor> {
        let mut next = self.types.get(type_name);
        // Bounded so a cycle of base types cannot loop forever.
        let mut remaining = self.types.len();
        core::iter::from_fn(move || {
            let current = next.filter(|_| remaining > 0)?;
            remaining -= 1;
            next = current
                .base
                .as_deref()
                .and_then(|base| self.types.get(base));
            Some(current)
        })
    }

    /// Whether `type_name` is `base` or derives from it.
    pub fn is_a(&self, type_name: &str, base: &str) -> bool {
        self.ancestry(type_name)
            .any(|descriptor| descriptor.name == base)
    }

    /// Looks up a property of `type_name`, including inherited ones.
    pub fn property(&self, type_name: &str, property: &str) -> Option<&PropertyDescriptor> {
        self.ancestry(type_name)
            .find_map(|descriptor| descriptor.properties.get(property))
    }

    /// Looks up a property written as a member name on an element of `type_name`.
    ///
    /// Qualified members such as `Grid.Row` are attached properties, looked up on their owner
    /// type instead.
    pub fn member_property(&self, type_name: &str, member: &str) -> Option<&PropertyDescriptor> {
        match member.split_once('.') {
            Some((owner, property)) => self.property(owner, property),
            None => self.property(type_name, member),
        }
    }

    /// Whether `type_name` declares or inherits the event.
    pub fn has_event(&self, type_name: &str, event: &str) -> bool {
        self.ancestry(type_name)
            .any(|descriptor| descriptor.events.iter().any(|e| e == event))
    }

    /// The content property of `type_name`, including an inherited one.
    pub fn content_property(&self, type_name: &str) -> Option<&str> {
        self.ancestry(type_name)
            .find_map(|descriptor| descriptor.content_property.as_deref())
    }
}
