// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The instantiated element tree.

use hashbrown::HashMap;
use smallvec::SmallVec;
use uvss::StyledElement;

use crate::{HandlerId, TypeRegistry, Value, ValueType};

/// Identifies an element of an [`ElementTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    /// The index of the element in creation order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A pending `{{path}}` binding of a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Binding {
    pub(crate) member: String,
    pub(crate) path: String,
    pub(crate) value_type: ValueType,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) type_name: String,
    pub(crate) name: Option<String>,
    pub(crate) classes: SmallVec<[String; 2]>,
    pub(crate) pseudo_classes: SmallVec<[String; 1]>,
    pub(crate) local: HashMap<String, Value>,
    pub(crate) style: HashMap<String, Value>,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) handlers: Vec<(String, HandlerId)>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) parent: Option<ElementId>,
}

/// A tree of elements instantiated from markup.
///
/// Elements are stored in creation order, which is document order with every element
/// preceding its descendants. The tree borrows the registry it was built with so that
/// property defaults and types stay available.
#[derive(Clone, Debug)]
pub struct ElementTree<'r> {
    pub(crate) registry: &'r TypeRegistry,
    pub(crate) nodes: Vec<Node>,
    pub(crate) names: HashMap<String, ElementId>,
}

impl<'r> ElementTree<'r> {
    pub(crate) fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            nodes: Vec::new(),
            names: HashMap::new(),
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "element ids are u32 indices"
    )]
    pub(crate) fn push(&mut self, type_name: &str, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Node {
            type_name: type_name.into(),
            name: None,
            classes: SmallVec::new(),
            pseudo_classes: SmallVec::new(),
            local: HashMap::new(),
            style: HashMap::new(),
            bindings: Vec::new(),
            handlers: Vec::new(),
            children: Vec::new(),
            parent,
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    pub(crate) fn node(&self, id: ElementId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// The registry the tree was built with.
    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// The root element.
    pub fn root(&self) -> Element<'_> {
        self.get(ElementId(0))
    }

    /// Returns the element with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn get(&self, id: ElementId) -> Element<'_> {
        assert!(id.index() < self.nodes.len(), "element id out of range");
        Element { tree: self, id }
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no elements. Instantiated trees always have a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the elements in document order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "element ids are u32 indices"
    )]
    pub fn iter(&self) -> impl Iterator<Item = Element<'_>> + '_ {
        (0..self.nodes.len() as u32).map(|index| Element {
            tree: self,
            id: ElementId(index),
        })
    }

    /// Finds the element with the given `Name`.
    pub fn find_by_name(&self, name: &str) -> Option<Element<'_>> {
        self.names.get(name).map(|&id| self.get(id))
    }

    /// Sets a local value, which takes precedence over style values and defaults.
    pub fn set_local(&mut self, id: ElementId, member: impl Into<String>, value: Value) {
        self.node_mut(id).local.insert(member.into(), value);
    }

    /// Removes a local value, returning it.
    pub fn clear_local(&mut self, id: ElementId, member: &str) -> Option<Value> {
        self.node_mut(id).local.remove(member)
    }

    /// Turns a pseudo-class such as `hover` on or off for style matching.
    pub fn set_pseudo_class(&mut self, id: ElementId, pseudo_class: &str, on: bool) {
        let pseudo_classes = &mut self.node_mut(id).pseudo_classes;
        let position = pseudo_classes.iter().position(|p| p == pseudo_class);
        match (position, on) {
            (None, true) => pseudo_classes.push(pseudo_class.into()),
            (Some(index), false) => {
                pseudo_classes.remove(index);
            }
            _ => {}
        }
    }

    /// Invokes the handlers attached to `event` on `element`, in attachment order, returning
    /// how many were invoked.
    pub fn raise(
        &self,
        element: ElementId,
        event: &str,
        mut callback: impl FnMut(HandlerId),
    ) -> usize {
        let mut count = 0;
        for (_, handler) in self
            .node(element)
            .handlers
            .iter()
            .filter(|(name, _)| name == event)
        {
            callback(*handler);
            count += 1;
        }
        count
    }
}

/// A handle to an element of an [`ElementTree`].
#[derive(Copy, Clone, Debug)]
pub struct Element<'t> {
    tree: &'t ElementTree<'t>,
    id: ElementId,
}

impl<'t> Element<'t> {
    fn node(&self) -> &'t Node {
        self.tree.node(self.id)
    }

    /// The element's id.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The element's type name.
    pub fn type_name(&self) -> &'t str {
        &self.node().type_name
    }

    /// The element's `Name`.
    pub fn name(&self) -> Option<&'t str> {
        self.node().name.as_deref()
    }

    /// The element's style classes.
    pub fn classes(&self) -> impl Iterator<Item = &'t str> + 't {
        self.node().classes.iter().map(String::as_str)
    }

    /// The parent element.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| Self {
            tree: self.tree,
            id,
        })
    }

    /// The child elements, in document order.
    pub fn children(&self) -> impl Iterator<Item = Element<'t>> + 't {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| Element { tree, id })
    }

    /// The value set in markup, by a binding, or with [`ElementTree::set_local`].
    pub fn local_value(&self, member: &str) -> Option<&'t Value> {
        self.node().local.get(member)
    }

    /// The value set by the last applied style sheet.
    pub fn style_value(&self, member: &str) -> Option<&'t Value> {
        self.node().style.get(member)
    }

    /// The registered default of the member.
    pub fn default_value(&self, member: &str) -> Option<&'t Value> {
        self.tree
            .registry
            .member_property(self.type_name(), member)?
            .default
            .as_ref()
    }

    /// The effective value of a member: the local value if present, else the style value,
    /// else the default.
    pub fn value(&self, member: &str) -> Option<&'t Value> {
        self.local_value(member)
            .or_else(|| self.style_value(member))
            .or_else(|| self.default_value(member))
    }

    /// The handlers attached to `event`, in attachment order.
    pub fn handlers(&self, event: &'t str) -> impl Iterator<Item = HandlerId> + 't {
        self.node()
            .handlers
            .iter()
            .filter(move |(name, _)| name == event)
            .map(|&(_, handler)| handler)
    }

    /// Whether the element's type is `base` or derives from it.
    pub fn is_a(&self, base: &str) -> bool {
        self.tree.registry.is_a(self.type_name(), base)
    }

    /// The `(member, path)` pairs of the element's bindings.
    pub fn bindings(&self) -> impl Iterator<Item = (&'t str, &'t str)> + 't {
        self.node()
            .bindings
            .iter()
            .map(|binding| (binding.member.as_str(), binding.path.as_str()))
    }

    /// The registry of the tree the element belongs to.
    pub fn registry(&self) -> &'t TypeRegistry {
        self.tree.registry
    }
}

impl StyledElement for Element<'_> {
    fn type_name(&self) -> &str {
        Element::type_name(self)
    }

    fn name(&self) -> Option<&str> {
        Element::name(self)
    }

    fn has_class(&self, class: &str) -> bool {
        self.node().classes.iter().any(|c| c == class)
    }

    fn has_pseudo_class(&self, pseudo_class: &str) -> bool {
        self.node().pseudo_classes.iter().any(|p| p == pseudo_class)
    }

    fn parent(&self) -> Option<Self> {
        Element::parent(self)
    }
}
