// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selector specificity and matching.

use crate::tree::{Combinator, Selector, SelectorPart};

/// An element that selectors can be matched against.
///
/// Implementations are usually cheap handles into an element tree, since [`parent`] returns
/// the parent by value.
///
/// [`parent`]: Self::parent
pub trait StyledElement {
    /// The element's type name, compared case-insensitively.
    fn type_name(&self) -> &str;

    /// The element's name, matched by `#id` selectors.
    fn name(&self) -> Option<&str>;

    /// Whether the element has the given class.
    fn has_class(&self, class: &str) -> bool;

    /// Whether the element is in the given state, such as `hover`.
    fn has_pseudo_class(&self, pseudo_class: &str) -> bool {
        let _ = pseudo_class;
        false
    }

    /// The element's parent.
    fn parent(&self) -> Option<Self>
    where
        Self: Sized;
}

/// The specificity of a selector: ids, then classes and pseudo-classes, then types.
///
/// Compares lexicographically, so any id outweighs any number of classes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
    /// Number of `#id` components.
    pub ids: u16,
    /// Number of `.class` and `:pseudo-class` components.
    pub classes: u16,
    /// Number of type components. `*` contributes nothing.
    pub types: u16,
}

impl Selector {
    /// Computes the specificity of the selector.
    pub fn specificity(&self) -> Specificity {
        let mut specificity = Specificity::default();
        for part in &self.parts {
            specificity.ids += u16::from(part.id.is_some());
            specificity.classes += u16::try_from(part.classes.len()).unwrap_or(u16::MAX);
            specificity.classes += u16::from(part.pseudo_class.is_some());
            specificity.types += u16::from(part.element.is_some());
        }
        specificity
    }

    /// Whether the selector matches `element`.
    pub fn matches<E: StyledElement>(&self, element: &E) -> bool {
        matches_from(&self.parts, element)
    }
}

impl SelectorPart {
    /// Whether this compound part matches `element` on its own, ignoring combinators.
    pub fn matches_element<E: StyledElement>(&self, element: &E) -> bool {
        if let Some(name) = &self.element {
            if !element.type_name().eq_ignore_ascii_case(name) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.name() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.pseudo_class
            .as_deref()
            .is_none_or(|pseudo_class| element.has_pseudo_class(pseudo_class))
    }
}

/// Matches the last of `parts` against `element`, then the rest against its ancestors.
fn matches_from<E: StyledElement>(parts: &[SelectorPart], element: &E) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return true;
    };
    if !last.matches_element(element) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }
    match last.combinator {
        Some(Combinator::Child) => element
            .parent()
            .is_some_and(|parent| matches_from(rest, &parent)),
        _ => {
            let mut ancestor = element.parent();
            while let Some(candidate) = ancestor {
                if matches_from(rest, &candidate) {
                    return true;
                }
                ancestor = candidate.parent();
            }
            false
        }
    }
}
