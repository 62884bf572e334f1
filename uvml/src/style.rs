// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying UVSS style sheets to an element tree.

use core::cmp::Ordering;

use hashbrown::HashMap;
use uvss::{ComparisonOp, StyleSheet, Trigger, TriggerAction, TriggerCondition};

use crate::registry::PropertyKind;
use crate::{Element, ElementTree, Value};

impl ElementTree<'_> {
    /// Replaces the style values of every element with those cascaded from `sheet`.
    ///
    /// Style values are converted to the types of their properties. Properties the element's
    /// type does not have are ignored, and values that do not convert are logged and ignored.
    /// The `set` actions of property triggers whose conditions hold are applied on top of the
    /// cascaded rules. Local values still take precedence over everything set here.
    pub fn apply_styles(&mut self, sheet: &StyleSheet) {
        let styles: Vec<_> = self
            .iter()
            .map(|element| {
                let resolved = sheet.resolve(&element);
                let mut values = HashMap::new();
                for (property, text) in resolved.iter() {
                    if let Some(value) = style_value(element, property, text) {
                        values.insert(property.to_owned(), value);
                    }
                }
                for trigger in resolved.triggers() {
                    let Trigger::Property {
                        conditions,
                        actions,
                    } = trigger
                    else {
                        continue;
                    };
                    if !conditions
                        .iter()
                        .all(|condition| condition_holds(element, &values, condition))
                    {
                        continue;
                    }
                    for action in actions {
                        if let TriggerAction::Set { property, value } = action {
                            if let Some(value) = style_value(element, property, value) {
                                values.insert(property.clone(), value);
                            }
                        }
                    }
                }
                values
            })
            .collect();
        for (node, style) in self.nodes.iter_mut().zip(styles) {
            node.style = style;
        }
    }
}

fn style_value(element: Element<'_>, property: &str, text: &str) -> Option<Value> {
    let Some(descriptor) = element
        .registry()
        .member_property(element.type_name(), property)
    else {
        log::debug!(
            "`{}` has no property `{property}`, ignoring style",
            element.type_name()
        );
        return None;
    };
    if descriptor.kind == PropertyKind::Collection {
        log::debug!("cannot style collection `{}.{property}`", element.type_name());
        return None;
    }
    let value = Value::convert(descriptor.value_type, text);
    if value.is_none() {
        log::warn!(
            "style value `{text}` for `{}.{property}` is not a {:?}",
            element.type_name(),
            descriptor.value_type
        );
    }
    value
}

/// Whether a trigger condition holds, given the style values cascaded so far.
fn condition_holds(
    element: Element<'_>,
    styled: &HashMap<String, Value>,
    condition: &TriggerCondition,
) -> bool {
    let property = condition.property();
    let current = element
        .local_value(property)
        .or_else(|| styled.get(property))
        .or_else(|| element.default_value(property));
    let Some(current) = current else {
        return false;
    };
    let Some(expected) = current
        .value_type()
        .and_then(|value_type| Value::convert(value_type, condition.value()))
    else {
        return false;
    };
    match condition.op() {
        ComparisonOp::Equal => *current == expected,
        ComparisonOp::NotEqual => *current != expected,
        op => {
            let ordering = current
                .as_number()
                .zip(expected.as_number())
                .and_then(|(current, expected)| current.partial_cmp(&expected));
            matches!(
                (op, ordering),
                (ComparisonOp::Less, Some(Ordering::Less))
                    | (ComparisonOp::Greater, Some(Ordering::Greater))
                    | (
                        ComparisonOp::LessOrEqual,
                        Some(Ordering::Less | Ordering::Equal)
                    )
                    | (
                        ComparisonOp::GreaterOrEqual,
                        Some(Ordering::Greater | Ordering::Equal)
                    )
            )
        }
    }
}
