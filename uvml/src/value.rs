// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::ElementId;

/// The type of a property value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Text.
    String,
    /// `true` or `false`, case-insensitive.
    Bool,
    /// A signed integer.
    Integer,
    /// A floating point number.
    Number,
    /// A CSS color: a name, hex notation or a color function.
    Color,
    /// Another element of the tree.
    Element,
}

/// A property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Text.
    String(String),
    /// A boolean.
    Bool(bool),
    /// An integer.
    Integer(i64),
    /// A number.
    Number(f64),
    /// A color.
    Color(Color),
    /// An element of the tree.
    Element(ElementId),
    /// The items of a collection property.
    List(Vec<Value>),
}

impl Value {
    /// Converts markup or style sheet text to a value of the given type.
    ///
    /// Surrounding whitespace is ignored for every type except [`ValueType::String`].
    /// Elements cannot be written as text, so converting to [`ValueType::Element`] always
    /// fails.
    pub fn convert(value_type: ValueType, text: &str) -> Option<Self> {
        let trimmed = text.trim();
        match value_type {
            ValueType::String => Some(Self::String(unquote(text).into())),
            ValueType::Bool => {
                if trimmed.eq_ignore_ascii_case("true") {
                    Some(Self::Bool(true))
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Some(Self::Bool(false))
                } else {
                    None
                }
            }
            ValueType::Integer => trimmed.parse().ok().map(Self::Integer),
            ValueType::Number => trimmed
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .map(Self::Number),
            ValueType::Color => parse_color(trimmed)
                .ok()
                .map(|color| Self::Color(color.to_alpha_color::<Srgb>())),
            ValueType::Element => None,
        }
    }

    /// The type of the value, or `None` for lists.
    pub fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            Self::String(_) => ValueType::String,
            Self::Bool(_) => ValueType::Bool,
            Self::Integer(_) => ValueType::Integer,
            Self::Number(_) => ValueType::Number,
            Self::Color(_) => ValueType::Color,
            Self::Element(_) => ValueType::Element,
            Self::List(_) => return None,
        })
    }

    /// Converts the value to `value_type` if it is already of that type, is an integer being
    /// widened to a number, or is text that [`convert`](Self::convert)s.
    pub fn coerce(self, value_type: ValueType) -> Option<Self> {
        match (self, value_type) {
            (value, target) if value.value_type() == Some(target) => Some(value),
            (Self::Integer(integer), ValueType::Number) => Some(Self::Number(integer as f64)),
            (Self::String(text), target) => Self::convert(target, &text),
            _ => None,
        }
    }

    /// Returns the text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as a number, if it is an integer or a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the element, if this is one.
    pub fn as_element(&self) -> Option<ElementId> {
        match self {
            Self::Element(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the items, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.into())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Color> for Value {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

/// Strips one pair of matching double quotes, as style sheets quote string values.
fn unquote(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}
