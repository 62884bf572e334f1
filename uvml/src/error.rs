// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::ValueType;

/// Kinds of errors that can occur when instantiating UVML markup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The markup is not well-formed XML.
    Xml(roxmltree::Error),
    /// An element names a type that is not registered.
    UnknownType(String),
    /// An attribute or property element names a member the type does not have.
    UnknownMember {
        /// The element's type.
        type_name: String,
        /// The member as written.
        member: String,
    },
    /// A value could not be converted to its property's type.
    InvalidValue {
        /// The member being set.
        member: String,
        /// The value as written.
        value: String,
        /// The property's type.
        expected: ValueType,
    },
    /// An event attribute names a handler that is not in the handler table.
    UnknownHandler(String),
    /// A collection property was assigned a scalar value, or a scalar property was given
    /// several items.
    CollectionMisuse(String),
    /// An element has content but its type has no content property.
    NoContentProperty(String),
    /// Two elements share a name.
    DuplicateName(String),
    /// The root element's type does not derive from the required root type.
    InvalidRoot {
        /// The root element's type.
        type_name: String,
        /// The type it must derive from.
        expected: String,
    },
}

/// Error returned when instantiating UVML markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    line: u32,
    column: u32,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, pos: roxmltree::TextPos) -> Self {
        Self {
            kind,
            line: pos.row,
            column: pos.col,
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the 1-based line of the offending markup.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the 1-based column of the offending markup.
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        let pos = err.pos();
        Self::new(ErrorKind::Xml(err), pos)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Xml(err) => return write!(f, "invalid markup: {err}"),
            ErrorKind::UnknownType(name) => write!(f, "unknown type `{name}`")?,
            ErrorKind::UnknownMember { type_name, member } => {
                write!(f, "`{type_name}` has no member `{member}`")?;
            }
            ErrorKind::InvalidValue {
                member,
                value,
                expected,
            } => write!(f, "cannot convert `{value}` to {expected:?} for `{member}`")?,
            ErrorKind::UnknownHandler(name) => write!(f, "unknown event handler `{name}`")?,
            ErrorKind::CollectionMisuse(member) => {
                write!(f, "`{member}` used with the wrong arity")?;
            }
            ErrorKind::NoContentProperty(name) => {
                write!(f, "`{name}` does not accept content")?;
            }
            ErrorKind::DuplicateName(name) => write!(f, "duplicate element name `{name}`")?,
            ErrorKind::InvalidRoot {
                type_name,
                expected,
            } => write!(f, "root element `{type_name}` is not a `{expected}`")?,
        }
        write!(f, " at {}:{}", self.line, self.column)
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Xml(err) => Some(err),
            _ => None,
        }
    }
}
