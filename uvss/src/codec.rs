// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Versioned binary form of the syntax tree.
//!
//! The stream starts with the magic bytes `UVSS` and a little-endian `u32` schema version.
//! Every node is then written depth first. Strings are a `u32` byte length followed by UTF-8,
//! sequences are a `u32` count followed by their items, and optional values are a `u8` flag
//! followed by the value when the flag is 1. All integers are little-endian.
//!
//! Version 1 has no `!important` flag on rules. Version 2 appends it as a `u8` after each
//! rule's value.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::error::{DecodeError, DecodeErrorKind};
use crate::tree::{
    Combinator, ComparisonOp, Document, Rule, RuleSet, Selector, SelectorPart, Trigger,
    TriggerAction, TriggerCondition,
};

/// Magic bytes at the start of every encoded document.
pub const MAGIC: [u8; 4] = *b"UVSS";

/// A schema version of the binary format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum Version {
    /// Rules without the `!important` flag.
    V1,
    /// Rules carry the `!important` flag.
    V2,
}

impl Version {
    /// The version written by [`encode`].
    pub const CURRENT: Self = Self::V2;

    /// Returns the version with the given number, if it is supported.
    pub const fn from_u32(version: u32) -> Option<Self> {
        match version {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            _ => None,
        }
    }

    /// The version number written to the header.
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }
}

/// Encodes `document` with the current schema version.
pub fn encode(document: &Document) -> Vec<u8> {
    encode_with_version(document, Version::CURRENT)
}

/// Encodes `document` with the given schema version.
///
/// Encoding with an older version drops what that version cannot represent.
pub fn encode_with_version(document: &Document, version: Version) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&version.to_u32().to_le_bytes());
    document.encode(&mut out, version);
    out
}

/// Decodes a document, reading the schema version from the header.
pub fn decode(data: &[u8]) -> Result<Document, DecodeError> {
    if !data.starts_with(&MAGIC) {
        return Err(DecodeError::new(DecodeErrorKind::InvalidMagic, 0));
    }
    let mut reader = Reader {
        data,
        pos: MAGIC.len(),
    };
    let number = reader.u32()?;
    let version = Version::from_u32(number).ok_or(DecodeError::new(
        DecodeErrorKind::UnsupportedVersion(number),
        MAGIC.len(),
    ))?;
    let document = Document::decode(&mut reader, version)?;
    if reader.pos != data.len() {
        return Err(DecodeError::new(DecodeErrorKind::TrailingBytes, reader.pos));
    }
    Ok(document)
}

/// Returns the schema version of an encoded document without decoding it.
pub fn peek_version(data: &[u8]) -> Result<u32, DecodeError> {
    if !data.starts_with(&MAGIC) {
        return Err(DecodeError::new(DecodeErrorKind::InvalidMagic, 0));
    }
    Reader {
        data,
        pos: MAGIC.len(),
    }
    .u32()
}

trait Encode {
    fn encode(&self, out: &mut Vec<u8>, version: Version);
}

trait Decode: Sized {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError>;
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let eof = DecodeError::new(DecodeErrorKind::UnexpectedEof, self.data.len());
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(eof)?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.bytes(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let mut bytes = [0; 4];
        bytes.copy_from_slice(self.bytes(4)?);
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads a tag, checking that it is below `count`.
    fn tag(&mut self, count: u8) -> Result<u8, DecodeError> {
        let offset = self.pos;
        let tag = self.u8()?;
        if tag < count {
            Ok(tag)
        } else {
            Err(DecodeError::new(DecodeErrorKind::InvalidTag(tag), offset))
        }
    }

    fn bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.tag(2)? == 1)
    }

    fn len(&mut self) -> Result<usize, DecodeError> {
        Ok(self.u32()? as usize)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "string and list lengths in a style sheet fit in 32 bits"
)]
fn write_u32(out: &mut Vec<u8>, value: usize) {
    out.extend_from_slice(&(value as u32).to_le_bytes());
}

impl Encode for str {
    fn encode(&self, out: &mut Vec<u8>, _: Version) {
        write_u32(out, self.len());
        out.extend_from_slice(self.as_bytes());
    }
}

impl Encode for String {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        self.as_str().encode(out, version);
    }
}

impl Decode for String {
    fn decode(reader: &mut Reader<'_>, _: Version) -> Result<Self, DecodeError> {
        let len = reader.len()?;
        let offset = reader.pos;
        let bytes = reader.bytes(len)?;
        core::str::from_utf8(bytes)
            .map(String::from)
            .map_err(|_| DecodeError::new(DecodeErrorKind::InvalidUtf8, offset))
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        match self {
            Some(value) => {
                out.push(1);
                value.encode(out, version);
            }
            None => out.push(0),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError> {
        if reader.bool()? {
            T::decode(reader, version).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        write_u32(out, self.len());
        for item in self {
            item.encode(out, version);
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError> {
        let count = reader.len()?;
        // Every item takes at least one byte.
        let mut items = Self::with_capacity(count.min(reader.data.len() - reader.pos));
        for _ in 0..count {
            items.push(T::decode(reader, version)?);
        }
        Ok(items)
    }
}

impl Encode for Document {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        self.rule_sets().encode(out, version);
    }
}

impl Decode for Document {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError> {
        Ok(Self::new(Vec::decode(reader, version)?))
    }
}

impl Encode for RuleSet {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        self.selectors().encode(out, version);
        self.rules().encode(out, version);
        self.triggers().encode(out, version);
    }
}

impl Decode for RuleSet {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError> {
        let selectors = Vec::decode(reader, version)?;
        let rules = Vec::decode(reader, version)?;
        let triggers = Vec::decode(reader, version)?;
        Ok(Self::new(selectors, rules, triggers))
    }
}

impl Encode for Selector {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        self.parts.encode(out, version);
    }
}

impl Decode for Selector {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError> {
        Ok(Self::new(Vec::decode(reader, version)?))
    }
}

impl Encode for SelectorPart {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        out.push(match self.combinator {
            None => 0,
            Some(Combinator::Descendant) => 1,
            Some(Combinator::Child) => 2,
        });
        self.element.encode(out, version);
        self.id.encode(out, version);
        self.classes.encode(out, version);
        self.pseudo_class.encode(out, version);
    }
}

impl Decode for SelectorPart {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError> {
        let combinator = match reader.tag(3)? {
            0 => None,
            1 => Some(Combinator::Descendant),
            _ => Some(Combinator::Child),
        };
        let element = Option::decode(reader, version)?;
        let id = Option::decode(reader, version)?;
        let classes: Vec<String> = Vec::decode(reader, version)?;
        let pseudo_class = Option::decode(reader, version)?;
        Ok(Self {
            combinator,
            element,
            id,
            classes: SmallVec::from_vec(classes),
            pseudo_class,
        })
    }
}

impl Encode for Rule {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        self.property().encode(out, version);
        self.value().encode(out, version);
        if version >= Version::V2 {
            out.push(u8::from(self.is_important()));
        } else if self.is_important() {
            log::debug!(
                "dropping !important from `{}` for schema version 1",
                self.property()
            );
        }
    }
}

impl Decode for Rule {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError> {
        let property = String::decode(reader, version)?;
        let value = String::decode(reader, version)?;
        let important = version >= Version::V2 && reader.bool()?;
        Ok(Self::new(property, value, important))
    }
}

impl Encode for TriggerCondition {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        self.property().encode(out, version);
        out.push(match self.op() {
            ComparisonOp::Equal => 0,
            ComparisonOp::NotEqual => 1,
            ComparisonOp::Less => 2,
            ComparisonOp::Greater => 3,
            ComparisonOp::LessOrEqual => 4,
            ComparisonOp::GreaterOrEqual => 5,
        });
        self.value().encode(out, version);
    }
}

impl Decode for TriggerCondition {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError> {
        let property = String::decode(reader, version)?;
        let op = match reader.tag(6)? {
            0 => ComparisonOp::Equal,
            1 => ComparisonOp::NotEqual,
            2 => ComparisonOp::Less,
            3 => ComparisonOp::Greater,
            4 => ComparisonOp::LessOrEqual,
            _ => ComparisonOp::GreaterOrEqual,
        };
        let value = String::decode(reader, version)?;
        Ok(Self::new(property, op, value))
    }
}

impl Encode for TriggerAction {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        match self {
            Self::Set { property, value } => {
                out.push(0);
                property.encode(out, version);
                value.encode(out, version);
            }
            Self::PlayStoryboard(name) => {
                out.push(1);
                name.encode(out, version);
            }
            Self::PlaySfx(asset) => {
                out.push(2);
                asset.encode(out, version);
            }
        }
    }
}

impl Decode for TriggerAction {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError> {
        Ok(match reader.tag(3)? {
            0 => Self::Set {
                property: String::decode(reader, version)?,
                value: String::decode(reader, version)?,
            },
            1 => Self::PlayStoryboard(String::decode(reader, version)?),
            _ => Self::PlaySfx(String::decode(reader, version)?),
        })
    }
}

impl Encode for Trigger {
    fn encode(&self, out: &mut Vec<u8>, version: Version) {
        match self {
            Self::Property {
                conditions,
                actions,
            } => {
                out.push(0);
                conditions.encode(out, version);
                actions.encode(out, version);
            }
            Self::Event { event, actions } => {
                out.push(1);
                event.encode(out, version);
                actions.encode(out, version);
            }
        }
    }
}

impl Decode for Trigger {
    fn decode(reader: &mut Reader<'_>, version: Version) -> Result<Self, DecodeError> {
        Ok(match reader.tag(2)? {
            0 => Self::Property {
                conditions: Vec::decode(reader, version)?,
                actions: Vec::decode(reader, version)?,
            },
            _ => Self::Event {
                event: String::decode(reader, version)?,
                actions: Vec::decode(reader, version)?,
            },
        })
    }
}

impl Document {
    /// Encodes the document with the current schema version. See [`encode`].
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self)
    }

    /// Decodes a document. See [`decode`].
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        decode(data)
    }
}
