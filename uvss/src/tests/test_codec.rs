// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use super::utils::KITCHEN_SINK;
use crate::{
    DecodeErrorKind, Document, MAGIC, Version, decode, encode, encode_with_version, parse,
    peek_version,
};

fn header(version: u32) -> Vec<u8> {
    let mut bytes = MAGIC.to_vec();
    bytes.extend_from_slice(&version.to_le_bytes());
    bytes
}

#[test]
fn decodes_what_it_encodes() {
    let doc = parse(KITCHEN_SINK).unwrap();
    let bytes = encode(&doc);
    assert_eq!(&bytes[..8], header(2).as_slice());
    assert_eq!(decode(&bytes).unwrap(), doc);
    assert_eq!(Document::from_bytes(&doc.to_bytes()).unwrap(), doc);
}

#[test]
fn empty_document() {
    let bytes = encode(&Document::default());
    let mut expected = header(2);
    expected.extend_from_slice(&0_u32.to_le_bytes());
    assert_eq!(bytes, expected);
    assert_eq!(decode(&bytes).unwrap(), Document::default());
}

#[test]
fn version_one_has_no_important_flag() {
    let doc = parse("A { b: c !important; d: e; }").unwrap();
    let v1 = encode_with_version(&doc, Version::V1);
    let v2 = encode(&doc);
    assert_eq!(peek_version(&v1).unwrap(), 1);
    // One flag byte per rule.
    assert_eq!(v2.len(), v1.len() + 2);

    let decoded = decode(&v1).unwrap();
    let rules = decoded.rule_sets()[0].rules();
    assert!(!rules[0].is_important());
    assert_eq!(rules[0].value(), "c");
    assert_eq!(rules[1].property(), "d");
}

#[test]
fn rejects_bad_headers() {
    let err = decode(b"UVSX\x02\0\0\0").unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::InvalidMagic);

    for version in [0, 3, u32::MAX] {
        let mut bytes = header(version);
        bytes.extend_from_slice(&0_u32.to_le_bytes());
        let err = decode(&bytes).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::UnsupportedVersion(version));
        assert_eq!(err.byte_offset(), 4);
    }
}

#[test]
fn every_truncation_fails() {
    let bytes = encode(&parse(KITCHEN_SINK).unwrap());
    for len in 0..bytes.len() {
        let kind = decode(&bytes[..len]).unwrap_err().kind();
        let expected = if len < MAGIC.len() {
            DecodeErrorKind::InvalidMagic
        } else {
            DecodeErrorKind::UnexpectedEof
        };
        assert_eq!(kind, expected, "truncated to {len} bytes");
    }
}

#[test]
fn rejects_trailing_bytes() {
    let mut bytes = encode(&Document::default());
    let end = bytes.len();
    bytes.push(0);
    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::TrailingBytes);
    assert_eq!(err.byte_offset(), end);
}

/// A document with one rule set, one selector and one part, up to the part's combinator.
fn one_part_prefix() -> Vec<u8> {
    let mut bytes = header(2);
    for count in [1_u32, 1, 1] {
        bytes.extend_from_slice(&count.to_le_bytes());
    }
    bytes
}

#[test]
fn rejects_invalid_tags() {
    let mut bytes = one_part_prefix();
    bytes.push(7);
    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::InvalidTag(7));
    assert_eq!(err.byte_offset(), 20);
}

#[test]
fn rejects_invalid_utf8() {
    let mut bytes = one_part_prefix();
    // No combinator, then an element name of one invalid byte.
    bytes.extend_from_slice(&[0, 1]);
    bytes.extend_from_slice(&1_u32.to_le_bytes());
    bytes.push(0xff);
    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::InvalidUtf8);
    assert_eq!(err.byte_offset(), 26);
}
