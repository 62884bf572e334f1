// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UVSS is a CSS-like style sheet language for styling trees of UI elements.
//!
//! ```text
//! Button#ok.primary:hover, Panel > Label {
//!     foreground: red !important;
//!     trigger property IsEnabled = false {
//!         set opacity { 0.5 }
//!     }
//!     trigger event Click {
//!         play-sfx "click.wav";
//!     }
//! }
//! ```
//!
//! This crate provides:
//!
//! - A hand-rolled parser, [`parse`], producing an immutable [`Document`].
//! - [`Display`](core::fmt::Display) for the tree, re-emitting canonical UVSS source.
//! - A compact binary form, versioned by a [`Version`] read before anything else
//!   ([`encode`], [`decode`]).
//! - Selector matching against any [`StyledElement`] and cascade resolution with
//!   [`StyleSheet::resolve`].
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward
//!   compatibility.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod cascade;
mod codec;
mod error;
mod parser;
mod selector;
mod tree;

#[cfg(test)]
mod tests;

pub use crate::cascade::{ResolvedStyle, StyleSheet};
pub use crate::codec::{MAGIC, Version, decode, encode, encode_with_version, peek_version};
pub use crate::error::{DecodeError, DecodeErrorKind, ParseError, ParseErrorKind};
pub use crate::parser::parse;
pub use crate::selector::{Specificity, StyledElement};
pub use crate::tree::{
    Combinator, ComparisonOp, Document, Rule, RuleSet, Selector, SelectorPart, Trigger,
    TriggerAction, TriggerCondition,
};
