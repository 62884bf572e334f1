// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `formatted_text`, `uvss` and `uvml`.
//!
//! - The `util` module contains the fixtures shared by the tests: a monospace metrics
//!   provider, a formatted text registry and a UVML type registry.
//! - `scenarios.rs` holds the end-to-end layout scenarios every implementation of the layout
//!   engine must satisfy.
//! - `pipeline.rs` drives markup through styling into layout.
//! - `threads.rs` checks that independent passes can run concurrently.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod pipeline;
mod scenarios;
mod util;
