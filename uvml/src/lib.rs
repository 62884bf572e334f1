// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UVML is an XML markup language for declaring trees of UI elements.
//!
//! ```text
//! <Panel Class="toolbar">
//!     <Button Name="ok" Class="primary" Click="OnOk" Grid.Row="1">
//!         <Button.Content>
//!             <TextBlock Text="{{Labels.Ok}}"/>
//!         </Button.Content>
//!     </Button>
//! </Panel>
//! ```
//!
//! Types, their properties and events are described up front in a [`TypeRegistry`], and the
//! handlers markup may name are listed in a [`HandlerTable`]. [`instantiate`] then walks the
//! markup, creating an [`ElementTree`] and applying every member of every element through a
//! [`Mutator`]:
//!
//! - [`StandardPropertyMutator`] sets scalar properties.
//! - [`CollectionItemMutator`] appends to collection properties.
//! - [`EventHandlerMutator`] attaches event handlers.
//!
//! Once built, a tree can be refreshed from a [`BindingSource`] with
//! [`ElementTree::update_bindings`] and styled with a [`uvss::StyleSheet`] using
//! [`ElementTree::apply_styles`]. An element's effective value is its local value if set, else
//! its style value, else the registered default.

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

mod binding;
mod error;
mod handlers;
mod instantiate;
mod mutator;
mod registry;
mod style;
mod tree;
mod value;

#[cfg(test)]
mod tests;

pub use crate::binding::BindingSource;
pub use crate::error::{Error, ErrorKind};
pub use crate::handlers::{HandlerId, HandlerTable};
pub use crate::instantiate::{InstantiationOptions, instantiate};
pub use crate::mutator::{
    CollectionItemMutator, EventHandlerMutator, Mutator, MutatorValue, StandardPropertyMutator,
};
pub use crate::registry::{PropertyDescriptor, PropertyKind, TypeDescriptor, TypeRegistry};
pub use crate::tree::{Element, ElementId, ElementTree};
pub use crate::value::{Value, ValueType};
