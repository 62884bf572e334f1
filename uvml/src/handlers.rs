// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;

/// Identifies an event handler registered in a [`HandlerTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u32);

impl HandlerId {
    /// The index of the handler in registration order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The event handlers markup may refer to by name.
///
/// The table only hands out ids; the host maps ids to the code to run when
/// [`ElementTree::raise`](crate::ElementTree::raise) reports them.
#[derive(Clone, Debug, Default)]
pub struct HandlerTable {
    names: HashMap<String, HandlerId>,
}

impl HandlerTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler name, returning its id. Registering a name twice returns the
    /// same id.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "handler ids are u32 indices"
    )]
    pub fn register(&mut self, name: impl Into<String>) -> HandlerId {
        let next = HandlerId(self.names.len() as u32);
        *self.names.entry(name.into()).or_insert(next)
    }

    /// Looks up a handler by name.
    pub fn get(&self, name: &str) -> Option<HandlerId> {
        self.names.get(name).copied()
    }

    /// The number of registered handlers.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
