// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;

use crate::{ElementTree, Value};

/// Supplies values for `{{path}}` bindings.
pub trait BindingSource {
    /// Returns the current value at `path`, or `None` if the path does not resolve.
    fn resolve(&self, path: &str) -> Option<Value>;
}

impl<F> BindingSource for F
where
    F: Fn(&str) -> Option<Value>,
{
    fn resolve(&self, path: &str) -> Option<Value> {
        self(path)
    }
}

impl BindingSource for HashMap<String, Value> {
    fn resolve(&self, path: &str) -> Option<Value> {
        self.get(path).cloned()
    }
}

impl ElementTree<'_> {
    /// Resolves every binding against `source` and stores the results as local values,
    /// returning how many bindings were applied.
    ///
    /// Paths that do not resolve and values that cannot be converted to the bound member's
    /// type are logged and skipped, leaving any previous value in place.
    pub fn update_bindings(&mut self, source: &impl BindingSource) -> usize {
        let mut applied = 0;
        for node in &mut self.nodes {
            for binding in &node.bindings {
                let Some(value) = source.resolve(&binding.path) else {
                    log::debug!(
                        "binding `{}` of `{}.{}` did not resolve",
                        binding.path,
                        node.type_name,
                        binding.member
                    );
                    continue;
                };
                match value.coerce(binding.value_type) {
                    Some(value) => {
                        node.local.insert(binding.member.clone(), value);
                        applied += 1;
                    }
                    None => log::warn!(
                        "binding `{}` of `{}.{}` is not a {:?}",
                        binding.path,
                        node.type_name,
                        binding.member,
                        binding.value_type
                    ),
                }
            }
        }
        applied
    }
}
