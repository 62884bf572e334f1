// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of the rules that apply to an element.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::ParseError;
use crate::selector::{Specificity, StyledElement};
use crate::tree::{Document, Rule, Trigger};

/// A parsed style sheet ready to be matched against elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSheet {
    document: Document,
}

impl StyleSheet {
    /// Wraps a parsed document.
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Parses a style sheet from UVSS source.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        crate::parse(source).map(Self::new)
    }

    /// Returns the underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Resolves the rules and triggers that apply to `element`.
    ///
    /// When several rules set the same property, the winner is chosen by, in order:
    /// `!important`, then the specificity of the most specific matching selector of its
    /// rule set, then document order. Later rules win ties.
    pub fn resolve<E: StyledElement>(&self, element: &E) -> ResolvedStyle<'_> {
        let mut candidates: Vec<(bool, Specificity, usize, &Rule)> = Vec::new();
        let mut triggers = Vec::new();
        let mut order = 0;
        for rule_set in self.document.rule_sets() {
            let specificity = rule_set
                .selectors()
                .iter()
                .filter(|selector| selector.matches(element))
                .map(|selector| selector.specificity())
                .max();
            let Some(specificity) = specificity else {
                order += rule_set.rules().len();
                continue;
            };
            for rule in rule_set.rules() {
                candidates.push((rule.is_important(), specificity, order, rule));
                order += 1;
            }
            triggers.extend(rule_set.triggers());
        }
        candidates.sort_by_key(|&(important, specificity, order, _)| {
            (important, specificity, order)
        });

        let mut values = HashMap::with_capacity(candidates.len());
        for (_, _, _, rule) in candidates {
            values.insert(rule.property(), rule);
        }
        ResolvedStyle { values, triggers }
    }
}

/// The cascaded rules of one element.
#[derive(Clone, Debug, Default)]
pub struct ResolvedStyle<'a> {
    values: HashMap<&'a str, &'a Rule>,
    triggers: Vec<&'a Trigger>,
}

impl<'a> ResolvedStyle<'a> {
    /// The winning value for `property`.
    pub fn get(&self, property: &str) -> Option<&'a str> {
        self.values.get(property).map(|rule| rule.value())
    }

    /// The winning rule for `property`.
    pub fn rule(&self, property: &str) -> Option<&'a Rule> {
        self.values.get(property).copied()
    }

    /// Iterates over `(property, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.values
            .iter()
            .map(|(property, rule)| (*property, rule.value()))
    }

    /// The number of properties set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no property was set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Triggers of every matching rule set, in document order.
    pub fn triggers(&self) -> &[&'a Trigger] {
        &self.triggers
    }
}
