// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal element tree for matching tests.

use alloc::vec::Vec;

use crate::StyledElement;

/// A shared style sheet exercising every syntax feature.
pub(crate) const KITCHEN_SINK: &str = r#"
/* Buttons */
Button#ok.primary:hover, Panel > Label {
    foreground: red !important;
    Grid.Row: 2;
    trigger property IsEnabled = false, Width >= 10 {
        set opacity { 0.5 }
        set content { "a; b" }
    }
    trigger event Click {
        play-storyboard fade-in;
        play-sfx "click.wav";
    }
}

* { margin: 0 }

.footer Label {
    font: body;
}
"#;

struct Node {
    type_name: &'static str,
    name: Option<&'static str>,
    classes: Vec<&'static str>,
    pseudo_classes: Vec<&'static str>,
    parent: Option<usize>,
}

#[derive(Default)]
pub(crate) struct TestTree {
    nodes: Vec<Node>,
}

impl TestTree {
    pub(crate) fn add(
        &mut self,
        parent: Option<usize>,
        type_name: &'static str,
        name: Option<&'static str>,
        classes: &[&'static str],
    ) -> usize {
        self.nodes.push(Node {
            type_name,
            name,
            classes: classes.to_vec(),
            pseudo_classes: Vec::new(),
            parent,
        });
        self.nodes.len() - 1
    }

    pub(crate) fn set_pseudo_class(&mut self, index: usize, pseudo_class: &'static str) {
        self.nodes[index].pseudo_classes.push(pseudo_class);
    }

    pub(crate) fn get(&self, index: usize) -> TestElement<'_> {
        TestElement { tree: self, index }
    }
}

#[derive(Copy, Clone)]
pub(crate) struct TestElement<'a> {
    tree: &'a TestTree,
    index: usize,
}

impl TestElement<'_> {
    fn node(&self) -> &Node {
        &self.tree.nodes[self.index]
    }
}

impl StyledElement for TestElement<'_> {
    fn type_name(&self) -> &str {
        self.node().type_name
    }

    fn name(&self) -> Option<&str> {
        self.node().name
    }

    fn has_class(&self, class: &str) -> bool {
        self.node().classes.contains(&class)
    }

    fn has_pseudo_class(&self, pseudo_class: &str) -> bool {
        self.node().pseudo_classes.contains(&pseudo_class)
    }

    fn parent(&self) -> Option<Self> {
        self.node().parent.map(|index| Self {
            tree: self.tree,
            index,
        })
    }
}
