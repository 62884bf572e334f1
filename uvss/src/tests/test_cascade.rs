// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{KITCHEN_SINK, TestTree};
use crate::{Specificity, StyleSheet, Trigger, parse};

fn specificity(selector: &str) -> Specificity {
    let source = alloc::format!("{selector} {{}}");
    let doc = parse(&source).unwrap();
    doc.rule_sets()[0].selectors()[0].specificity()
}

#[test]
fn specificity_counts_components() {
    assert_eq!(specificity("*"), Specificity::default());
    assert_eq!(
        specificity("Button#ok.a.b:hover"),
        Specificity {
            ids: 1,
            classes: 3,
            types: 1,
        }
    );
    assert_eq!(
        specificity("Panel > * Label"),
        Specificity {
            ids: 0,
            classes: 0,
            types: 2,
        }
    );
    assert!(specificity("#a") > specificity(".a.b.c.d Button"));
    assert!(specificity(".a") > specificity("Panel Grid Button"));
    assert!(specificity("Button") > specificity("*"));
}

#[test]
fn id_beats_class_beats_type_beats_universal() {
    let sheet = StyleSheet::parse(
        "#ok { c: id; } .primary { c: class; } Button { c: type; } * { c: universal; }",
    )
    .unwrap();
    let mut tree = TestTree::default();
    let ok = tree.add(None, "Button", Some("ok"), &["primary"]);
    let plain = tree.add(None, "Button", None, &["primary"]);
    let bare = tree.add(None, "Button", None, &[]);
    let other = tree.add(None, "Label", None, &[]);

    assert_eq!(sheet.resolve(&tree.get(ok)).get("c"), Some("id"));
    assert_eq!(sheet.resolve(&tree.get(plain)).get("c"), Some("class"));
    assert_eq!(sheet.resolve(&tree.get(bare)).get("c"), Some("type"));
    assert_eq!(sheet.resolve(&tree.get(other)).get("c"), Some("universal"));
}

#[test]
fn later_rules_win_ties() {
    let sheet = StyleSheet::parse("Button { c: 1; c: 2; } Button { c: 3; d: 4; }").unwrap();
    let mut tree = TestTree::default();
    let button = tree.add(None, "Button", None, &[]);
    let style = sheet.resolve(&tree.get(button));
    assert_eq!(style.get("c"), Some("3"));
    assert_eq!(style.get("d"), Some("4"));
    assert_eq!(style.len(), 2);
}

#[test]
fn important_beats_specificity() {
    let sheet = StyleSheet::parse("Button { c: b !important; } #ok { c: a; }").unwrap();
    let mut tree = TestTree::default();
    let ok = tree.add(None, "Button", Some("ok"), &[]);
    let style = sheet.resolve(&tree.get(ok));
    assert_eq!(style.get("c"), Some("b"));
    assert!(style.rule("c").unwrap().is_important());
}

#[test]
fn rule_set_uses_its_most_specific_matching_selector() {
    let sheet = StyleSheet::parse("Button, #ok { c: x; } .primary { c: y; }").unwrap();
    let mut tree = TestTree::default();
    let ok = tree.add(None, "Button", Some("ok"), &["primary"]);
    let plain = tree.add(None, "Button", None, &["primary"]);
    assert_eq!(sheet.resolve(&tree.get(ok)).get("c"), Some("x"));
    assert_eq!(sheet.resolve(&tree.get(plain)).get("c"), Some("y"));
}

#[test]
fn child_and_descendant_combinators() {
    let mut tree = TestTree::default();
    let panel = tree.add(None, "Panel", None, &[]);
    let grid = tree.add(Some(panel), "Grid", None, &[]);
    let label = tree.add(Some(grid), "Label", None, &[]);
    let label = tree.get(label);

    let matches = |selector: &str| {
        let source = alloc::format!("{selector} {{}}");
        let doc = parse(&source).unwrap();
        doc.rule_sets()[0].selectors()[0].matches(&label)
    };
    assert!(matches("Label"));
    assert!(matches("Panel Label"));
    assert!(matches("Grid > Label"));
    assert!(matches("Panel > Grid > Label"));
    assert!(matches("Panel > * > Label"));
    assert!(!matches("Panel > Label"));
    assert!(!matches("Label Label"));
    assert!(!matches("Grid"));
}

#[test]
fn descendant_matching_backtracks_past_nearer_ancestors() {
    let mut tree = TestTree::default();
    let window = tree.add(None, "Window", None, &[]);
    let panel = tree.add(Some(window), "Panel", None, &[]);
    let outer = tree.add(Some(panel), "Grid", None, &[]);
    let border = tree.add(Some(outer), "Border", None, &[]);
    let inner = tree.add(Some(border), "Grid", None, &[]);
    let label = tree.add(Some(inner), "Label", None, &[]);

    let sheet = StyleSheet::parse("Panel > Grid Label { c: hit; }").unwrap();
    assert_eq!(sheet.resolve(&tree.get(label)).get("c"), Some("hit"));
}

#[test]
fn type_names_ignore_case_but_classes_and_ids_do_not() {
    let mut tree = TestTree::default();
    let button = tree.add(None, "Button", Some("Ok"), &["Primary"]);
    let button = tree.get(button);
    let sheet = StyleSheet::parse("button { a: 1; } .primary { b: 1; } #ok { c: 1; }").unwrap();
    let style = sheet.resolve(&button);
    assert_eq!(style.get("a"), Some("1"));
    assert_eq!(style.get("b"), None);
    assert_eq!(style.get("c"), None);
}

#[test]
fn pseudo_classes_match_element_state() {
    let mut tree = TestTree::default();
    let hovered = tree.add(None, "Button", None, &[]);
    tree.set_pseudo_class(hovered, "hover");
    let idle = tree.add(None, "Button", None, &[]);
    let sheet = StyleSheet::parse("Button { c: idle; } Button:hover { c: hot; }").unwrap();
    assert_eq!(sheet.resolve(&tree.get(hovered)).get("c"), Some("hot"));
    assert_eq!(sheet.resolve(&tree.get(idle)).get("c"), Some("idle"));
}

#[test]
fn collects_triggers_of_matching_rule_sets() {
    let sheet = StyleSheet::parse(KITCHEN_SINK).unwrap();
    let mut tree = TestTree::default();
    let panel = tree.add(None, "Panel", None, &[]);
    let label = tree.add(Some(panel), "Label", None, &[]);
    let style = sheet.resolve(&tree.get(label));

    assert_eq!(style.get("foreground"), Some("red"));
    assert_eq!(style.get("margin"), Some("0"));
    assert_eq!(style.get("font"), None);
    assert_eq!(style.triggers().len(), 2);
    assert!(matches!(style.triggers()[1], Trigger::Event { event, .. } if event == "Click"));

    let alone = tree.add(None, "Label", None, &[]);
    let style = sheet.resolve(&tree.get(alone));
    assert!(style.triggers().is_empty());
    let mut pairs: alloc::vec::Vec<_> = style.iter().collect();
    pairs.sort();
    assert_eq!(pairs, [("margin", "0")]);
}
