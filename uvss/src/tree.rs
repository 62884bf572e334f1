// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The UVSS syntax tree.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

/// A parsed style sheet: an ordered list of rule sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    rule_sets: Vec<RuleSet>,
}

impl Document {
    /// Creates a document from its rule sets.
    pub fn new(rule_sets: Vec<RuleSet>) -> Self {
        Self { rule_sets }
    }

    /// Returns the rule sets in document order.
    pub fn rule_sets(&self) -> &[RuleSet] {
        &self.rule_sets
    }
}

/// A selector list with the rules and triggers that apply to matching elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSet {
    selectors: Vec<Selector>,
    rules: Vec<Rule>,
    triggers: Vec<Trigger>,
}

impl RuleSet {
    /// Creates a rule set.
    pub fn new(selectors: Vec<Selector>, rules: Vec<Rule>, triggers: Vec<Trigger>) -> Self {
        Self {
            selectors,
            rules,
            triggers,
        }
    }

    /// Returns the comma separated selectors.
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Returns the property rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the triggers in declaration order.
    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }
}

/// How a selector part relates to the part before it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: the previous part matches any ancestor.
    Descendant,
    /// `>`: the previous part matches the parent.
    Child,
}

/// One compound selector, such as `Button#ok.primary:hover`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectorPart {
    pub(crate) combinator: Option<Combinator>,
    pub(crate) element: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: SmallVec<[String; 2]>,
    pub(crate) pseudo_class: Option<String>,
}

impl SelectorPart {
    /// Creates a universal part that matches every element.
    pub fn universal() -> Self {
        Self::default()
    }

    /// Creates a part that matches elements of the given type.
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            element: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the combinator linking this part to the previous one.
    #[must_use]
    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = Some(combinator);
        self
    }

    /// Requires the element name (`#id`).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Requires a class (`.class`).
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Requires a pseudo-class (`:hover`).
    #[must_use]
    pub fn with_pseudo_class(mut self, pseudo_class: impl Into<String>) -> Self {
        self.pseudo_class = Some(pseudo_class.into());
        self
    }

    /// The combinator linking this part to the previous one. `None` for the first part.
    pub fn combinator(&self) -> Option<Combinator> {
        self.combinator
    }

    /// The required type name, or `None` for the universal selector.
    pub fn element_name(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// The required element name.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The required classes.
    pub fn classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.iter().map(String::as_str)
    }

    /// The required pseudo-class.
    pub fn pseudo_class(&self) -> Option<&str> {
        self.pseudo_class.as_deref()
    }
}

/// A complex selector: compound parts joined by combinators, outermost first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    pub(crate) parts: Vec<SelectorPart>,
}

impl Selector {
    /// Creates a selector from its parts. The first part's combinator is ignored.
    pub fn new(mut parts: Vec<SelectorPart>) -> Self {
        if let Some(first) = parts.first_mut() {
            first.combinator = None;
        }
        Self { parts }
    }

    /// Returns the parts, outermost first.
    pub fn parts(&self) -> &[SelectorPart] {
        &self.parts
    }
}

/// A `property: value` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    property: String,
    value: String,
    important: bool,
}

impl Rule {
    /// Creates a rule.
    pub fn new(property: impl Into<String>, value: impl Into<String>, important: bool) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important,
        }
    }

    /// The property name.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The raw value text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the rule was marked `!important`.
    pub fn is_important(&self) -> bool {
        self.important
    }
}

/// A comparison in a property trigger condition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessOrEqual,
    /// `>=`
    GreaterOrEqual,
}

impl ComparisonOp {
    /// The operator as written in source.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessOrEqual => "<=",
            Self::GreaterOrEqual => ">=",
        }
    }
}

/// One `property op value` condition of a property trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerCondition {
    property: String,
    op: ComparisonOp,
    value: String,
}

impl TriggerCondition {
    /// Creates a condition.
    pub fn new(property: impl Into<String>, op: ComparisonOp, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            op,
            value: value.into(),
        }
    }

    /// The property being compared.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The comparison.
    pub fn op(&self) -> ComparisonOp {
        self.op
    }

    /// The raw value compared against.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Something a trigger does when it fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerAction {
    /// `set property { value }`
    Set {
        /// The property to set.
        property: String,
        /// The raw value.
        value: String,
    },
    /// `play-storyboard name;`
    PlayStoryboard(String),
    /// `play-sfx asset;`
    PlaySfx(String),
}

/// A trigger attached to a rule set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Fires while every condition holds.
    Property {
        /// Conditions, all of which must hold.
        conditions: Vec<TriggerCondition>,
        /// Actions to perform.
        actions: Vec<TriggerAction>,
    },
    /// Fires when the named event is raised.
    Event {
        /// The event name.
        event: String,
        /// Actions to perform.
        actions: Vec<TriggerAction>,
    },
}

impl Trigger {
    /// The actions of the trigger.
    pub fn actions(&self) -> &[TriggerAction] {
        match self {
            Self::Property { actions, .. } | Self::Event { actions, .. } => actions,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule_set) in self.rule_sets.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{rule_set}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        f.write_str(" {\n")?;
        for rule in &self.rules {
            writeln!(f, "    {rule}")?;
        }
        for trigger in &self.triggers {
            write!(f, "{trigger}")?;
        }
        f.write_str("}\n")
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match part.combinator {
                    Some(Combinator::Child) => f.write_str(" > ")?,
                    _ => f.write_str(" ")?,
                }
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(element) => f.write_str(element)?,
            None => {
                if self.id.is_none() && self.classes.is_empty() && self.pseudo_class.is_none() {
                    f.write_str("*")?;
                }
            }
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        if let Some(pseudo_class) = &self.pseudo_class {
            write!(f, ":{pseudo_class}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        f.write_str(";")
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property { conditions, .. } => {
                f.write_str("    trigger property ")?;
                for (i, condition) in conditions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(
                        f,
                        "{} {} {}",
                        condition.property,
                        condition.op.as_str(),
                        condition.value
                    )?;
                }
            }
            Self::Event { event, .. } => write!(f, "    trigger event {event}")?,
        }
        f.write_str(" {\n")?;
        for action in self.actions() {
            match action {
                TriggerAction::Set { property, value } => {
                    writeln!(f, "        set {property} {{ {value} }}")?;
                }
                TriggerAction::PlayStoryboard(name) => {
                    writeln!(f, "        play-storyboard {name};")?;
                }
                TriggerAction::PlaySfx(asset) => writeln!(f, "        play-sfx {asset};")?,
            }
        }
        f.write_str("    }\n")
    }
}
