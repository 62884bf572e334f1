// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand-rolled recursive descent parser for UVSS source.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::ops::Range;

use crate::error::{ParseError, ParseErrorKind};
use crate::tree::{
    Combinator, ComparisonOp, Document, Rule, RuleSet, Selector, SelectorPart, Trigger,
    TriggerAction, TriggerCondition,
};

const IMPORTANT: &str = "!important";

/// Parses a UVSS style sheet.
///
/// Parsing stops at the first error, which carries the byte span and line/column of the
/// offending text.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let mut parser = Parser {
        source,
        bytes: source.as_bytes(),
        pos: 0,
    };
    let mut rule_sets = Vec::new();
    loop {
        parser.skip_trivia()?;
        if parser.peek().is_none() {
            break;
        }
        rule_sets.push(parser.rule_set()?);
    }
    Ok(Document::new(rule_sets))
}

struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, kind: ParseErrorKind, span: Range<usize>) -> ParseError {
        ParseError::new(kind, span, self.source)
    }

    /// An error for the byte at the cursor, or end of input.
    fn unexpected(&self) -> ParseError {
        if self.pos >= self.bytes.len() {
            self.error(ParseErrorKind::UnexpectedEof, self.pos..self.pos)
        } else {
            let end = self.source[self.pos..]
                .chars()
                .next()
                .map_or(self.pos + 1, |c| self.pos + c.len_utf8());
            self.error(ParseErrorKind::UnexpectedToken, self.pos..end)
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Skips whitespace and comments, returning whether anything was skipped.
    fn skip_trivia(&mut self) -> Result<bool, ParseError> {
        let start = self.pos;
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    let comment_start = self.pos;
                    match self.source[self.pos + 2..].find("*/") {
                        Some(end) => self.pos += 2 + end + 2,
                        None => {
                            return Err(self.error(
                                ParseErrorKind::UnterminatedComment,
                                comment_start..self.bytes.len(),
                            ));
                        }
                    }
                }
                _ => return Ok(self.pos > start),
            }
        }
    }

    fn ident(&mut self) -> Result<&'a str, ParseError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_byte) {
            self.pos += 1;
        }
        if self.pos == start {
            let mut err = self.unexpected();
            if err.kind() == ParseErrorKind::UnexpectedToken {
                err = self.error(ParseErrorKind::ExpectedIdentifier, err.span());
            }
            return Err(err);
        }
        Ok(&self.source[start..self.pos])
    }

    /// An identifier optionally qualified with dots, such as `Grid.Row`.
    fn property_name(&mut self) -> Result<&'a str, ParseError> {
        let start = self.pos;
        self.ident()?;
        while self.peek() == Some(b'.') && self.peek_at(1).is_some_and(is_ident_byte) {
            self.pos += 1;
            self.ident()?;
        }
        Ok(&self.source[start..self.pos])
    }

    /// Raw text up to (not including) one of `terminators`, trimmed.
    ///
    /// Double quoted strings are skipped whole so they may contain terminators.
    fn raw_value(&mut self, terminators: &[u8]) -> Result<(&'a str, Range<usize>), ParseError> {
        let start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(self.error(ParseErrorKind::UnexpectedEof, start..self.pos));
                }
                Some(b) if terminators.contains(&b) => break,
                Some(b'"') => {
                    self.pos += 1;
                    while self.peek().is_some_and(|b| b != b'"') {
                        self.pos += 1;
                    }
                    if !self.eat(b'"') {
                        return Err(self.error(ParseErrorKind::UnexpectedEof, start..self.pos));
                    }
                }
                Some(_) => self.pos += 1,
            }
        }
        let text = &self.source[start..self.pos];
        let trimmed = text.trim();
        let offset = start + (text.len() - text.trim_start().len());
        Ok((trimmed, offset..offset + trimmed.len()))
    }

    /// A raw value that must not be empty.
    fn value(&mut self, terminators: &[u8]) -> Result<&'a str, ParseError> {
        let (value, span) = self.raw_value(terminators)?;
        if value.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyValue, span));
        }
        Ok(value)
    }

    fn rule_set(&mut self) -> Result<RuleSet, ParseError> {
        let mut selectors = Vec::new();
        loop {
            selectors.push(self.selector()?);
            if self.eat(b',') {
                self.skip_trivia()?;
                continue;
            }
            self.expect(b'{')?;
            break;
        }

        let mut rules = Vec::new();
        let mut triggers = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.eat(b'}') {
                break;
            }
            let name_start = self.pos;
            let name = self.property_name()?;
            self.skip_trivia()?;
            if self.eat(b':') {
                rules.push(self.rule(name)?);
            } else if name == "trigger" {
                triggers.push(self.trigger()?);
            } else {
                let span = name_start..self.pos;
                return Err(self.error(ParseErrorKind::UnexpectedToken, span));
            }
        }
        Ok(RuleSet::new(selectors, rules, triggers))
    }

    /// Parses a complex selector, leaving the cursor on the `,` or `{` after it.
    fn selector(&mut self) -> Result<Selector, ParseError> {
        let mut parts = Vec::new();
        parts.push(self.selector_part(None)?);
        loop {
            let spaced = self.skip_trivia()?;
            match self.peek() {
                Some(b',' | b'{') => break,
                Some(b'>') => {
                    self.pos += 1;
                    self.skip_trivia()?;
                    parts.push(self.selector_part(Some(Combinator::Child))?);
                }
                Some(b) if spaced && starts_selector_part(b) => {
                    parts.push(self.selector_part(Some(Combinator::Descendant))?);
                }
                _ => return Err(self.unexpected()),
            }
        }
        Ok(Selector::new(parts))
    }

    fn selector_part(
        &mut self,
        combinator: Option<Combinator>,
    ) -> Result<SelectorPart, ParseError> {
        let start = self.pos;
        let invalid = |this: &Self| this.error(ParseErrorKind::InvalidSelector, start..this.pos);
        let mut part = SelectorPart {
            combinator,
            ..SelectorPart::default()
        };
        let mut any = false;
        if self.eat(b'*') {
            any = true;
        } else if self.peek().is_some_and(is_ident_byte) {
            part.element = Some(self.ident()?.to_string());
            any = true;
        }
        loop {
            match self.peek() {
                Some(b'#') => {
                    self.pos += 1;
                    if part.id.is_some() {
                        return Err(invalid(self));
                    }
                    part.id = Some(self.ident()?.to_string());
                }
                Some(b'.') => {
                    self.pos += 1;
                    part.classes.push(self.ident()?.to_string());
                }
                Some(b':') => {
                    self.pos += 1;
                    if part.pseudo_class.is_some() {
                        return Err(invalid(self));
                    }
                    part.pseudo_class = Some(self.ident()?.to_string());
                }
                _ => break,
            }
            any = true;
        }
        if !any {
            return Err(match self.peek() {
                None => self.unexpected(),
                Some(_) => {
                    self.pos += 1;
                    invalid(self)
                }
            });
        }
        Ok(part)
    }

    fn rule(&mut self, property: &str) -> Result<Rule, ParseError> {
        let (mut value, mut span) = self.raw_value(b";}")?;
        let mut important = false;
        if let Some(rest) = value.strip_suffix(IMPORTANT) {
            important = true;
            value = rest.trim_end();
            span.end = span.start + value.len();
        }
        if value.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyValue, span));
        }
        // The last rule of a block may omit its semicolon.
        self.eat(b';');
        Ok(Rule::new(property, value, important))
    }

    fn trigger(&mut self) -> Result<Trigger, ParseError> {
        let kind_start = self.pos;
        let kind = self.ident()?;
        let trigger = match kind {
            "property" => {
                let mut conditions = Vec::new();
                loop {
                    self.skip_trivia()?;
                    let property = self.property_name()?;
                    self.skip_trivia()?;
                    let op = self.comparison_op()?;
                    let value = self.value(b",{")?;
                    conditions.push(TriggerCondition::new(property, op, value));
                    if !self.eat(b',') {
                        break;
                    }
                }
                let actions = self.actions()?;
                Trigger::Property {
                    conditions,
                    actions,
                }
            }
            "event" => {
                self.skip_trivia()?;
                let event = self.property_name()?.to_string();
                self.skip_trivia()?;
                let actions = self.actions()?;
                Trigger::Event { event, actions }
            }
            _ => {
                let span = kind_start..self.pos;
                return Err(self.error(ParseErrorKind::UnknownTrigger, span));
            }
        };
        Ok(trigger)
    }

    fn comparison_op(&mut self) -> Result<ComparisonOp, ParseError> {
        let (op, len) = match (self.peek(), self.peek_at(1)) {
            (Some(b'<'), Some(b'>')) => (ComparisonOp::NotEqual, 2),
            (Some(b'<'), Some(b'=')) => (ComparisonOp::LessOrEqual, 2),
            (Some(b'>'), Some(b'=')) => (ComparisonOp::GreaterOrEqual, 2),
            (Some(b'<'), _) => (ComparisonOp::Less, 1),
            (Some(b'>'), _) => (ComparisonOp::Greater, 1),
            (Some(b'='), _) => (ComparisonOp::Equal, 1),
            (None, _) => return Err(self.unexpected()),
            _ => {
                let err = self.unexpected();
                return Err(self.error(ParseErrorKind::InvalidOperator, err.span()));
            }
        };
        self.pos += len;
        Ok(op)
    }

    /// Parses a `{ action* }` block.
    fn actions(&mut self) -> Result<Vec<TriggerAction>, ParseError> {
        self.expect(b'{')?;
        let mut actions = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.eat(b'}') {
                break;
            }
            let name_start = self.pos;
            let action = match self.ident()? {
                "set" => {
                    self.skip_trivia()?;
                    let property = self.property_name()?.to_string();
                    self.skip_trivia()?;
                    self.expect(b'{')?;
                    let value = self.value(b"}")?.to_string();
                    self.expect(b'}')?;
                    TriggerAction::Set { property, value }
                }
                "play-storyboard" => {
                    let name = self.value(b";}")?.to_string();
                    self.eat(b';');
                    TriggerAction::PlayStoryboard(name)
                }
                "play-sfx" => {
                    let asset = self.value(b";}")?.to_string();
                    self.eat(b';');
                    TriggerAction::PlaySfx(asset)
                }
                _ => {
                    let span = name_start..self.pos;
                    return Err(self.error(ParseErrorKind::UnknownAction, span));
                }
            };
            actions.push(action);
        }
        Ok(actions)
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b >= 0x80
}

fn starts_selector_part(b: u8) -> bool {
    is_ident_byte(b) || matches!(b, b'*' | b'#' | b'.' | b':')
}

impl core::str::FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
