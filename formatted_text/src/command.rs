// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of `|...|` commands.

use core::ops::Range;

use crate::error::{Error, ErrorKind};
use crate::{CustomCommandId, Registry};

/// A push or pop of one of the layout stacks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StackOp<T> {
    /// Push a new entry.
    Push(T),
    /// Pop the most recent entry.
    Pop,
}

/// A parsed command.
///
/// Names are not yet resolved against a registry; see [`TextLayoutEngine`] for resolution.
///
/// [`TextLayoutEngine`]: crate::TextLayoutEngine
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandNode<'a> {
    /// `b` and `/b`.
    Bold(bool),
    /// `i` and `/i`.
    Italic(bool),
    /// `style:<name>` and `/style`.
    Style(StackOp<&'a str>),
    /// `font:<name>` and `/font`.
    Font(StackOp<&'a str>),
    /// `c:<color>` and `/c`.
    Color(StackOp<&'a str>),
    /// `shader:<name>` and `/shader`.
    Shader(StackOp<&'a str>),
    /// `link:<target>` and `/link`.
    Link(StackOp<&'a str>),
    /// `icon:<name>`.
    Icon(&'a str),
    /// A command registered with [`Registry::register_command`].
    Custom {
        /// The registered command.
        id: CustomCommandId,
        /// The command's argument, if any.
        argument: Option<&'a str>,
    },
}

/// A command's name and argument, with the byte spans of each relative to the command text.
struct Parts<'a> {
    name: &'a str,
    name_span: Range<usize>,
    argument: Option<(&'a str, Range<usize>)>,
}

fn split(raw: &str) -> Result<Parts<'_>, Error> {
    let leading = raw.len() - raw.trim_start().len();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::new(ErrorKind::EmptyCommand, 0..raw.len()));
    }
    let name_len = trimmed
        .find(|c: char| c == ':' || c.is_whitespace())
        .unwrap_or(trimmed.len());
    let name = &trimmed[..name_len];
    let name_span = leading..leading + name_len;
    if name.is_empty() {
        return Err(Error::new(ErrorKind::UnknownCommand, leading..leading + 1));
    }
    if name_len == trimmed.len() {
        return Ok(Parts {
            name,
            name_span,
            argument: None,
        });
    }
    // Skip the separator: a single colon, or a run of whitespace optionally followed by one.
    let rest = &trimmed[name_len..];
    let rest_trimmed = rest.trim_start();
    let rest_trimmed = rest_trimmed.strip_prefix(':').unwrap_or(rest_trimmed);
    let argument = rest_trimmed.trim();
    let arg_start = offset_in(raw, argument);
    if argument.is_empty() {
        return Err(Error::new(
            ErrorKind::MalformedArgument,
            leading + name_len..leading + trimmed.len(),
        ));
    }
    Ok(Parts {
        name,
        name_span,
        argument: Some((argument, arg_start..arg_start + argument.len())),
    })
}

/// Parses the text between a command's pipes.
///
/// Arguments follow the name after a colon or whitespace (`c:red`, `c red`). Command names are
/// matched without regard to ASCII case; arguments are kept verbatim apart from trimming.
///
/// Error spans are relative to `raw`.
pub fn parse_command<'a>(raw: &'a str, registry: &Registry) -> Result<CommandNode<'a>, Error> {
    let parts = split(raw)?;
    let name = parts.name;
    let is = |expected: &str| name.eq_ignore_ascii_case(expected);

    let no_argument = |node: CommandNode<'a>| match &parts.argument {
        Some((_, span)) => Err(Error::new(ErrorKind::MalformedArgument, span.clone())),
        None => Ok(node),
    };
    let argument = || match &parts.argument {
        Some((argument, _)) => Ok(*argument),
        None => Err(Error::new(
            ErrorKind::MalformedArgument,
            parts.name_span.clone(),
        )),
    };

    if is("b") {
        no_argument(CommandNode::Bold(true))
    } else if is("/b") {
        no_argument(CommandNode::Bold(false))
    } else if is("i") {
        no_argument(CommandNode::Italic(true))
    } else if is("/i") {
        no_argument(CommandNode::Italic(false))
    } else if is("c") {
        argument().map(|a| CommandNode::Color(StackOp::Push(a)))
    } else if is("/c") {
        no_argument(CommandNode::Color(StackOp::Pop))
    } else if is("font") {
        argument().map(|a| CommandNode::Font(StackOp::Push(a)))
    } else if is("/font") {
        no_argument(CommandNode::Font(StackOp::Pop))
    } else if is("style") {
        argument().map(|a| CommandNode::Style(StackOp::Push(a)))
    } else if is("/style") {
        no_argument(CommandNode::Style(StackOp::Pop))
    } else if is("shader") {
        argument().map(|a| CommandNode::Shader(StackOp::Push(a)))
    } else if is("/shader") {
        no_argument(CommandNode::Shader(StackOp::Pop))
    } else if is("link") {
        argument().map(|a| CommandNode::Link(StackOp::Push(a)))
    } else if is("/link") {
        no_argument(CommandNode::Link(StackOp::Pop))
    } else if is("icon") {
        argument().map(CommandNode::Icon)
    } else if let Some(id) = registry.command_id(name) {
        Ok(CommandNode::Custom {
            id,
            argument: parts.argument.as_ref().map(|(argument, _)| *argument),
        })
    } else {
        Err(Error::new(
            ErrorKind::UnknownCommand,
            parts.name_span.clone(),
        ))
    }
}

/// Byte offset of `inner`, a subslice of `outer`, within `outer`.
fn offset_in(outer: &str, inner: &str) -> usize {
    inner.as_ptr() as usize - outer.as_ptr() as usize
}

/// Returns the byte span of a command's argument relative to the command text, or the span of
/// the whole command text if it has none.
pub(crate) fn argument_span(raw: &str) -> Range<usize> {
    match split(raw) {
        Ok(Parts {
            argument: Some((_, span)),
            ..
        }) => span,
        _ => 0..raw.len(),
    }
}
