// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use crate::{ErrorKind, Lexer, Location, NBSP, TokenKind, escape, lex, location_of};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .unwrap()
        .iter()
        .map(|token| token.kind())
        .collect()
}

#[test]
fn empty_input() {
    assert!(lex("").unwrap().is_empty());
}

#[test]
fn classification() {
    use TokenKind::*;
    assert_eq!(
        kinds("Hi there\r\n|b|x\\|y\\ z\tend\r"),
        [
            Word,
            BreakingWhiteSpace,
            Word,
            NewLine,
            Command,
            Word,
            Pipe,
            Word,
            NonBreakingWhiteSpace,
            Word,
            BreakingWhiteSpace,
            Word,
            NewLine,
        ]
    );
}

#[test]
fn crlf_is_one_token() {
    let tokens = lex("a\r\nb").unwrap();
    assert_eq!(tokens[1].kind(), TokenKind::NewLine);
    assert_eq!(tokens[1].span(), 1..3);
}

#[test]
fn spans_concatenate_to_source() {
    let sources = [
        "plain words only",
        "tabs\tand  spaces\nand\r\nnewlines\r",
        "escapes \\| and \\ nbsp\u{a0}here",
        "mixed |c:red|commands|/c| too",
        "ünïcödé wörds, punctuation! 日本語",
        "trailing backslash \\",
    ];
    for source in sources {
        let rebuilt: String = lex(source)
            .unwrap()
            .iter()
            .map(|token| token.source_text())
            .collect();
        assert_eq!(rebuilt, source);
    }
}

#[test]
fn no_commands_without_pipes() {
    let tokens = lex("no commands here,\njust\u{a0}text \\| and a lone \\ backslash").unwrap();
    assert!(
        tokens
            .iter()
            .all(|token| token.kind() != TokenKind::Command)
    );
}

#[test]
fn command_text_excludes_delimiters() {
    let tokens = lex("x|font:heading|y").unwrap();
    assert_eq!(tokens[1].command_text(), Some("font:heading"));
    assert_eq!(tokens[1].source_text(), "|font:heading|");
    assert_eq!(tokens[0].command_text(), None);
}

#[test]
fn non_breaking_glyphs() {
    let tokens = lex("\\ \u{a0}\\ ").unwrap();
    assert_eq!(tokens.len(), 1);
    let mut glyphs = Vec::new();
    tokens[0].for_each_glyph(|ch, offset| glyphs.push((ch, offset)));
    assert_eq!(glyphs, [(NBSP, 0), (NBSP, 2), (NBSP, 4)]);
}

#[test]
fn pipe_glyph() {
    let tokens = lex("\\|").unwrap();
    let mut text = String::new();
    tokens[0].push_glyphs(&mut text);
    assert_eq!(text, "|");
}

#[test]
fn lone_backslash_is_word_character() {
    let tokens = lex("a\\b").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind(), TokenKind::Word);
}

#[test]
fn unterminated_command() {
    let err = lex("ok\nbad |c:red rest\nmore").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnterminatedCommand);
    assert!(err.is_lex_error());
    assert_eq!(err.span(), 7..18);
    assert_eq!(err.location(), Some(Location { line: 2, column: 5 }));
}

#[test]
fn command_cannot_span_lines() {
    assert_eq!(
        lex("|b\n|").unwrap_err().kind(),
        ErrorKind::UnterminatedCommand
    );
}

#[test]
fn lexer_stops_after_error() {
    let mut lexer = Lexer::new("a |b");
    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_err());
    assert!(lexer.next().is_none());
}

#[test]
fn locations() {
    let source = "ab\r\ncd\ref\ngh";
    assert_eq!(location_of(source, 0), Location { line: 1, column: 1 });
    assert_eq!(location_of(source, 5), Location { line: 2, column: 2 });
    assert_eq!(location_of(source, 7), Location { line: 3, column: 1 });
    assert_eq!(location_of(source, 10), Location { line: 4, column: 1 });
    assert_eq!(location_of(source, 100), Location { line: 4, column: 3 });
}

#[test]
fn escaped_text_lexes_to_literal_glyphs() {
    for raw in ["a|b|c \\ d", "C:\\ dir", "\\|x\\\\|", "end\\"] {
        let escaped = escape(raw);
        let tokens = lex(&escaped).unwrap();
        assert!(
        tokens
            .iter()
            .all(|token| token.kind() != TokenKind::Command)
    );
        assert!(
            tokens
                .iter()
                .all(|token| token.kind() != TokenKind::NonBreakingWhiteSpace),
            "{raw:?} should keep its spaces breaking"
        );
        let mut text = String::new();
        for token in &tokens {
            token.push_glyphs(&mut text);
        }
        assert_eq!(text, raw);
    }
}

#[test]
fn escaped_backslash() {
    assert_eq!(
        kinds("a\\\\ b"),
        [
            TokenKind::Word,
            TokenKind::Backslash,
            TokenKind::BreakingWhiteSpace,
            TokenKind::Word
        ]
    );
    let tokens = lex("a\\\\ b").unwrap();
    assert_eq!(tokens[1].span(), 1..3);
    let mut text = String::new();
    tokens[1].push_glyphs(&mut text);
    assert_eq!(text, "\\");
}
