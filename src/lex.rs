// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating text to a flat token stream. Unlike the
//! [reader](../read/index.html), nothing is decoded here: a token is
//! its kind plus the exact source text it covers, e.g. a string
//! token still has its quotes and backslash escapes.

//! At every position all rules are tried; the longest match wins, and
//! among matches of equal length the rule listed first in `RULES`
//! wins (so `true` is a boolean, not a symbol, but `trueish` is a
//! symbol). Whitespace, commas and `;` line comments are skipped.

use crate::pos::Pos;
use kstring::KString;
use thiserror::Error;
use genawaiter::rc::Gen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Boolean,
    Nil,
    Float,
    Number,
    OpenList,
    CloseList,
    OpenMap,
    CloseMap,
    OpenVector,
    CloseVector,
    OpenSet,
    Colon,
    CharNewline,
    CharTab,
    CharReturn,
    CharSpace,
    CharLiteral,
    NsSymbol,
    Symbol,
    String,
    Tag,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Boolean => "boolean",
            TokenKind::Nil => "nil",
            TokenKind::Float => "float",
            TokenKind::Number => "number",
            TokenKind::OpenList => "open-list",
            TokenKind::CloseList => "close-list",
            TokenKind::OpenMap => "open-map",
            TokenKind::CloseMap => "close-map",
            TokenKind::OpenVector => "open-vector",
            TokenKind::CloseVector => "close-vector",
            TokenKind::OpenSet => "open-set",
            TokenKind::Colon => "colon",
            TokenKind::CharNewline => "char-newline",
            TokenKind::CharTab => "char-tab",
            TokenKind::CharReturn => "char-return",
            TokenKind::CharSpace => "char-space",
            TokenKind::CharLiteral => "char-literal",
            TokenKind::NsSymbol => "namespaced-symbol",
            TokenKind::Symbol => "symbol",
            TokenKind::String => "string",
            TokenKind::Tag => "tag",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: KString,
    pub pos: Pos,
}

impl Token {
    /// The position right after the token.
    pub fn end(&self) -> Pos {
        self.pos.after_str(&self.text)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_str(&self.text)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("no token starts with '{0}'")]
    NoMatch(char),
    #[error("unterminated string starting")]
    UnterminatedString,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{err} {pos}")]
pub struct LexErrorWithPos {
    pub err: LexError,
    pub pos: Pos
}

impl LexError {
    fn at(self, p: Pos) -> LexErrorWithPos {
        LexErrorWithPos {
            err: self,
            pos: p
        }
    }
}

enum Rule {
    Exact(&'static str),
    Scan(fn(&str) -> Option<usize>),
}

impl Rule {
    /// Length in bytes of the match at the start of `s`.
    fn lex(&self, s: &str) -> Option<usize> {
        match self {
            Rule::Exact(t) => if s.starts_with(*t) { Some(t.len()) } else { None },
            Rule::Scan(f) => f(s),
        }
    }
}

const RULES: &[(TokenKind, Rule)] = &[
    (TokenKind::Boolean, Rule::Scan(lex_boolean)),
    (TokenKind::Nil, Rule::Exact("nil")),
    (TokenKind::Float, Rule::Scan(lex_float)),
    (TokenKind::Number, Rule::Scan(lex_number)),
    (TokenKind::OpenList, Rule::Exact("(")),
    (TokenKind::CloseList, Rule::Exact(")")),
    (TokenKind::OpenMap, Rule::Exact("{")),
    (TokenKind::CloseMap, Rule::Exact("}")),
    (TokenKind::OpenVector, Rule::Exact("[")),
    (TokenKind::CloseVector, Rule::Exact("]")),
    (TokenKind::OpenSet, Rule::Exact("#{")),
    (TokenKind::Colon, Rule::Exact(":")),
    (TokenKind::CharNewline, Rule::Exact("\\newline")),
    (TokenKind::CharTab, Rule::Exact("\\tab")),
    (TokenKind::CharReturn, Rule::Exact("\\return")),
    (TokenKind::CharSpace, Rule::Exact("\\space")),
    (TokenKind::CharLiteral, Rule::Scan(lex_char)),
    (TokenKind::NsSymbol, Rule::Scan(lex_ns_symbol)),
    (TokenKind::Symbol, Rule::Scan(lex_symbol)),
    (TokenKind::String, Rule::Scan(lex_string)),
    (TokenKind::Tag, Rule::Scan(lex_tag)),
];

pub fn is_symbol_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ".*+!-_?$%&=".contains(c)
}

pub fn is_symbol_char(c: char) -> bool {
    is_symbol_start_char(c) || c.is_ascii_digit() || c == ':' || c == '#'
}

pub fn is_whitespace_char(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn lex_boolean(s: &str) -> Option<usize> {
    if s.starts_with("true") {
        Some(4)
    } else if s.starts_with("false") {
        Some(5)
    } else {
        None
    }
}

fn count_digits(s: &str) -> usize {
    s.bytes().take_while(|b| b.is_ascii_digit()).count()
}

fn sign_len(s: &str) -> usize {
    match s.as_bytes().first() {
        Some(b'-' | b'+') => 1,
        _ => 0
    }
}

fn lex_number(s: &str) -> Option<usize> {
    let sign = sign_len(s);
    match count_digits(&s[sign..]) {
        0 => None,
        n => Some(sign + n)
    }
}

fn lex_float(s: &str) -> Option<usize> {
    for lit in [crate::number::INF, crate::number::NEG_INF, crate::number::NAN] {
        if s.starts_with(lit) {
            return Some(lit.len())
        }
    }
    let int = lex_number(s)?;
    let rest = s[int..].strip_prefix('.')?;
    match count_digits(rest) {
        0 => None,
        n => Some(int + 1 + n)
    }
}

fn lex_char(s: &str) -> Option<usize> {
    let c = s.strip_prefix('\\')?.chars().next()?;
    Some(1 + c.len_utf8())
}

pub fn lex_symbol(s: &str) -> Option<usize> {
    let mut cs = s.chars();
    if ! is_symbol_start_char(cs.next()?) {
        return None
    }
    // all symbol characters are ASCII
    Some(1 + cs.take_while(|c| is_symbol_char(*c)).count())
}

fn lex_ns_symbol(s: &str) -> Option<usize> {
    let ns = lex_symbol(s)?;
    let name = lex_symbol(s[ns..].strip_prefix('/')?)?;
    Some(ns + 1 + name)
}

fn lex_string(s: &str) -> Option<usize> {
    let mut cs = s.char_indices();
    if cs.next()?.1 != '"' {
        return None
    }
    while let Some((i, c)) = cs.next() {
        match c {
            '\\' => { cs.next()?; }
            '"' => return Some(i + 1),
            _ => {}
        }
    }
    None
}

fn lex_tag(s: &str) -> Option<usize> {
    Some(1 + lex_symbol(s.strip_prefix('#')?)?)
}

fn longest_match(s: &str) -> Option<(TokenKind, usize)> {
    let mut best: Option<(TokenKind, usize)> = None;
    for (kind, rule) in RULES {
        if let Some(len) = rule.lex(s) {
            if best.map_or(true, |(_, bestlen)| len > bestlen) {
                best = Some((*kind, len));
            }
        }
    }
    best
}

// Skip whitespace and comments starting at pos.
fn skip_ignored(s: &str, mut pos: Pos) -> Pos {
    let mut in_comment = false;
    for c in s[pos.offset..].chars() {
        if in_comment {
            if c == '\n' {
                in_comment = false;
            }
        } else if c == ';' {
            in_comment = true;
        } else if ! is_whitespace_char(c) {
            break;
        }
        pos = pos.after(c);
    }
    pos
}

/// Lazily tokenize `s`. After the first error, the iterator ends.
pub fn tokenize<'s>(
    s: &'s str,
) -> impl Iterator<Item = Result<Token, LexErrorWithPos>> + 's
{
    Gen::new(|co| async move {
        let mut pos = Pos::default();
        loop {
            pos = skip_ignored(s, pos);
            let rest = &s[pos.offset..];
            let c = if let Some(c) = rest.chars().next() {
                c
            } else {
                return;
            };
            if let Some((kind, len)) = longest_match(rest) {
                let text = &rest[..len];
                co.yield_(Ok(Token {
                    kind,
                    text: KString::from_ref(text),
                    pos
                })).await;
                pos = pos.after_str(text);
            } else {
                let err = if c == '"' {
                    LexError::UnterminatedString
                } else {
                    LexError::NoMatch(c)
                };
                co.yield_(Err(err.at(pos))).await;
                return;
            }
        }
    }).into_iter()
}

/// Tokenize all of `s` up front.
pub fn tokenize_all(s: &str) -> Result<Vec<Token>, LexErrorWithPos> {
    tokenize(s).collect()
}
