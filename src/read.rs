// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building a [Value](crate::value::Value) tree from a token
//! sequence. A document is exactly one value; the whole input is
//! tokenized before reading starts.

use crate::context::Origin;
use crate::coll::{Map, Set};
use crate::lex::{Token, TokenKind, LexError, LexErrorWithPos, tokenize_all};
use crate::number::{read_integer, read_float};
use crate::pos::Pos;
use crate::settings::Settings;
use crate::source::{read_text, SourceErrorWithPos};
use crate::value::{Value, Parenkind, name2char};
use kstring::KString;
use std::path::Path;
use std::fs::File;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{0}")]
    Lex(LexError),
    #[error("ran into a {0} where it wasn't expected")]
    Unexpected(TokenKind),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("premature EOF while expecting closing character '{}' for '{}'",
            .0.closing(), .0.opening())]
    PrematureEofExpectingClosingParen(Parenkind),
    #[error("no registered constructor for tag '{0}'")]
    UnknownTag(KString),
    #[error("constructor for tag '{0}' failed: {1}")]
    TagConstructor(KString, anyhow::Error),
    #[error("invalid number literal '{0}'")]
    InvalidNumber(KString),
    #[error("malformed string literal")]
    MalformedString,
    #[error("invalid escaped character '{0}' in string")]
    InvalidEscapedChar(char),
    #[error("not a hex digit: '{0}'")]
    NonHexDigit(char),
    #[error("invalid code point {0:#x} in string")]
    InvalidCodePoint(u32),
    #[error("nesting too deep")]
    NestingTooDeep,
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ReadErrorWithPos {
    pub err: ReadError,
    pub pos: Pos
}

impl ReadError {
    fn at(self, p: Pos) -> ReadErrorWithPos {
        ReadErrorWithPos {
            err: self,
            pos: p
        }
    }
}

impl From<LexErrorWithPos> for ReadErrorWithPos {
    fn from(ep: LexErrorWithPos) -> ReadErrorWithPos {
        let LexErrorWithPos { err, pos } = ep;
        ReadErrorWithPos {
            err: ReadError::Lex(err),
            pos
        }
    }
}

/// Errors from reading files or stdin, with the origin in the
/// message.
#[derive(Error, Debug)]
pub enum ReadErrorWithLocation {
    #[error("{1}: {0}")]
    IO(std::io::Error, Origin),
    #[error("{} {}", .0.err, .1.with_pos(.0.pos))]
    Source(SourceErrorWithPos, Origin),
    #[error("{} {}", .0.err, .1.with_pos(.0.pos))]
    Read(ReadErrorWithPos, Origin),
}


// Exactly 4 hex digits, as in `\u00e9`
fn read_hex4(cs: &mut impl Iterator<Item = char>) -> Result<u32, ReadError> {
    let mut n = 0;
    for _ in 0..4 {
        let c = cs.next().ok_or(ReadError::MalformedString)?;
        n = n * 16 + c.to_digit(16).ok_or(ReadError::NonHexDigit(c))?;
    }
    Ok(n)
}

fn read_unicode_escape(cs: &mut impl Iterator<Item = char>) -> Result<char, ReadError> {
    let code = read_hex4(cs)?;
    let code =
        if (0xD800..0xDC00).contains(&code) {
            // high surrogate, must be followed by an escaped low one
            if cs.next() != Some('\\') || cs.next() != Some('u') {
                return Err(ReadError::InvalidCodePoint(code))
            }
            let low = read_hex4(cs)?;
            if ! (0xDC00..0xE000).contains(&low) {
                return Err(ReadError::InvalidCodePoint(low))
            }
            0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00)
        } else {
            code
        };
    char::from_u32(code).ok_or(ReadError::InvalidCodePoint(code))
}

/// Decode the text of a string token, including its quotes.
pub fn decode_string(text: &str) -> Result<String, ReadError> {
    let inner = text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(ReadError::MalformedString)?;
    let mut out = String::with_capacity(inner.len());
    let mut cs = inner.chars();
    while let Some(c) = cs.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let e = cs.next().ok_or(ReadError::MalformedString)?;
        let replacement = match e {
            '\\' => '\\',
            '"' => '"',
            '/' => '/',
            'b' => '\x08',
            'f' => '\x0C',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => read_unicode_escape(&mut cs)?,
            _ => return Err(ReadError::InvalidEscapedChar(e))
        };
        out.push(replacement);
    }
    Ok(out)
}

fn closing_kind(pk: Parenkind) -> TokenKind {
    match pk {
        Parenkind::Round => TokenKind::CloseList,
        Parenkind::Square => TokenKind::CloseVector,
        Parenkind::Curly | Parenkind::HashCurly => TokenKind::CloseMap,
    }
}

struct Reader<'a, 't> {
    tokens: &'a [Token],
    i: usize,
    settings: &'a Settings<'t>,
    /// Position after the last token
    end: Pos,
}

impl<'a, 't> Reader<'a, 't> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.i)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let t = self.tokens.get(self.i)?;
        self.i += 1;
        Some(t)
    }

    // The next member of a collection opened at startpos, None at
    // the closing token.
    fn member(
        &mut self,
        pk: Parenkind,
        startpos: Pos,
        depth_fuel: u32
    ) -> Result<Option<Value>, ReadErrorWithPos> {
        match self.peek() {
            None => Err(ReadError::PrematureEofExpectingClosingParen(pk)
                        .at(startpos)),
            Some(t) if t.kind == closing_kind(pk) => {
                self.i += 1;
                Ok(None)
            }
            Some(_) => Ok(Some(self.value(depth_fuel)?))
        }
    }

    fn items(
        &mut self,
        pk: Parenkind,
        startpos: Pos,
        depth_fuel: u32
    ) -> Result<Vec<Value>, ReadErrorWithPos> {
        let mut v = Vec::new();
        while let Some(item) = self.member(pk, startpos, depth_fuel)? {
            v.push(item);
        }
        Ok(v)
    }

    fn pairs(
        &mut self,
        startpos: Pos,
        depth_fuel: u32
    ) -> Result<Map, ReadErrorWithPos> {
        let mut m = Map::new();
        while let Some(key) = self.member(Parenkind::Curly, startpos, depth_fuel)? {
            // an odd number of forms ends up here with the closing
            // token, which `value` rejects
            if self.peek().is_none() {
                return Err(ReadError::PrematureEofExpectingClosingParen(
                    Parenkind::Curly).at(startpos))
            }
            let val = self.value(depth_fuel)?;
            m.insert(key, val);
        }
        Ok(m)
    }

    // The name is the next token, whitespace in between is allowed
    // like between any tokens.
    fn keyword(&mut self) -> Result<Value, ReadErrorWithPos> {
        let t = self.next().ok_or_else(|| ReadError::UnexpectedEof.at(self.end))?;
        match t.kind {
            TokenKind::Symbol | TokenKind::NsSymbol
                | TokenKind::Boolean | TokenKind::Nil =>
                Ok(Value::Keyword(t.text.clone())),
            kind => Err(ReadError::Unexpected(kind).at(t.pos))
        }
    }

    fn tagged(&mut self, tag: &Token, depth_fuel: u32) -> Result<Value, ReadErrorWithPos> {
        let name = &tag.text[1..];
        let payload = self.value(depth_fuel)?;
        if let Some(constructor) = self.settings.tags.get(name) {
            constructor.construct(payload).map_err(|e| {
                ReadError::TagConstructor(KString::from_ref(name), e).at(tag.pos)
            })
        } else if self.settings.accept_unknown_tags {
            Ok(Value::tagged(name, payload))
        } else {
            Err(ReadError::UnknownTag(KString::from_ref(name)).at(tag.pos))
        }
    }

    fn value(&mut self, depth_fuel: u32) -> Result<Value, ReadErrorWithPos> {
        let t = self.next().ok_or_else(|| ReadError::UnexpectedEof.at(self.end))?;
        let nested = |depth_fuel: u32| {
            if depth_fuel == 0 {
                Err(ReadError::NestingTooDeep.at(t.pos))
            } else {
                Ok(depth_fuel - 1)
            }
        };
        let invalid_number = || ReadError::InvalidNumber(t.text.clone()).at(t.pos);
        match t.kind {
            TokenKind::OpenList => {
                let fuel = nested(depth_fuel)?;
                Ok(Value::List(self.items(Parenkind::Round, t.pos, fuel)?))
            }
            TokenKind::OpenVector => {
                let fuel = nested(depth_fuel)?;
                Ok(Value::Vector(self.items(Parenkind::Square, t.pos, fuel)?))
            }
            TokenKind::OpenSet => {
                let fuel = nested(depth_fuel)?;
                let items = self.items(Parenkind::HashCurly, t.pos, fuel)?;
                Ok(Value::Set(items.into_iter().collect::<Set>()))
            }
            TokenKind::OpenMap => {
                let fuel = nested(depth_fuel)?;
                Ok(Value::Map(self.pairs(t.pos, fuel)?))
            }
            TokenKind::Number =>
                read_integer(&t.text).map(Value::Int).ok_or_else(invalid_number),
            TokenKind::Float =>
                read_float(&t.text).map(Value::Float).ok_or_else(invalid_number),
            TokenKind::Nil => Ok(Value::Nil),
            TokenKind::Boolean => Ok(Value::Bool(t.text.as_str() == "true")),
            TokenKind::CharNewline
                | TokenKind::CharTab
                | TokenKind::CharReturn
                | TokenKind::CharSpace =>
                name2char(&t.text[1..]).map(Value::Char)
                .ok_or_else(|| ReadError::Unexpected(t.kind).at(t.pos)),
            TokenKind::CharLiteral =>
                t.text.chars().nth(1).map(Value::Char)
                .ok_or_else(|| ReadError::Unexpected(t.kind).at(t.pos)),
            TokenKind::String =>
                decode_string(&t.text).map(|s| Value::Str(KString::from(s)))
                .map_err(|e| e.at(t.pos)),
            TokenKind::Symbol | TokenKind::NsSymbol =>
                Ok(Value::Symbol(t.text.clone())),
            TokenKind::Colon => self.keyword(),
            TokenKind::Tag => {
                let fuel = nested(depth_fuel)?;
                self.tagged(t, fuel)
            }
            TokenKind::CloseList
                | TokenKind::CloseVector
                | TokenKind::CloseMap =>
                Err(ReadError::Unexpected(t.kind).at(t.pos)),
        }
    }
}

/// Read exactly one value from `tokens`; trailing tokens are an
/// error.
pub fn read_tokens(
    tokens: &[Token],
    settings: &Settings,
) -> Result<Value, ReadErrorWithPos>
{
    let mut reader = Reader {
        tokens,
        i: 0,
        settings,
        end: tokens.last().map(Token::end).unwrap_or_default(),
    };
    let v = reader.value(settings.max_depth)?;
    if let Some(t) = reader.peek() {
        return Err(ReadError::Unexpected(t.kind).at(t.pos))
    }
    Ok(v)
}

/// Parse `s` with the given tag registry and unknown-tag policy.
pub fn loads_with(s: &str, settings: &Settings) -> Result<Value, ReadErrorWithPos> {
    let tokens = tokenize_all(s)?;
    read_tokens(&tokens, settings)
}

/// Parse `s` without tag constructors; any tagged literal is an
/// error.
pub fn loads(s: &str) -> Result<Value, ReadErrorWithPos> {
    loads_with(s, &Settings::default())
}

fn read_with_origin(
    fh: impl std::io::Read,
    settings: &Settings,
    origin: Origin,
) -> Result<Value, ReadErrorWithLocation> {
    let text = match read_text(fh) {
        Ok(text) => text,
        Err(e) => return Err(ReadErrorWithLocation::Source(e, origin))
    };
    loads_with(&text, settings).map_err(|e| ReadErrorWithLocation::Read(e, origin))
}

pub fn read_file(path: &Path, settings: &Settings) -> Result<Value, ReadErrorWithLocation> {
    let origin = Origin::File(path.to_path_buf());
    match File::open(path) {
        Ok(fh) => read_with_origin(fh, settings, origin),
        Err(e) => Err(ReadErrorWithLocation::IO(e, origin))
    }
}

pub fn read_stdin(settings: &Settings) -> Result<Value, ReadErrorWithLocation> {
    read_with_origin(std::io::stdin().lock(), settings, Origin::Stdin)
}
