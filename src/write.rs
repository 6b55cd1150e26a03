// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The canonical text form of values. Writing does no layout:
//! sequence items are separated by a single space, map entries by
//! `, `, and members of maps and sets come out in insertion order.

use crate::coll::{Map, Set};
use crate::number::write_float;
use crate::value::{Value, Extension, char2name};
use kstring::KString;
use num::BigInt;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt::Write;
use std::hash::BuildHasher;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WriteError {
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),
    #[error("formatter error")]
    Fmt,
}

impl From<std::fmt::Error> for WriteError {
    fn from(_: std::fmt::Error) -> WriteError {
        WriteError::Fmt
    }
}

/// Write `s` double-quoted with escapes; control characters without
/// a short escape become `\u00XX`.
pub fn write_string(out: &mut impl Write, s: &str) -> std::fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '\\' => out.write_str("\\\\")?,
            '"' => out.write_str("\\\"")?,
            '\x08' => out.write_str("\\b")?,
            '\x0C' => out.write_str("\\f")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if (c as u32) < 0x20 => out.write_fmt(format_args!("\\u{:04x}", c as u32))?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

pub fn encode_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    // writing to a String does not fail
    let _ = write_string(&mut out, s);
    out
}

pub fn write_char(out: &mut impl Write, c: char) -> std::fmt::Result {
    out.write_char('\\')?;
    if let Some(name) = char2name(c) {
        out.write_str(name)
    } else {
        out.write_char(c)
    }
}

/// What to do with extensions that have no EDN form.
#[derive(Clone, Copy)]
enum Mode {
    Strict,
    /// Write a `#<unsupported ...>` placeholder, which is not EDN.
    Lenient,
}

fn write_seq<'v, W: Write>(
    out: &mut W,
    opening: &str,
    items: impl IntoIterator<Item = &'v Value>,
    closing: char,
    mode: Mode
) -> Result<(), WriteError> {
    out.write_str(opening)?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        write(out, item, mode)?;
    }
    out.write_char(closing)?;
    Ok(())
}

fn write_map<W: Write>(out: &mut W, m: &Map, mode: Mode) -> Result<(), WriteError> {
    out.write_char('{')?;
    for (i, (k, v)) in m.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write(out, k, mode)?;
        out.write_char(' ')?;
        write(out, v, mode)?;
    }
    out.write_char('}')?;
    Ok(())
}

fn write_tagged<W: Write>(
    out: &mut W,
    tag: &str,
    payload: &Value,
    mode: Mode
) -> Result<(), WriteError> {
    match (tag, payload) {
        ("char", Value::Char(c)) => Ok(write_char(out, *c)?),
        ("char", Value::Str(s)) if s.chars().count() == 1 => {
            let c = s.chars().next().unwrap_or_default();
            Ok(write_char(out, c)?)
        }
        ("list", Value::List(items) | Value::Vector(items)) => {
            write_seq(out, "(", items, ')', mode)
        }
        _ => {
            out.write_char('#')?;
            out.write_str(tag)?;
            out.write_char(' ')?;
            write(out, payload, mode)
        }
    }
}

fn write_extension<W: Write>(
    out: &mut W,
    e: &Arc<dyn Extension>,
    mode: Mode
) -> Result<(), WriteError> {
    match e.to_edn() {
        Some(Value::Extension(_)) | None => match mode {
            Mode::Strict => Err(WriteError::UnsupportedValue(format!("{:?}", e))),
            Mode::Lenient => Ok(out.write_fmt(format_args!("#<unsupported {:?}>", e))?),
        },
        Some(v) => write(out, &v, mode),
    }
}

/// Write the canonical encoding of `v`; fails with
/// `UnsupportedValue` for extensions without an EDN form.
pub fn write_value<W: Write>(out: &mut W, v: &Value) -> Result<(), WriteError> {
    write(out, v, Mode::Strict)
}

fn write<W: Write>(out: &mut W, v: &Value, mode: Mode) -> Result<(), WriteError> {
    match v {
        Value::Nil => out.write_str("nil")?,
        Value::Bool(b) => out.write_str(if *b { "true" } else { "false" })?,
        Value::Int(n) => out.write_fmt(format_args!("{}", n))?,
        Value::Float(x) => write_float(out, *x)?,
        Value::Str(s) => write_string(out, s)?,
        Value::Char(c) => write_char(out, *c)?,
        Value::Symbol(s) => out.write_str(s)?,
        Value::Keyword(s) => {
            out.write_char(':')?;
            out.write_str(s)?
        }
        Value::List(items) => write_seq(out, "(", items, ')', mode)?,
        Value::Vector(items) => write_seq(out, "[", items, ']', mode)?,
        Value::Set(items) => write_seq(out, "#{", items, '}', mode)?,
        Value::Map(m) => write_map(out, m, mode)?,
        Value::Tagged(tag, payload) => write_tagged(out, tag, payload, mode)?,
        Value::Extension(e) => write_extension(out, e, mode)?,
    }
    Ok(())
}

/// The canonical encoding, except that extensions without an EDN
/// form show as `#<unsupported ...>`. Use [dumps](dumps) to get an
/// error for those instead.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        write(f, self, Mode::Lenient).map_err(|_| std::fmt::Error)
    }
}

/// Encode anything convertible to a value.
pub fn dumps<T: ToEdn + ?Sized>(x: &T) -> Result<String, WriteError> {
    let mut out = String::new();
    write_value(&mut out, &x.to_edn())?;
    Ok(out)
}


/// Conversion of Rust data to [Value](Value), for writing.
pub trait ToEdn {
    fn to_edn(&self) -> Cow<'_, Value>;
}

impl ToEdn for Value {
    fn to_edn(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }
}

fn owned(v: Value) -> Cow<'static, Value> {
    Cow::Owned(v)
}

macro_rules! int_to_edn {
    ($($t:ty)*) => {
        $(
            impl ToEdn for $t {
                fn to_edn(&self) -> Cow<'_, Value> {
                    owned(Value::Int(BigInt::from(*self)))
                }
            }
        )*
    }
}

int_to_edn!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl ToEdn for BigInt {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Int(self.clone()))
    }
}

impl ToEdn for f64 {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Float(*self))
    }
}

impl ToEdn for f32 {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Float(f64::from(*self)))
    }
}

impl ToEdn for bool {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Bool(*self))
    }
}

impl ToEdn for char {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Char(*self))
    }
}

impl ToEdn for str {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::string(self))
    }
}

impl ToEdn for String {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::string(self))
    }
}

impl ToEdn for KString {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Str(self.clone()))
    }
}

impl<T: ToEdn> ToEdn for Option<T> {
    fn to_edn(&self) -> Cow<'_, Value> {
        match self {
            Some(x) => x.to_edn(),
            None => owned(Value::Nil),
        }
    }
}

impl<E: Extension> ToEdn for Arc<E> {
    fn to_edn(&self) -> Cow<'_, Value> {
        let e: Arc<dyn Extension> = self.clone();
        owned(Value::Extension(e))
    }
}

fn items<'v, T: ToEdn + 'v>(xs: impl IntoIterator<Item = &'v T>) -> Vec<Value> {
    xs.into_iter().map(|x| x.to_edn().into_owned()).collect()
}

impl<T: ToEdn> ToEdn for [T] {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Vector(items(self)))
    }
}

impl<T: ToEdn, const N: usize> ToEdn for [T; N] {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Vector(items(self)))
    }
}

impl<T: ToEdn> ToEdn for Vec<T> {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Vector(items(self)))
    }
}

// Sequences other than vectors and slices are written as lists.

impl<T: ToEdn> ToEdn for VecDeque<T> {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::List(items(self)))
    }
}

impl<T: ToEdn> ToEdn for LinkedList<T> {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::List(items(self)))
    }
}

impl<T: ToEdn> ToEdn for BTreeSet<T> {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Set(items(self).into_iter().collect::<Set>()))
    }
}

/// Member order follows the hasher's iteration order.
impl<T: ToEdn, S: BuildHasher> ToEdn for HashSet<T, S> {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Set(items(self).into_iter().collect::<Set>()))
    }
}

fn entries<'v, K: ToEdn + 'v, V: ToEdn + 'v>(
    kvs: impl IntoIterator<Item = (&'v K, &'v V)>
) -> Map {
    kvs.into_iter()
        .map(|(k, v)| (k.to_edn().into_owned(), v.to_edn().into_owned()))
        .collect()
}

impl<K: ToEdn, V: ToEdn> ToEdn for BTreeMap<K, V> {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Map(entries(self)))
    }
}

/// Entry order follows the hasher's iteration order.
impl<K: ToEdn, V: ToEdn, S: BuildHasher> ToEdn for HashMap<K, V, S> {
    fn to_edn(&self) -> Cow<'_, Value> {
        owned(Value::Map(entries(self)))
    }
}
