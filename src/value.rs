// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runtime data types representing an EDN value.

//! [Value](Value) is a closed set of variants; the only open end is
//! [Extension](Extension), for application types built by tag
//! constructors (see [tags](../tags/index.html)).

use crate::coll::{Map, Set};
use kstring::KString;
use num::BigInt;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// The four characters with a symbolic literal form.
pub fn char2name(c: char) -> Option<&'static str> {
    match c {
        '\n' => Some("newline"),
        '\t' => Some("tab"),
        '\r' => Some("return"),
        ' ' => Some("space"),
        _ => None
    }
}
pub fn name2char(s: &str) -> Option<char> {
    match s {
        "newline" => Some('\n'),
        "tab" => Some('\t'),
        "return" => Some('\r'),
        "space" => Some(' '),
        _ => None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parenkind {
    Round,
    Square,
    Curly,
    /// `#{`, closed by `}`
    HashCurly,
}

impl Parenkind {
    pub fn opening(self) -> &'static str {
        match self {
            Parenkind::Round => "(",
            Parenkind::Square => "[",
            Parenkind::Curly => "{",
            Parenkind::HashCurly => "#{",
        }
    }
    pub fn closing(self) -> char {
        match self {
            Parenkind::Round => ')',
            Parenkind::Square => ']',
            Parenkind::Curly | Parenkind::HashCurly => '}',
        }
    }
}

/// An application-defined value stored in a [Value](Value) tree,
/// typically the result of a tag constructor.
pub trait Extension: Debug + Send + Sync + 'static {
    /// The value the writer emits in place of this one; `None` if it
    /// has no EDN representation.
    fn to_edn(&self) -> Option<Value>;

    fn as_any(&self) -> &dyn Any;
}

/// `Display` prints the canonical EDN text, but an extension without an
/// EDN form shows as a `#<unsupported ...>` placeholder there; use
/// [dumps](crate::write::dumps) to get an error instead.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    Str(KString),
    Char(char),
    /// Including the namespace prefix, if any: `ns/name`
    Symbol(KString),
    /// Without the colon
    Keyword(KString),
    List(Vec<Value>),
    Vector(Vec<Value>),
    Set(Set),
    Map(Map),
    /// Tag name without the `#`
    Tagged(KString, Box<Value>),
    Extension(Arc<dyn Extension>),
}

// Maps and sets compare regardless of member order. Extensions are
// equal if they are the same object or convert to equal values.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Tagged(t1, v1), Value::Tagged(t2, v2)) => t1 == t2 && v1 == v2,
            (Value::Extension(a), Value::Extension(b)) => {
                Arc::ptr_eq(a, b) || match (a.to_edn(), b.to_edn()) {
                    (Some(x), Some(y)) => x == y,
                    _ => false
                }
            }
            _ => false
        }
    }
}

impl Value {
    pub fn string(s: &str) -> Value {
        Value::Str(KString::from_ref(s))
    }

    pub fn symbol(s: &str) -> Value {
        Value::Symbol(KString::from_ref(s))
    }

    pub fn keyword(s: &str) -> Value {
        Value::Keyword(KString::from_ref(s))
    }

    pub fn int(n: impl Into<BigInt>) -> Value {
        Value::Int(n.into())
    }

    pub fn tagged(tag: &str, payload: Value) -> Value {
        Value::Tagged(KString::from_ref(tag), Box::new(payload))
    }

    pub fn extension(e: impl Extension) -> Value {
        Value::Extension(Arc::new(e))
    }

    /// A list from any sequence; the fallback representation for
    /// sequence types without a closer match.
    pub fn list_from_iter(items: impl IntoIterator<Item = Value>) -> Value {
        Value::List(items.into_iter().collect())
    }

    /// Name of the variant, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Char(_) => "character",
            Value::Symbol(_) => "symbol",
            Value::Keyword(_) => "keyword",
            Value::List(_) => "list",
            Value::Vector(_) => "vector",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Tagged(_, _) => "tagged value",
            Value::Extension(_) => "extension",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(b) = self { Some(*b) } else { None }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        if let Value::Int(n) = self { Some(n) } else { None }
    }

    pub fn as_float(&self) -> Option<f64> {
        if let Value::Float(x) = self { Some(*x) } else { None }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::Str(s) = self { Some(s.as_str()) } else { None }
    }

    pub fn as_char(&self) -> Option<char> {
        if let Value::Char(c) = self { Some(*c) } else { None }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        if let Value::Symbol(s) = self { Some(s.as_str()) } else { None }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        if let Value::Keyword(s) = self { Some(s.as_str()) } else { None }
    }

    /// The items of a list or vector.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) | Value::Vector(v) => Some(v.as_slice()),
            _ => None
        }
    }

    pub fn as_set(&self) -> Option<&Set> {
        if let Value::Set(s) = self { Some(s) } else { None }
    }

    pub fn as_map(&self) -> Option<&Map> {
        if let Value::Map(m) = self { Some(m) } else { None }
    }

    pub fn as_tagged(&self) -> Option<(&str, &Value)> {
        if let Value::Tagged(t, v) = self { Some((t.as_str(), &**v)) } else { None }
    }

    /// Downcast an extension value to the application type `T`.
    pub fn downcast_ref<T: Extension>(&self) -> Option<&T> {
        if let Value::Extension(e) = self {
            e.as_any().downcast_ref::<T>()
        } else {
            None
        }
    }
}
