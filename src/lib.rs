// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This is a reader and writer for EDN, the Clojure-derived
//! extensible data notation, with the following goals:
//!
//! * Offering direct access to the tokenizer, `anyedn::lex`, but also
//!   `anyedn::read` to build an in-memory tree easily.
//!
//! * Good error reporting (precise location information and
//!   messages).
//!
//! * Tagged literals (`#my.app/Point [1 2]`) are interpreted by
//!   constructors the caller registers per read; unknown tags are an
//!   error unless explicitly accepted.
//!
//! * One canonical text form per value: reading what
//!   `anyedn::write` produced gives back an equal value (lists stay
//!   lists, characters stay characters).
//!
//! Everything happens in memory: the whole text is tokenized, then
//! read into one value. There is no pretty-printing.
//!
//! ```
//! use anyedn::{loads, dumps, Value};
//!
//! let v = loads("{:foo 42}").unwrap();
//! assert_eq!(v.as_map().unwrap().get(&Value::keyword("foo")),
//!            Some(&Value::int(42)));
//! assert_eq!(dumps(&v).unwrap(), "{:foo 42}");
//! ```

pub mod coll;
pub mod context;
pub mod lex;
pub mod number;
pub mod pos;
pub mod read;
pub mod settings;
pub mod source;
pub mod tags;
pub mod value;
pub mod write;

pub use coll::{Map, Set};
pub use read::{loads, loads_with, ReadError, ReadErrorWithPos};
pub use settings::Settings;
pub use tags::{TagConstructor, TagRegistry};
pub use value::{Extension, Value};
pub use write::{dumps, ToEdn, WriteError};
