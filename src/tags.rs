// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructors for tagged literals (`#tag value`), looked up by tag
//! name while reading.

//! A registry is built by the caller and handed to one read via
//! [Settings](crate::settings::Settings); there is no global
//! registry. Registries are only read during a parse, so one registry
//! can serve parses on several threads.

use crate::value::Value;
use kstring::KString;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// Builds the value for a tagged literal from its payload (the value
/// after the tag).
pub trait TagConstructor: Send + Sync {
    fn construct(&self, payload: Value) -> anyhow::Result<Value>;
}

impl<F> TagConstructor for F
    where F: Fn(Value) -> anyhow::Result<Value> + Send + Sync
{
    fn construct(&self, payload: Value) -> anyhow::Result<Value> {
        self(payload)
    }
}

#[derive(Default)]
pub struct TagRegistry {
    constructors: HashMap<KString, Box<dyn TagConstructor>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        TagRegistry { constructors: HashMap::new() }
    }

    /// Tag names are given without the `#`. Registering a tag again
    /// replaces the previous constructor.
    pub fn register<F>(&mut self, tag: &str, f: F) -> &mut Self
        where F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static
    {
        self.register_constructor(tag, f)
    }

    pub fn register_constructor(
        &mut self,
        tag: &str,
        constructor: impl TagConstructor + 'static
    ) -> &mut Self {
        self.constructors.insert(KString::from_ref(tag), Box::new(constructor));
        self
    }

    /// Builder style variant of `register`.
    pub fn with<F>(mut self, tag: &str, f: F) -> Self
        where F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static
    {
        self.register(tag, f);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&dyn TagConstructor> {
        self.constructors.get(tag).map(|c| c.as_ref())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl Debug for TagRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        let mut tags: Vec<&str> = self.constructors.keys()
            .map(|k| k.as_str()).collect();
        tags.sort_unstable();
        f.debug_struct("TagRegistry").field("tags", &tags).finish()
    }
}
