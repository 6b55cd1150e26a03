// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for reading (parsing) data, created per read call.

use crate::tags::TagRegistry;

/// The limit with default settings on Linux is around 1200.
pub const DEFAULT_MAX_DEPTH: u32 = 500;

static EMPTY_REGISTRY: std::sync::OnceLock<TagRegistry> = std::sync::OnceLock::new();

#[derive(Debug, Clone, Copy)]
pub struct Settings<'t> {
    pub tags: &'t TagRegistry,
    /// If true, tags without a constructor produce `Value::Tagged`;
    /// otherwise they are an error.
    pub accept_unknown_tags: bool,
    /// Maximum nesting of collections and tagged literals.
    pub max_depth: u32,
}

impl<'t> Settings<'t> {
    pub fn new(tags: &'t TagRegistry) -> Self {
        Settings {
            tags,
            accept_unknown_tags: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn accept_unknown_tags(self, accept: bool) -> Self {
        Settings { accept_unknown_tags: accept, ..self }
    }

    pub fn max_depth(self, max_depth: u32) -> Self {
        Settings { max_depth, ..self }
    }
}

impl Default for Settings<'static> {
    /// No tag constructors, unknown tags rejected.
    fn default() -> Self {
        Settings::new(EMPTY_REGISTRY.get_or_init(TagRegistry::new))
    }
}
