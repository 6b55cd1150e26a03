// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Eq;

/// Both line and col are zero based; Emacs uses 1-based line
/// numbering, so line is incremented by 1 in Display. `offset` is
/// the byte offset into the source text, `col` counts characters.

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
    pub offset: usize,
}

impl Pos {
    /// The position right after `c`, if `c` is at `self`.
    pub fn after(self, c: char) -> Pos {
        if c == '\n' {
            Pos { line: self.line + 1, col: 0, offset: self.offset + 1 }
        } else {
            Pos {
                line: self.line,
                col: self.col + 1,
                offset: self.offset + c.len_utf8()
            }
        }
    }

    /// The position after all of `s`.
    pub fn after_str(self, s: &str) -> Pos {
        s.chars().fold(self, Pos::after)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        // This, when prefixed with a Debug style path string, is
        // following the Emacs convention for location information.
        f.write_fmt(format_args!("@{}.{}", self.line + 1, self.col))
    }
}
