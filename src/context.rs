// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Where text came from (other than position), for error messages.

use crate::pos::Pos;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(PathBuf),
    Stdin,
}

impl Origin {
    /// Location to be put *after* the error reason and a space,
    /// including "in" or "from".
    pub fn with_pos(&self, pos: Pos) -> OriginWithPos<'_> {
        OriginWithPos(self, pos)
    }
}

/// Location to be put *before* a colon and the error reason.
impl Display for Origin {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Origin::File(path) => f.write_fmt(format_args!("{:?}", path)),
            Origin::Stdin => f.write_str("(stdin)"),
        }
    }
}

pub struct OriginWithPos<'t>(&'t Origin, Pos);

impl<'t> Display for OriginWithPos<'t> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        // Emacs convention: path directly followed by @line.col
        match self.0 {
            Origin::File(_) => f.write_fmt(format_args!("in {}{}", self.0, self.1)),
            Origin::Stdin => f.write_fmt(format_args!("from {}{}", self.0, self.1)),
        }
    }
}
