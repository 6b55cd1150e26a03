// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Get the whole text from anything implementing `Read`, decoding
//! UTF-8 strictly and reporting where decoding failed.

use crate::pos::Pos;
use std::io::{self, Read};
use thiserror::Error;
use utf8::{BufReadDecoder, BufReadDecoderError};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error ({0}) after")]
    IO(io::Error),
    #[error("invalid UTF-8 byte sequence {0:?}")]
    InvalidUtf8(Vec<u8>),
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct SourceErrorWithPos {
    pub err: SourceError,
    pub pos: Pos
}

impl SourceError {
    fn at(self, p: Pos) -> SourceErrorWithPos {
        SourceErrorWithPos {
            err: self,
            pos: p
        }
    }
}

pub fn read_text(fh: impl Read) -> Result<String, SourceErrorWithPos> {
    let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
    let mut out = String::new();
    let mut pos = Pos::default();
    while let Some(r) = inp.next_strict() {
        match r {
            Ok(s) => {
                pos = pos.after_str(s);
                out.push_str(s);
            }
            Err(BufReadDecoderError::InvalidByteSequence(bytes)) => {
                return Err(SourceError::InvalidUtf8(bytes.to_vec()).at(pos))
            }
            Err(BufReadDecoderError::Io(e)) => {
                return Err(SourceError::IO(e).at(pos))
            }
        }
    }
    Ok(out)
}
