// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversions between number token text and number values.

use num::BigInt;
use std::fmt::Write;

pub const INF: &str = "##Inf";
pub const NEG_INF: &str = "##-Inf";
pub const NAN: &str = "##NaN";

/// Parse the text of a number token: optional sign, then decimal
/// digits only. Returns None for anything else.
pub fn read_integer(s: &str) -> Option<BigInt> {
    let (is_neg, digits) = split_sign(s);
    if digits.is_empty() {
        return None
    }
    let mut n: BigInt = 0.into();
    for c in digits.chars() {
        n = n * 10 + c.to_digit(10)?;
    }
    Some(if is_neg { -n } else { n })
}

/// Parse the text of a float token (`1.5`, `-0.25`, or one of the
/// `##` literals).
pub fn read_float(s: &str) -> Option<f64> {
    match s {
        INF => Some(f64::INFINITY),
        NEG_INF => Some(f64::NEG_INFINITY),
        NAN => Some(f64::NAN),
        _ => {
            let (_, digits) = split_sign(s);
            let (int, frac) = digits.split_once('.')?;
            if int.is_empty() || frac.is_empty()
                || ! int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit())
            {
                return None
            }
            s.parse().ok()
        }
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

/// Write a float so that it reads back as a float: Rust's shortest
/// round-trip form never uses exponent notation, but it drops the
/// fraction of integral values, so `.0` is added back.
pub fn write_float(out: &mut impl Write, x: f64) -> std::fmt::Result {
    if x.is_nan() {
        out.write_str(NAN)
    } else if x.is_infinite() {
        out.write_str(if x > 0. { INF } else { NEG_INF })
    } else {
        let s = x.to_string();
        out.write_str(&s)?;
        if ! s.contains('.') {
            out.write_str(".0")?;
        }
        Ok(())
    }
}
