// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyedn::lex::{tokenize, TokenKind};
use anyedn::read::{read_file, read_stdin};
use anyedn::source::read_text;
use anyedn::{dumps, Settings, TagRegistry};
use clap::Parser as ClapParser;
use std::path::PathBuf;
use anyhow::{Result, bail};


fn indentstr(i: usize) -> Option<&'static str> {
    "                                                                  ".get(0..i)
}

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Stream the tokens (default: read a value and print it in
    /// canonical form)
    #[clap(short, long, value_parser)]
    tokens: bool,
    /// Show the token position (only with --tokens)
    #[clap(long, value_parser)]
    pos: bool,
    /// Keep tagged literals without a constructor as tagged values
    #[clap(short, long, value_parser)]
    accept_unknown_tags: bool,
    /// Path to the input file, `-` for stdin
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let from_stdin = args.input_path.as_os_str() == "-";

    if args.tokens {

        // Go through the token stream, printing each token indented
        // by the nesting depth.

        let text = if from_stdin {
            read_text(std::io::stdin().lock())?
        } else {
            read_text(std::fs::File::open(&args.input_path)?)?
        };
        let mut depth: usize = 0;
        let mut count = 0;
        for t in tokenize(&text) {
            let t = t?;
            count += 1;
            let indentlevel;
            match t.kind {
                TokenKind::OpenList | TokenKind::OpenVector
                    | TokenKind::OpenMap | TokenKind::OpenSet =>
                {
                    indentlevel = depth;
                    depth += 1;
                }
                TokenKind::CloseList | TokenKind::CloseVector
                    | TokenKind::CloseMap =>
                {
                    if depth == 0 {
                        bail!("unexpected {} at {:?}{}",
                              t.kind, args.input_path, t.pos)
                    }
                    depth -= 1;
                    indentlevel = depth;
                }
                _ => {
                    indentlevel = depth;
                }
            }
            if let Some(indent) = indentstr(indentlevel) {
                if args.pos {
                    println!("{indent}{} {} {}", t.pos, t.kind, t);
                } else {
                    println!("{indent}{} {}", t.kind, t);
                }
            } else {
                bail!("nested too deeply at {:?}{}", args.input_path, t.pos)
            }
        }
        println!(";; count_tokens = {count}");

    } else {

        let registry = TagRegistry::new();
        let settings = Settings::new(&registry)
            .accept_unknown_tags(args.accept_unknown_tags);
        let v = if from_stdin {
            read_stdin(&settings)?
        } else {
            read_file(&args.input_path, &settings)?
        };
        println!("{}", dumps(&v)?);

    }
    Ok(())
}
