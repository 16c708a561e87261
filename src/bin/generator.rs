//! Command-line driver that enumerates the bounded-length terminal strings a
//! grammar derives, printing one word per line in sorted order.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cfg_normalizer::grammar::Limits;
use cfg_normalizer::{generator, reader};

/// Enumerates all words of length at most `n` derivable from a grammar file.
#[derive(Clone, Parser)]
#[command(version, about)]
struct Args {
    /// Maximum word length.
    n: usize,
    /// Grammar source file, in the `LHS : ALT1 | ALT2 | ...` text format.
    file: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let text = match std::fs::read_to_string(&args.file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: could not read {:?}: {}", args.file, e);
            return ExitCode::FAILURE;
        }
    };

    let grammar = match reader::read_grammar(&text) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let limits = Limits::default();
    let words = match generator::generate(&grammar, args.n, &limits) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if words.is_empty() {
        println!("(no words of length <= {} are derivable)", args.n);
    } else {
        for word in &words {
            println!("{}", word);
        }
    }

    ExitCode::SUCCESS
}
