//! Command-line driver that reads a grammar file and writes its CNF and GNF
//! normal forms alongside it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cfg_normalizer::grammar::Limits;
use cfg_normalizer::{cnf, gnf, reader, writer};

/// Reads a grammar file and emits its `.chomsky` and `.greibach` forms.
#[derive(Clone, Parser)]
#[command(version, about)]
struct Args {
    /// Grammar source file, in the `LHS : ALT1 | ALT2 | ...` text format.
    input: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let text = match std::fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: could not read {:?}: {}", args.input, e);
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
    log::debug!("transformer: read grammar from {:?}", args.input);

    let limits = Limits::default();

    let chomsky = match cnf::to_cnf(&grammar, &limits) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let greibach = match gnf::to_gnf(&grammar, &limits) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let chomsky_path = args.input.with_extension("chomsky");
    let greibach_path = args.input.with_extension("greibach");

    if let Err(e) = std::fs::write(&chomsky_path, writer::write_grammar(&chomsky)) {
        eprintln!("error: could not write {:?}: {}", chomsky_path, e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = std::fs::write(&greibach_path, writer::write_grammar(&greibach)) {
        eprintln!("error: could not write {:?}: {}", greibach_path, e);
        return ExitCode::FAILURE;
    }

    log::debug!("transformer: wrote {:?} and {:?}", chomsky_path, greibach_path);
    ExitCode::SUCCESS
}
