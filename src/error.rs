//! Error types for the grammar normalizer.

use thiserror::Error;

/// Errors that can occur while reading, validating, or transforming a grammar.
#[derive(Error, Debug)]
pub enum GrammarError {
    /// An unrecognized character was encountered while tokenizing a grammar
    /// file.
    #[error("lexical error at line {line}: unexpected character {character:?}")]
    Lexical { line: usize, character: char },

    /// A rule line did not have the shape `LHS : RHS1 | RHS2 | ...`.
    #[error("structural error at line {line}: {message}")]
    Structural { line: usize, message: String },

    /// A non-terminal appears on some right-hand side but is never defined
    /// on a left-hand side anywhere in the file.
    #[error("reference error: non-terminal {0:?} is used but never defined")]
    Reference(String),

    /// An internal consistency check failed; this indicates a bug in a
    /// transformation pass rather than a problem with the input grammar.
    #[error("internal invariant violated in {pass}: {message}")]
    Invariant { pass: String, message: String },

    /// The grammar grew past a configured [`crate::Limits`] guard during a
    /// transformation pass.
    #[error("grammar exceeded size limits during {pass}: {message}")]
    Resource { pass: String, message: String },

    /// Reading or writing a grammar file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for `Result`s produced by this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;
