//! Symbol types for context-free grammars.
//!
//! This module defines the core [`Symbol`] type used throughout the
//! normalization pipeline: every production body is a sequence of `Symbol`s,
//! and every non-terminal is named by the string carried inside a
//! `Symbol::NonTerminal`.

use std::fmt;

/// A single element of a production body.
///
/// # Grammar conventions
/// - Non-terminals: a single uppercase letter other than `E`, followed by one
///   decimal digit (`S0`, `A1`, ...). `E` is reserved for epsilon.
/// - Terminals: a single lowercase letter.
/// - Epsilon: the empty string, written `E` in the text format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A non-terminal, named by its short identifier (e.g. `"S0"`).
    NonTerminal(String),
    /// A terminal character (typically one lowercase letter).
    Terminal(char),
    /// The empty string.
    Epsilon,
}

impl Symbol {
    /// Checks if this symbol is a non-terminal.
    #[inline]
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    /// Checks if this symbol is a terminal.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Checks if this symbol is epsilon.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Returns the non-terminal name, if this is a non-terminal.
    pub fn as_nonterminal_name(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::NonTerminal(name) => write!(f, "{}", name),
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::Epsilon => write!(f, "E"),
        }
    }
}
