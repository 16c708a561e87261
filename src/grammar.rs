//! Grammar module for context-free grammars.
//!
//! This module provides the core data model shared by every transformation
//! pass: [`Production`], [`Grammar`], the fresh-name generator, and the
//! [`Limits`] resource guard.

use crate::error::{GrammarError, Result};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An ordered, possibly empty sequence of symbols forming one alternative of
/// a non-terminal's rule.
///
/// A production consisting solely of an `Epsilon` symbol denotes the empty
/// derivation. No production ever mixes `Epsilon` with other symbols;
/// `Epsilon` appears only as the sole element of a length-1 production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production(pub Vec<Symbol>);

impl Production {
    /// Creates a production from a symbol sequence.
    pub fn new(body: Vec<Symbol>) -> Self {
        Self(body)
    }

    /// The production body.
    pub fn body(&self) -> &[Symbol] {
        &self.0
    }

    /// True for the single-symbol epsilon production.
    pub fn is_epsilon(&self) -> bool {
        matches!(self.0.as_slice(), [Symbol::Epsilon])
    }

    /// Number of symbols in the body (epsilon counts as one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the body has no symbols (not a valid production on its own,
    /// but useful as an intermediate value while deriving new productions).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// A resource guard bounding how large a grammar may grow during
/// transformation, so that pathological inputs fail fast instead of
/// exhausting memory.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Maximum number of productions any single non-terminal may accumulate.
    pub max_productions_per_nonterminal: usize,
    /// Maximum number of productions across the whole grammar.
    pub max_total_productions: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_productions_per_nonterminal: 10_000,
            max_total_productions: 200_000,
        }
    }
}

/// A context-free grammar: a start symbol, the set of non-terminals in use,
/// and a mapping from each non-terminal to its list of productions.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// The non-terminal designated as the axiom.
    pub start: String,
    nonterminals: HashSet<String>,
    rules: HashMap<String, Vec<Production>>,
    /// Counter feeding the fresh-name generator's numeric suffix.
    next_suffix: u32,
}

/// Letters usable as a fresh-name prefix; `E` is reserved for epsilon in the
/// text format.
const FRESH_NAME_LETTERS: &[u8] = b"ABCDFGHIJKLMNOPQRSTUVWXYZ";

impl Grammar {
    /// Creates an empty grammar with the given start non-terminal.
    pub fn new(start: impl Into<String>) -> Self {
        let start = start.into();
        let mut nonterminals = HashSet::new();
        nonterminals.insert(start.clone());
        let mut rules = HashMap::new();
        rules.insert(start.clone(), Vec::new());
        Self {
            start,
            nonterminals,
            rules,
            next_suffix: 0,
        }
    }

    /// Returns the productions of `nt`, or an empty slice if `nt` is unknown.
    pub fn productions_of(&self, nt: &str) -> &[Production] {
        self.rules.get(nt).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Returns the set of all non-terminal names.
    pub fn nonterminals(&self) -> &HashSet<String> {
        &self.nonterminals
    }

    /// Returns the non-terminal names in deterministic (sorted) order.
    pub fn sorted_nonterminals(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nonterminals.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registers `name` as a non-terminal with an empty rule list, if it is
    /// not already known. Idempotent.
    pub fn declare_nonterminal(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.rules.entry(name.clone()).or_default();
        self.nonterminals.insert(name);
    }

    /// Adds `production` to `nt`'s rule list unless it is already present.
    /// Declares `nt` as a non-terminal first if necessary.
    pub fn add_production(&mut self, nt: impl Into<String>, production: Production) {
        let nt = nt.into();
        self.declare_nonterminal(nt.clone());
        let list = self.rules.entry(nt).or_default();
        if !list.contains(&production) {
            list.push(production);
        }
    }

    /// Replaces `nt`'s entire rule list.
    pub fn set_productions(&mut self, nt: impl Into<String>, productions: Vec<Production>) {
        let nt = nt.into();
        self.declare_nonterminal(nt.clone());
        self.rules.insert(nt, productions);
    }

    /// Removes a non-terminal and its rule list entirely.
    pub fn remove_nonterminal(&mut self, nt: &str) {
        self.nonterminals.remove(nt);
        self.rules.remove(nt);
    }

    /// Returns `true` if `nt` is a known non-terminal.
    pub fn has_nonterminal(&self, nt: &str) -> bool {
        self.nonterminals.contains(nt)
    }

    /// Total number of productions across all non-terminals.
    pub fn total_productions(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Generates a fresh non-terminal name not currently in use, of the form
    /// `A0`, `B0`, ..., `Z0`, `A1`, ... (skipping the `E` prefix reserved for
    /// epsilon), and registers it as a non-terminal with an empty rule list
    /// so the next call never collides with it.
    pub fn fresh_name(&mut self) -> String {
        loop {
            for &letter in FRESH_NAME_LETTERS {
                let name = format!("{}{}", letter as char, self.next_suffix);
                if !self.nonterminals.contains(&name) {
                    self.declare_nonterminal(name.clone());
                    return name;
                }
            }
            self.next_suffix += 1;
        }
    }

    /// Validates the resource guard, naming `pass` in the error if exceeded.
    pub fn check_limits(&self, limits: &Limits, pass: &str) -> Result<()> {
        if self.total_productions() > limits.max_total_productions {
            return Err(GrammarError::Resource {
                pass: pass.to_string(),
                message: format!(
                    "total productions {} exceed limit {}",
                    self.total_productions(),
                    limits.max_total_productions
                ),
            });
        }
        for (nt, prods) in &self.rules {
            if prods.len() > limits.max_productions_per_nonterminal {
                return Err(GrammarError::Resource {
                    pass: pass.to_string(),
                    message: format!(
                        "non-terminal {:?} has {} productions, exceeding limit {}",
                        nt,
                        prods.len(),
                        limits.max_productions_per_nonterminal
                    ),
                });
            }
        }
        Ok(())
    }

    /// Validates that every non-terminal referenced in a production body is
    /// declared. Returns the first undefined reference found.
    pub fn check_references(&self) -> Result<()> {
        for prods in self.rules.values() {
            for production in prods {
                for symbol in production.body() {
                    if let Symbol::NonTerminal(name) = symbol {
                        if !self.nonterminals.contains(name) {
                            return Err(GrammarError::Reference(name.clone()));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Removes duplicate productions from `productions`, keeping first-seen
/// order. Used by every pass that rewrites a rule list.
pub(crate) fn dedup_preserve_order(productions: Vec<Production>) -> Vec<Production> {
    let mut seen: HashSet<Production> = HashSet::new();
    let mut out = Vec::with_capacity(productions.len());
    for p in productions {
        if seen.insert(p.clone()) {
            out.push(p);
        }
    }
    out
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::writer::write_grammar(self))
    }
}
