//! Bounded generator: depth-first enumeration of all terminal strings of
//! length <= N derivable from a grammar's start symbol.

use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, Limits};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// Minimum terminal-string length derivable from each non-terminal,
/// computed by a Bellman-Ford-style fixpoint (terminals cost 1, epsilon
/// costs 0, unreachable/non-productive non-terminals are left absent).
/// This generalizes spec's "count of non-epsilon symbols in the suffix"
/// heuristic to grammars with nullable non-terminals, where a bare symbol
/// count would be an unsound lower bound.
fn compute_min_lengths(g: &Grammar) -> HashMap<String, usize> {
    let mut min_len: HashMap<String, usize> = HashMap::new();
    loop {
        let mut changed = false;
        for nt in g.sorted_nonterminals() {
            for p in g.productions_of(nt) {
                let mut total = 0usize;
                let mut known = true;
                for s in p.body() {
                    match s {
                        Symbol::Terminal(_) => total += 1,
                        Symbol::Epsilon => {}
                        Symbol::NonTerminal(name) => match min_len.get(name) {
                            Some(&l) => total += l,
                            None => {
                                known = false;
                                break;
                            }
                        },
                    }
                }
                if known {
                    let entry = min_len.entry(nt.to_string()).or_insert(usize::MAX);
                    if total < *entry {
                        *entry = total;
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
    min_len
}

/// Lower bound on the terminal length any completion of `form` can reach.
/// Returns `None` if `form` contains a non-terminal that can never derive
/// any terminal string (cleanup normally prevents this, but the generator
/// is also usable on un-cleaned, freshly-read grammars).
fn min_remaining(form: &[Symbol], min_len: &HashMap<String, usize>) -> Option<usize> {
    let mut total = 0usize;
    for s in form {
        match s {
            Symbol::Terminal(_) => total += 1,
            Symbol::Epsilon => {}
            Symbol::NonTerminal(name) => total += *min_len.get(name)?,
        }
    }
    Some(total)
}

/// Enumerates the sorted, deduplicated set of terminal strings of length
/// `<= n` derivable from `g.start`. Bounds total DFS steps via `limits` so
/// that a grammar with unbounded nullable recursion (possible for
/// un-normalized input; normalized CNF/GNF grammars always terminate) fails
/// fast with a `Resource` error instead of running forever.
pub fn generate(g: &Grammar, n: usize, limits: &Limits) -> Result<Vec<String>> {
    let min_len = compute_min_lengths(g);
    let mut results: HashSet<String> = HashSet::new();
    let mut stack: Vec<Vec<Symbol>> = vec![vec![Symbol::NonTerminal(g.start.clone())]];
    let step_limit = limits.max_total_productions.saturating_mul(64).max(1 << 16);
    let mut steps = 0usize;

    while let Some(form) = stack.pop() {
        steps += 1;
        if steps > step_limit {
            return Err(GrammarError::Resource {
                pass: "generate".to_string(),
                message: format!("exceeded {} DFS steps without terminating", step_limit),
            });
        }

        match form.iter().position(Symbol::is_nonterminal) {
            None => {
                let word: String = form
                    .iter()
                    .filter_map(|s| match s {
                        Symbol::Terminal(c) => Some(*c),
                        Symbol::Epsilon => None,
                        Symbol::NonTerminal(_) => unreachable!(),
                    })
                    .collect();
                if word.chars().count() <= n {
                    results.insert(word);
                }
            }
            Some(pos) => {
                let nt_name = form[pos].as_nonterminal_name().unwrap().to_string();
                for p in g.productions_of(&nt_name) {
                    let mut new_form = form[..pos].to_vec();
                    new_form.extend(p.body().iter().cloned());
                    new_form.extend_from_slice(&form[pos + 1..]);

                    match min_remaining(&new_form, &min_len) {
                        Some(lb) if lb <= n => stack.push(new_form),
                        _ => {}
                    }
                }
            }
        }
    }

    let mut words: Vec<String> = results.into_iter().collect();
    words.sort();
    Ok(words)
}
