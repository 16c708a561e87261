//! Chomsky Normal Form pipeline: `START -> TERM -> BIN -> DEL -> UNIT ->
//! cleanup`, producing productions of shape `A -> BC`, `A -> a`, or
//! `start -> E`.

use crate::cleanup;
use crate::error::{GrammarError, Result};
use crate::grammar::{dedup_preserve_order, Grammar, Limits, Production};
use crate::normalize;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// For every production of length >= 2 containing a terminal, introduces
/// (once per distinct terminal) a dedicated non-terminal `T_a -> a` and
/// replaces every such in-body occurrence of `a` with it. Terminals already
/// alone on a length-1 production are left untouched.
fn lift_terminals(g: &mut Grammar, limits: &Limits) -> Result<()> {
    let mut terminals_needing_lift: HashSet<char> = HashSet::new();
    for nt in g.sorted_nonterminals() {
        for p in g.productions_of(nt) {
            if p.len() >= 2 {
                for s in p.body() {
                    if let Symbol::Terminal(c) = s {
                        terminals_needing_lift.insert(*c);
                    }
                }
            }
        }
    }

    let mut ordered: Vec<char> = terminals_needing_lift.into_iter().collect();
    ordered.sort_unstable();

    let mut terminal_nt: HashMap<char, String> = HashMap::new();
    for c in ordered {
        let name = g.fresh_name();
        g.add_production(name.clone(), Production::new(vec![Symbol::Terminal(c)]));
        terminal_nt.insert(c, name);
    }

    for nt in g.sorted_nonterminals().into_iter().map(String::from).collect::<Vec<_>>() {
        let prods = g.productions_of(&nt).to_vec();
        let mut new_prods = Vec::with_capacity(prods.len());
        for p in prods {
            if p.len() >= 2 {
                let body: Vec<Symbol> = p
                    .0
                    .into_iter()
                    .map(|s| match s {
                        Symbol::Terminal(c) => Symbol::NonTerminal(terminal_nt[&c].clone()),
                        other => other,
                    })
                    .collect();
                new_prods.push(Production::new(body));
            } else {
                new_prods.push(p);
            }
        }
        g.set_productions(nt, dedup_preserve_order(new_prods));
    }

    g.check_limits(limits, "TERM")
}

/// Builds (and caches, by right-tail) the chain of fresh non-terminals
/// realizing `symbols[0] symbols[1] ... symbols[n-1]` as a right-branching
/// binary chain, returning the name of the non-terminal standing for the
/// whole sequence.
fn binarize_tail(g: &mut Grammar, symbols: &[Symbol], cache: &mut HashMap<Vec<Symbol>, String>) -> String {
    if let Some(name) = cache.get(symbols) {
        return name.clone();
    }
    let name = g.fresh_name();
    if symbols.len() == 2 {
        g.add_production(name.clone(), Production::new(symbols.to_vec()));
    } else {
        let rest_name = binarize_tail(g, &symbols[1..], cache);
        g.add_production(
            name.clone(),
            Production::new(vec![symbols[0].clone(), Symbol::NonTerminal(rest_name)]),
        );
    }
    cache.insert(symbols.to_vec(), name.clone());
    name
}

/// Rewrites every production of length >= 3, `A -> X1 X2 ... Xk`, as
/// `A -> X1 Y1`, `Y1 -> X2 Y2`, ..., with fresh `Yi` shared across
/// productions that share a right tail.
fn binarize(g: &mut Grammar, limits: &Limits) -> Result<()> {
    let mut cache: HashMap<Vec<Symbol>, String> = HashMap::new();
    for nt in g.sorted_nonterminals().into_iter().map(String::from).collect::<Vec<_>>() {
        let prods = g.productions_of(&nt).to_vec();
        let mut new_prods = Vec::with_capacity(prods.len());
        for p in prods {
            if p.len() >= 3 {
                let rest = &p.0[1..];
                let tail_name = binarize_tail(g, rest, &mut cache);
                new_prods.push(Production::new(vec![p.0[0].clone(), Symbol::NonTerminal(tail_name)]));
            } else {
                new_prods.push(p);
            }
        }
        g.set_productions(nt, dedup_preserve_order(new_prods));
    }
    g.check_limits(limits, "BIN")
}

fn validate_cnf(g: &Grammar) -> Result<()> {
    for nt in g.sorted_nonterminals() {
        for p in g.productions_of(nt) {
            let ok = match p.body() {
                [Symbol::Terminal(_)] => true,
                [Symbol::NonTerminal(_), Symbol::NonTerminal(_)] => true,
                [Symbol::Epsilon] if nt == g.start => true,
                _ => false,
            };
            if !ok {
                return Err(GrammarError::Invariant {
                    pass: "CNF".to_string(),
                    message: format!("production {} -> {} violates the CNF shape", nt, p),
                });
            }
        }
    }
    Ok(())
}

/// Transforms `grammar` into Chomsky Normal Form, leaving `grammar` itself
/// untouched.
pub fn to_cnf(grammar: &Grammar, limits: &Limits) -> Result<Grammar> {
    let mut g = grammar.clone();
    log::debug!("CNF: starting from {} production(s)", g.total_productions());
    normalize::introduce_fresh_start(&mut g);
    lift_terminals(&mut g, limits)?;
    binarize(&mut g, limits)?;
    normalize::eliminate_epsilon(&mut g, limits)?;
    normalize::eliminate_unit(&mut g, limits)?;
    cleanup::cleanup(&mut g);
    validate_cnf(&g)?;
    log::debug!("CNF: finished with {} production(s)", g.total_productions());
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binarizes_long_productions() {
        let mut g = Grammar::new("S0");
        g.add_production(
            "S0",
            Production::new(vec![
                Symbol::Terminal('a'),
                Symbol::Terminal('b'),
                Symbol::Terminal('c'),
            ]),
        );
        let limits = Limits::default();
        let cnf = to_cnf(&g, &limits).unwrap();
        assert!(validate_cnf(&cnf).is_ok());
    }

    #[test]
    fn acnbn_round_trip_shape() {
        let mut g = Grammar::new("S0");
        g.add_production(
            "S0",
            Production::new(vec![
                Symbol::NonTerminal("A1".to_string()),
                Symbol::NonTerminal("S0".to_string()),
                Symbol::NonTerminal("B1".to_string()),
            ]),
        );
        g.add_production(
            "S0",
            Production::new(vec![Symbol::NonTerminal("C1".to_string())]),
        );
        g.add_production("A1", Production::new(vec![Symbol::Terminal('a')]));
        g.add_production("B1", Production::new(vec![Symbol::Terminal('b')]));
        g.add_production("C1", Production::new(vec![Symbol::Terminal('c')]));
        g.add_production("C1", Production::new(vec![Symbol::Epsilon]));

        let limits = Limits::default();
        let cnf = to_cnf(&g, &limits).unwrap();
        validate_cnf(&cnf).unwrap();
    }
}
