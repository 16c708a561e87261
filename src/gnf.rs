//! Greibach Normal Form pipeline: `START -> DEL -> UNIT -> left-recursion
//! elimination -> head-unfold -> mid-terminal lift -> cleanup`, producing
//! productions of shape `A -> a X1 ... Xk` (k >= 0), or `start -> E`.

use crate::cleanup;
use crate::error::{GrammarError, Result};
use crate::grammar::{dedup_preserve_order, Grammar, Limits, Production};
use crate::normalize;
use crate::symbol::Symbol;
use std::collections::HashMap;

/// Orders the non-terminals `A1, ..., An` (sorted by name — any total order
/// works, this one is simply deterministic) and, for `i = 1..n`, substitutes
/// away references to earlier `Aj` and then removes direct left recursion on
/// `Ai` by splitting it into `Ai` / a fresh `Ai'`.
fn eliminate_left_recursion(g: &mut Grammar, limits: &Limits) -> Result<()> {
    let order: Vec<String> = g.sorted_nonterminals().into_iter().map(String::from).collect();

    for i in 0..order.len() {
        let ai = &order[i];

        for aj in order.iter().take(i) {
            let current = g.productions_of(ai).to_vec();
            let mut rewritten = Vec::with_capacity(current.len());
            for p in current {
                if let Some(Symbol::NonTerminal(head)) = p.body().first() {
                    if head == aj {
                        let gamma = &p.body()[1..];
                        for delta in g.productions_of(aj).to_vec() {
                            let mut new_body = delta.body().to_vec();
                            new_body.extend_from_slice(gamma);
                            rewritten.push(Production::new(new_body));
                        }
                        continue;
                    }
                }
                rewritten.push(p);
            }
            g.set_productions(ai.clone(), dedup_preserve_order(rewritten));
        }

        let prods = g.productions_of(ai).to_vec();
        let (recursive, nonrecursive): (Vec<Production>, Vec<Production>) =
            prods.into_iter().partition(|p| {
                matches!(p.body().first(), Some(Symbol::NonTerminal(h)) if h == ai)
            });

        if !recursive.is_empty() {
            if nonrecursive.is_empty() {
                log::debug!("GNF: {} only has left-recursive productions, dropping", ai);
                g.set_productions(ai.clone(), Vec::new());
                continue;
            }

            let ai_prime = g.fresh_name();
            let mut ai_new = Vec::with_capacity(nonrecursive.len() * 2);
            for beta in &nonrecursive {
                let mut with_tail = beta.body().to_vec();
                with_tail.push(Symbol::NonTerminal(ai_prime.clone()));
                ai_new.push(Production::new(with_tail));
                ai_new.push(beta.clone());
            }

            let mut prime_prods = Vec::with_capacity(recursive.len() * 2);
            for alpha in &recursive {
                let tail = &alpha.body()[1..];
                let mut with_tail = tail.to_vec();
                with_tail.push(Symbol::NonTerminal(ai_prime.clone()));
                prime_prods.push(Production::new(with_tail));
                prime_prods.push(Production::new(tail.to_vec()));
            }

            g.set_productions(ai.clone(), dedup_preserve_order(ai_new));
            g.set_productions(ai_prime, dedup_preserve_order(prime_prods));
        }

        g.check_limits(limits, "left-recursion elimination")?;
    }

    Ok(())
}

/// Repeats, to a fixpoint, replacing every production `A -> B gamma` whose
/// head `B` is a non-terminal with `A -> delta gamma` for each of `B`'s
/// productions. Left-recursion elimination is supposed to preclude cycles
/// here; a round bound guards against indirect cycles surviving through
/// nullable intermediates and surfaces them as an invariant violation
/// instead of looping forever.
fn unfold_heads(g: &mut Grammar, limits: &Limits) -> Result<()> {
    const MAX_ROUNDS: usize = 10_000;

    for round in 0..MAX_ROUNDS {
        let mut changed = false;
        for nt in g.sorted_nonterminals().into_iter().map(String::from).collect::<Vec<_>>() {
            let prods = g.productions_of(&nt).to_vec();
            let mut new_prods = Vec::with_capacity(prods.len());
            for p in prods {
                match p.body().first() {
                    Some(Symbol::NonTerminal(head)) => {
                        let head = head.clone();
                        let gamma = p.body()[1..].to_vec();
                        let head_prods = g.productions_of(&head).to_vec();
                        for delta in head_prods {
                            let mut body = delta.body().to_vec();
                            if body == [Symbol::Epsilon] {
                                body.clear();
                            }
                            body.extend_from_slice(&gamma);
                            if body.is_empty() {
                                body.push(Symbol::Epsilon);
                            }
                            new_prods.push(Production::new(body));
                        }
                        changed = true;
                    }
                    _ => new_prods.push(p),
                }
            }
            g.set_productions(nt, dedup_preserve_order(new_prods));
        }
        g.check_limits(limits, "head-unfold")?;
        if !changed {
            return Ok(());
        }
        if round == MAX_ROUNDS - 1 {
            return Err(GrammarError::Invariant {
                pass: "head-unfold".to_string(),
                message: "did not converge within the round bound".to_string(),
            });
        }
    }
    Ok(())
}

/// For each terminal appearing anywhere but the head of a production,
/// introduces (once per distinct terminal) a fresh `T_a -> a` and replaces
/// every such non-head occurrence.
fn lift_mid_terminals(g: &mut Grammar, limits: &Limits) -> Result<()> {
    let mut needed: Vec<char> = Vec::new();
    for nt in g.sorted_nonterminals() {
        for p in g.productions_of(nt) {
            for (i, s) in p.body().iter().enumerate() {
                if i == 0 {
                    continue;
                }
                if let Symbol::Terminal(c) = s {
                    if !needed.contains(c) {
                        needed.push(*c);
                    }
                }
            }
        }
    }
    needed.sort_unstable();

    let mut terminal_nt: HashMap<char, String> = HashMap::new();
    for c in needed {
        let name = g.fresh_name();
        g.add_production(name.clone(), Production::new(vec![Symbol::Terminal(c)]));
        terminal_nt.insert(c, name);
    }

    for nt in g.sorted_nonterminals().into_iter().map(String::from).collect::<Vec<_>>() {
        let prods = g.productions_of(&nt).to_vec();
        let mut new_prods = Vec::with_capacity(prods.len());
        for p in prods {
            let mut body = p.0;
            for (i, s) in body.iter_mut().enumerate() {
                if i == 0 {
                    continue;
                }
                if let Symbol::Terminal(c) = s {
                    *s = Symbol::NonTerminal(terminal_nt[c].clone());
                }
            }
            new_prods.push(Production::new(body));
        }
        g.set_productions(nt, dedup_preserve_order(new_prods));
    }

    g.check_limits(limits, "mid-terminal lift")
}

fn validate_gnf(g: &Grammar) -> Result<()> {
    for nt in g.sorted_nonterminals() {
        for p in g.productions_of(nt) {
            let ok = match p.body() {
                [Symbol::Epsilon] if nt == g.start => true,
                [Symbol::Terminal(_), rest @ ..] => rest.iter().all(Symbol::is_nonterminal),
                _ => false,
            };
            if !ok {
                return Err(GrammarError::Invariant {
                    pass: "GNF".to_string(),
                    message: format!("production {} -> {} violates the GNF shape", nt, p),
                });
            }
        }
    }
    Ok(())
}

/// Transforms `grammar` into Greibach Normal Form, leaving `grammar` itself
/// untouched.
pub fn to_gnf(grammar: &Grammar, limits: &Limits) -> Result<Grammar> {
    let mut g = grammar.clone();
    log::debug!("GNF: starting from {} production(s)", g.total_productions());
    normalize::introduce_fresh_start(&mut g);
    normalize::eliminate_epsilon(&mut g, limits)?;
    normalize::eliminate_unit(&mut g, limits)?;
    eliminate_left_recursion(&mut g, limits)?;
    unfold_heads(&mut g, limits)?;
    lift_mid_terminals(&mut g, limits)?;
    cleanup::cleanup(&mut g);
    validate_gnf(&g)?;
    log::debug!("GNF: finished with {} production(s)", g.total_productions());
    Ok(g)
}
