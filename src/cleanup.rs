//! Cleanup passes: remove non-terminals that are empty, non-productive, or
//! unreachable. Invoked together as [`cleanup`], idempotent, and run after
//! reading a grammar and at the end of every normalization pipeline.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::HashSet;

/// Drops every non-terminal whose rule list is empty, along with any
/// production elsewhere that references it, iterating to a fixpoint.
fn remove_empty(g: &mut Grammar) {
    loop {
        let empty: HashSet<String> = g
            .nonterminals()
            .iter()
            .filter(|nt| g.productions_of(nt).is_empty())
            .cloned()
            .collect();
        if empty.is_empty() {
            return;
        }
        for nt in &empty {
            log::trace!("cleanup: dropping empty non-terminal {:?}", nt);
            g.remove_nonterminal(nt);
        }
        for nt in g.sorted_nonterminals().into_iter().map(String::from).collect::<Vec<_>>() {
            let kept: Vec<_> = g
                .productions_of(&nt)
                .iter()
                .filter(|p| {
                    !p.body()
                        .iter()
                        .any(|s| matches!(s, Symbol::NonTerminal(name) if empty.contains(name)))
                })
                .cloned()
                .collect();
            g.set_productions(nt, kept);
        }
    }
}

/// A non-terminal is productive iff it has some production all of whose
/// non-terminal symbols are themselves productive. Computed by upward
/// fixpoint; non-productive non-terminals and every production mentioning
/// one are then removed.
fn remove_nonproductive(g: &mut Grammar) {
    let mut productive: HashSet<String> = HashSet::new();
    loop {
        let mut changed = false;
        for nt in g.sorted_nonterminals().into_iter().map(String::from).collect::<Vec<_>>() {
            if productive.contains(&nt) {
                continue;
            }
            let is_productive = g.productions_of(&nt).iter().any(|p| {
                p.body().iter().all(|s| match s {
                    Symbol::NonTerminal(name) => productive.contains(name),
                    Symbol::Terminal(_) | Symbol::Epsilon => true,
                })
            });
            if is_productive {
                productive.insert(nt);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let nonproductive: HashSet<String> = g
        .nonterminals()
        .iter()
        .filter(|nt| !productive.contains(*nt))
        .cloned()
        .collect();
    for nt in &nonproductive {
        log::trace!("cleanup: dropping non-productive non-terminal {:?}", nt);
        g.remove_nonterminal(nt);
    }
    for nt in g.sorted_nonterminals().into_iter().map(String::from).collect::<Vec<_>>() {
        let kept: Vec<_> = g
            .productions_of(&nt)
            .iter()
            .filter(|p| {
                !p.body().iter().any(
                    |s| matches!(s, Symbol::NonTerminal(name) if nonproductive.contains(name)),
                )
            })
            .cloned()
            .collect();
        g.set_productions(nt, kept);
    }
}

/// Computes the forward closure of non-terminals reachable from `start` and
/// removes everything outside it.
fn remove_unreachable(g: &mut Grammar) {
    let mut reachable: HashSet<String> = HashSet::new();
    let mut stack = vec![g.start.clone()];
    reachable.insert(g.start.clone());
    while let Some(nt) = stack.pop() {
        for p in g.productions_of(&nt) {
            for s in p.body() {
                if let Symbol::NonTerminal(name) = s {
                    if reachable.insert(name.clone()) {
                        stack.push(name.clone());
                    }
                }
            }
        }
    }
    let unreachable: Vec<String> = g
        .nonterminals()
        .iter()
        .filter(|nt| !reachable.contains(*nt))
        .cloned()
        .collect();
    for nt in unreachable {
        log::trace!("cleanup: dropping unreachable non-terminal {:?}", nt);
        g.remove_nonterminal(&nt);
    }
}

/// Runs emptiness, productivity, and reachability removal in order,
/// repeating until no pass shrinks the grammar further. If `start` itself
/// gets removed (the grammar generates the empty language), it is
/// reinstated with an empty rule list so the `start ∈ nonterminals`
/// invariant always holds on return.
pub fn cleanup(g: &mut Grammar) {
    loop {
        let before = (g.total_productions(), g.nonterminals().len());
        remove_empty(g);
        remove_nonproductive(g);
        remove_unreachable(g);
        let after = (g.total_productions(), g.nonterminals().len());
        if after == before {
            break;
        }
    }
    if !g.has_nonterminal(&g.start.clone()) {
        log::debug!(
            "cleanup: start {:?} was removed, grammar generates the empty language",
            g.start
        );
        let start = g.start.clone();
        g.declare_nonterminal(start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Production;

    #[test]
    fn idempotent() {
        let mut g = Grammar::new("S0");
        g.add_production("S0", Production::new(vec![Symbol::Terminal('a')]));
        g.add_production(
            "S0",
            Production::new(vec![Symbol::NonTerminal("A1".to_string())]),
        );
        // A1 is referenced but never defined productively; after cleanup it
        // and the production naming it should be gone.
        cleanup(&mut g);
        let after_once = format!("{:?}", g.nonterminals());
        cleanup(&mut g);
        let after_twice = format!("{:?}", g.nonterminals());
        assert_eq!(after_once, after_twice);
        assert!(g.productions_of("S0").iter().all(|p| p.body() == [Symbol::Terminal('a')]));
    }

    #[test]
    fn empty_language_collapses_to_bare_start() {
        let mut g = Grammar::new("S0");
        g.add_production(
            "S0",
            Production::new(vec![Symbol::NonTerminal("A1".to_string())]),
        );
        g.add_production(
            "A1",
            Production::new(vec![Symbol::NonTerminal("A1".to_string()), Symbol::Terminal('a')]),
        );
        cleanup(&mut g);
        assert!(g.has_nonterminal("S0"));
        assert!(g.productions_of("S0").is_empty());
    }

    #[test]
    fn unreachable_nonterminal_is_dropped() {
        let mut g = Grammar::new("S0");
        g.add_production("S0", Production::new(vec![Symbol::Terminal('a')]));
        g.add_production("Z9", Production::new(vec![Symbol::Terminal('z')]));
        cleanup(&mut g);
        assert!(!g.has_nonterminal("Z9"));
    }
}
