//! Normalization passes shared by the CNF and GNF pipelines: introducing a
//! fresh start symbol, epsilon elimination, and unit elimination.

use crate::error::Result;
use crate::grammar::{dedup_preserve_order, Grammar, Limits, Production};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// Creates a fresh non-terminal `S'`, adds the single production
/// `S' -> start_old`, and makes `S'` the new start. Guarantees the start
/// symbol never occurs on any production's right-hand side, a precondition
/// relied on by epsilon elimination and left-recursion elimination.
pub fn introduce_fresh_start(g: &mut Grammar) {
    let old_start = g.start.clone();
    let new_start = g.fresh_name();
    log::debug!("START: {} -> {} (old start becomes a body symbol)", new_start, old_start);
    g.add_production(new_start.clone(), Production::new(vec![Symbol::NonTerminal(old_start)]));
    g.start = new_start;
}

fn compute_nullable(g: &Grammar) -> HashSet<String> {
    let mut nullable: HashSet<String> = HashSet::new();
    loop {
        let mut changed = false;
        for nt in g.sorted_nonterminals().into_iter().map(String::from).collect::<Vec<_>>() {
            if nullable.contains(&nt) {
                continue;
            }
            let becomes_nullable = g.productions_of(&nt).iter().any(|p| {
                p.is_epsilon()
                    || (!p.body().is_empty()
                        && p.body().iter().all(|s| {
                            matches!(s, Symbol::NonTerminal(name) if nullable.contains(name))
                        }))
            });
            if becomes_nullable {
                nullable.insert(nt);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    nullable
}

/// Eliminates epsilon productions. Computes the nullable set, expands every
/// production by every non-empty subset of its nullable-non-terminal
/// positions, then drops all solely-epsilon productions except `start -> E`
/// when `start` itself was nullable.
pub fn eliminate_epsilon(g: &mut Grammar, limits: &Limits) -> Result<()> {
    let nullable = compute_nullable(g);
    log::debug!("DEL: {} nullable non-terminal(s)", nullable.len());
    let start_was_nullable = nullable.contains(&g.start);

    for nt in g.sorted_nonterminals().into_iter().map(String::from).collect::<Vec<_>>() {
        let prods = g.productions_of(&nt).to_vec();
        let mut new_prods = Vec::with_capacity(prods.len());

        for p in &prods {
            if p.is_epsilon() {
                continue;
            }
            new_prods.push(p.clone());

            let nullable_positions: Vec<usize> = p
                .body()
                .iter()
                .enumerate()
                .filter_map(|(i, s)| match s {
                    Symbol::NonTerminal(name) if nullable.contains(name) => Some(i),
                    _ => None,
                })
                .collect();

            for mask in 1u32..(1u32 << nullable_positions.len()) {
                let mut new_body = Vec::with_capacity(p.len());
                for (i, s) in p.body().iter().enumerate() {
                    let drop = nullable_positions
                        .iter()
                        .position(|&pos| pos == i)
                        .map(|bit| mask & (1 << bit) != 0)
                        .unwrap_or(false);
                    if !drop {
                        new_body.push(s.clone());
                    }
                }
                if !new_body.is_empty() {
                    new_prods.push(Production::new(new_body));
                }
            }
        }

        if nt == g.start && start_was_nullable {
            new_prods.push(Production::new(vec![Symbol::Epsilon]));
        }

        g.set_productions(nt, dedup_preserve_order(new_prods));
    }

    g.check_limits(limits, "DEL")
}

fn is_unit(p: &Production) -> bool {
    matches!(p.body(), [Symbol::NonTerminal(_)])
}

fn unit_closure(g: &Grammar, nt: &str) -> HashSet<String> {
    let mut closure = HashSet::new();
    closure.insert(nt.to_string());
    let mut stack = vec![nt.to_string()];
    while let Some(current) = stack.pop() {
        for p in g.productions_of(&current) {
            if let [Symbol::NonTerminal(b)] = p.body() {
                if closure.insert(b.clone()) {
                    stack.push(b.clone());
                }
            }
        }
    }
    closure
}

/// Eliminates unit productions (`A -> B` with `B` a lone non-terminal).
/// Computes the unit-pair relation for every non-terminal, copies every
/// non-unit production reachable through it, then deletes all unit
/// productions.
pub fn eliminate_unit(g: &mut Grammar, limits: &Limits) -> Result<()> {
    let names: Vec<String> = g.sorted_nonterminals().into_iter().map(String::from).collect();

    let mut additions: HashMap<String, Vec<Production>> = HashMap::new();
    for a in &names {
        let closure = unit_closure(g, a);
        let mut adds = Vec::new();
        for b in &closure {
            if b == a {
                continue;
            }
            for p in g.productions_of(b) {
                if !is_unit(p) {
                    adds.push(p.clone());
                }
            }
        }
        additions.insert(a.clone(), adds);
    }
    for (a, adds) in additions {
        for p in adds {
            g.add_production(a.clone(), p);
        }
    }

    for nt in &names {
        let kept: Vec<Production> = g
            .productions_of(nt)
            .iter()
            .filter(|p| !is_unit(p))
            .cloned()
            .collect();
        g.set_productions(nt.clone(), kept);
    }

    g.check_limits(limits, "UNIT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn introduce_fresh_start_guards_old_start() {
        let mut g = Grammar::new("S0");
        g.add_production("S0", Production::new(vec![Symbol::Terminal('a')]));
        introduce_fresh_start(&mut g);
        assert_ne!(g.start, "S0");
        assert_eq!(
            g.productions_of(&g.start.clone()),
            &[Production::new(vec![Symbol::NonTerminal("S0".to_string())])]
        );
    }

    #[test]
    fn eliminate_epsilon_expands_nullable_positions() {
        let mut g = Grammar::new("S0");
        g.add_production(
            "S0",
            Production::new(vec![
                Symbol::NonTerminal("A1".to_string()),
                Symbol::NonTerminal("B1".to_string()),
            ]),
        );
        g.add_production("A1", Production::new(vec![Symbol::Terminal('a')]));
        g.add_production("A1", Production::new(vec![Symbol::Epsilon]));
        g.add_production("B1", Production::new(vec![Symbol::Terminal('b')]));

        let limits = Limits::default();
        eliminate_epsilon(&mut g, &limits).unwrap();

        assert!(g
            .productions_of("S0")
            .contains(&Production::new(vec![Symbol::Terminal('b')])));
        assert!(g.productions_of("A1").iter().all(|p| !p.is_epsilon()));
    }

    #[test]
    fn eliminate_unit_copies_through_chain() {
        let mut g = Grammar::new("S0");
        g.add_production(
            "S0",
            Production::new(vec![Symbol::NonTerminal("A1".to_string())]),
        );
        g.add_production(
            "A1",
            Production::new(vec![Symbol::NonTerminal("B1".to_string())]),
        );
        g.add_production("B1", Production::new(vec![Symbol::Terminal('a')]));
        g.add_production("B1", Production::new(vec![Symbol::Terminal('b')]));

        let limits = Limits::default();
        eliminate_unit(&mut g, &limits).unwrap();

        assert!(g
            .productions_of("S0")
            .contains(&Production::new(vec![Symbol::Terminal('a')])));
        assert!(g
            .productions_of("S0")
            .contains(&Production::new(vec![Symbol::Terminal('b')])));
        assert!(g.productions_of("S0").iter().all(|p| !is_unit(p)));
    }
}
