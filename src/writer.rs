//! Renders a [`Grammar`] back into the text format read by [`crate::reader`]:
//! one non-terminal per line, `start` first, alternatives separated by `|`.

use crate::grammar::Grammar;

/// Writes `g` as text, `start` on the first line followed by the remaining
/// non-terminals in sorted order, one per line.
pub fn write_grammar(g: &Grammar) -> String {
    let mut lines = Vec::with_capacity(g.nonterminals().len());
    lines.push(write_line(g, &g.start));
    for nt in g.sorted_nonterminals() {
        if nt != g.start {
            lines.push(write_line(g, nt));
        }
    }
    lines.join("\n")
}

fn write_line(g: &Grammar, nt: &str) -> String {
    let alternatives: Vec<String> = g.productions_of(nt).iter().map(|p| p.to_string()).collect();
    format!("{} : {}", nt, alternatives.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Production;
    use crate::symbol::Symbol;

    #[test]
    fn writes_start_first_then_sorted_rest() {
        let mut g = Grammar::new("S0");
        g.add_production(
            "S0",
            Production::new(vec![Symbol::NonTerminal("A1".to_string())]),
        );
        g.add_production("A1", Production::new(vec![Symbol::Terminal('a')]));
        g.add_production("A1", Production::new(vec![Symbol::Epsilon]));

        let text = write_grammar(&g);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("S0 : A1"));
        assert_eq!(lines.next(), Some("A1 : a | E"));
        assert_eq!(lines.next(), None);
    }
}
