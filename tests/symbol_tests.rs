//! Integration tests for the Symbol type from outside the crate.

use cfg_normalizer::Symbol;

#[test]
fn ordering_is_nonterminal_terminal_epsilon_consistent() {
    let mut symbols = vec![
        Symbol::NonTerminal("S0".to_string()),
        Symbol::Terminal('a'),
        Symbol::Epsilon,
    ];
    symbols.sort();
    assert_eq!(
        symbols,
        vec![
            Symbol::NonTerminal("S0".to_string()),
            Symbol::Terminal('a'),
            Symbol::Epsilon,
        ]
    );
}

#[test]
fn concatenated_display_reproduces_text_format_bodies() {
    let body = vec![
        Symbol::NonTerminal("A1".to_string()),
        Symbol::Terminal('b'),
        Symbol::NonTerminal("C1".to_string()),
    ];
    let rendered: String = body.iter().map(Symbol::to_string).collect();
    assert_eq!(rendered, "A1bC1");
}
