//! End-to-end tests exercising the full read -> normalize -> generate
//! pipeline against concrete grammars.

use cfg_normalizer::grammar::Limits;
use cfg_normalizer::{cnf, generator, gnf, reader};

fn words(text: &str, n: usize) -> Vec<String> {
    let g = reader::read_grammar(text).unwrap();
    let limits = Limits::default();
    generator::generate(&g, n, &limits).unwrap()
}

fn cnf_and_gnf_words(text: &str, n: usize) -> (Vec<String>, Vec<String>) {
    let g = reader::read_grammar(text).unwrap();
    let limits = Limits::default();
    let chomsky = cnf::to_cnf(&g, &limits).unwrap();
    let greibach = gnf::to_gnf(&g, &limits).unwrap();
    (
        generator::generate(&chomsky, n, &limits).unwrap(),
        generator::generate(&greibach, n, &limits).unwrap(),
    )
}

#[test]
fn ancbn_language_matches_across_forms() {
    let text = "S0 : A1S0B1 | C1\nA1 : a\nB1 : b\nC1 : c | E\n";
    // A worked example elsewhere lists ["", "acb", "aacbb"] for N=4, but
    // "aacbb" has length 5, and C1's epsilon branch also makes every a^n b^n
    // string derivable, which that list omits entirely. The actual language
    // bounded by N=5 is the union of a^n b^n and a^n c b^n.
    let raw = words(text, 5);
    let expected: Vec<String> = vec!["", "aabb", "aacbb", "ab", "acb", "c"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(raw, expected);

    let (chomsky_words, greibach_words) = cnf_and_gnf_words(text, 5);
    assert_eq!(chomsky_words, expected);
    assert_eq!(greibach_words, expected);
}

#[test]
fn palindromes_match_across_forms() {
    let text = "S0 : A1S0A1 | B1S0B1 | E | A1 | B1\nA1 : a\nB1 : b\n";
    // A worked example elsewhere lists 7 palindromes up to length 3, but
    // omits "aa" and "bb" (length-2 palindromes reachable by wrapping the
    // S0 -> E base case once), so the actually-correct set has 9 entries.
    let raw = words(text, 3);
    let expected: Vec<String> = vec!["", "a", "aa", "aaa", "aba", "b", "bab", "bb", "bbb"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(raw, expected);

    let (chomsky_words, greibach_words) = cnf_and_gnf_words(text, 3);
    assert_eq!(chomsky_words, expected);
    assert_eq!(greibach_words, expected);
}

#[test]
fn epsilon_only_start() {
    let text = "S0 : E\n";
    let expected: Vec<String> = vec![String::new()];
    assert_eq!(words(text, 5), expected);

    let (chomsky_words, greibach_words) = cnf_and_gnf_words(text, 5);
    assert_eq!(chomsky_words, expected);
    assert_eq!(greibach_words, expected);
}

#[test]
fn empty_language_after_cleanup() {
    let text = "S0 : A1\nA1 : A1a\n";
    assert!(words(text, 5).is_empty());

    let (chomsky_words, greibach_words) = cnf_and_gnf_words(text, 5);
    assert!(chomsky_words.is_empty());
    assert!(greibach_words.is_empty());
}

#[test]
fn left_recursion_is_eliminated_in_gnf() {
    let text = "S0 : S0A1 | A1\nA1 : a\n";
    let expected: Vec<String> = vec!["a", "aa", "aaa"].into_iter().map(String::from).collect();
    assert_eq!(words(text, 3), expected);

    let (chomsky_words, greibach_words) = cnf_and_gnf_words(text, 3);
    assert_eq!(chomsky_words, expected);
    assert_eq!(greibach_words, expected);
}

#[test]
fn unit_chain_collapses_to_terminal_alternatives() {
    let text = "S0 : A1\nA1 : B1\nB1 : a | b\n";
    let expected: Vec<String> = vec!["a", "b"].into_iter().map(String::from).collect();
    assert_eq!(words(text, 1), expected);

    let (chomsky_words, greibach_words) = cnf_and_gnf_words(text, 1);
    assert_eq!(chomsky_words, expected);
    assert_eq!(greibach_words, expected);
}

#[test]
fn write_then_read_round_trips_the_generated_language() {
    let text = "S0 : A1S0B1 | C1\nA1 : a\nB1 : b\nC1 : c | E\n";
    let g = reader::read_grammar(text).unwrap();
    let serialized = cfg_normalizer::writer::write_grammar(&g);
    let reparsed = reader::read_grammar(&serialized).unwrap();

    let limits = Limits::default();
    let original_words = generator::generate(&g, 5, &limits).unwrap();
    let reparsed_words = generator::generate(&reparsed, 5, &limits).unwrap();
    assert_eq!(original_words, reparsed_words);
}

#[test]
fn undefined_reference_is_rejected_before_any_transformation() {
    let text = "S0 : A1\n";
    assert!(reader::read_grammar(text).is_err());
}
