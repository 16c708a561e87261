//! Line-oriented reader: turns grammar source text into a [`Grammar`].
//!
//! Each non-empty line has the shape `LHS : ALT1 | ALT2 | ...`. The first
//! non-terminal seen becomes `start`. Duplicate LHSes accumulate productions.
//! After parsing, references are checked and [`crate::cleanup::cleanup`] runs.

use crate::cleanup;
use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use crate::token::{tokenize_line, Token};

/// Parses `text` into a cleaned-up [`Grammar`].
///
/// # Errors
/// Returns [`GrammarError::Lexical`] for an unrecognized character,
/// [`GrammarError::Structural`] for a line missing its `:` or an empty
/// alternative, and [`GrammarError::Reference`] if some right-hand side
/// names a non-terminal that is never defined on any left-hand side.
pub fn read_grammar(text: &str) -> Result<Grammar> {
    let mut grammar: Option<Grammar> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if raw_line.trim().is_empty() {
            continue;
        }

        let tokens = tokenize_line(raw_line, line_no)?;
        let mut iter = tokens.into_iter();

        let lhs = match iter.next() {
            Some(Token::NonTerminal(name)) => name,
            _ => {
                return Err(GrammarError::Structural {
                    line: line_no,
                    message: "line must begin with a non-terminal".to_string(),
                })
            }
        };

        match iter.next() {
            Some(Token::Colon) => {}
            _ => {
                return Err(GrammarError::Structural {
                    line: line_no,
                    message: "expected ':' after the left-hand side".to_string(),
                })
            }
        }

        let g = grammar.get_or_insert_with(|| Grammar::new(lhs.clone()));
        g.declare_nonterminal(lhs.clone());

        let mut current: Vec<Symbol> = Vec::new();
        let mut alternatives: Vec<Vec<Symbol>> = Vec::new();

        for token in iter {
            match token {
                Token::Pipe => {
                    alternatives.push(std::mem::take(&mut current));
                }
                Token::Terminal(c) => current.push(Symbol::Terminal(c)),
                Token::Epsilon => current.push(Symbol::Epsilon),
                Token::NonTerminal(name) => current.push(Symbol::NonTerminal(name)),
                Token::Colon => {
                    return Err(GrammarError::Structural {
                        line: line_no,
                        message: "unexpected second ':'".to_string(),
                    })
                }
            }
        }
        alternatives.push(current);

        if alternatives.is_empty() {
            return Err(GrammarError::Structural {
                line: line_no,
                message: "rule has no alternatives".to_string(),
            });
        }

        for alt in alternatives {
            if alt.is_empty() {
                return Err(GrammarError::Structural {
                    line: line_no,
                    message: "empty alternative".to_string(),
                });
            }
            if alt.len() > 1 && alt.iter().any(Symbol::is_epsilon) {
                return Err(GrammarError::Structural {
                    line: line_no,
                    message: "epsilon cannot be mixed with other symbols".to_string(),
                });
            }
            g.add_production(lhs.clone(), Production::new(alt));
        }
    }

    let mut g = grammar.ok_or_else(|| GrammarError::Structural {
        line: 0,
        message: "grammar source contains no rules".to_string(),
    })?;

    g.check_references()?;
    cleanup::cleanup(&mut g);
    log::debug!(
        "reader: parsed grammar with start {:?}, {} non-terminal(s)",
        g.start,
        g.nonterminals().len()
    );
    Ok(g)
}
