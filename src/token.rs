//! Tokenizer for the grammar text format.
//!
//! Classifies the characters of one line into [`Token`]s: `:` and `|`
//! separators, lowercase-letter terminals, `E` for epsilon, and
//! `[A-DF-Z][0-9]` non-terminals (the digit may be separated from its
//! letter by whitespace, which is stripped). Any other character is a
//! lexical error.

use crate::error::{GrammarError, Result};

/// A single lexical token of the grammar text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `:`
    Colon,
    /// `|`
    Pipe,
    /// A lowercase-letter terminal.
    Terminal(char),
    /// `E`
    Epsilon,
    /// A non-terminal name, e.g. `"S0"`.
    NonTerminal(String),
}

/// Tokenizes a single line of grammar source, numbered `line_no` for error
/// reporting.
pub fn tokenize_line(line: &str, line_no: usize) -> Result<Vec<Token>> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            ':' => {
                tokens.push(Token::Colon);
                i += 1;
            }
            '|' => {
                tokens.push(Token::Pipe);
                i += 1;
            }
            'E' => {
                tokens.push(Token::Epsilon);
                i += 1;
            }
            'a'..='z' => {
                tokens.push(Token::Terminal(c));
                i += 1;
            }
            'A'..='D' | 'F'..='Z' => {
                let mut j = i + 1;
                while j < chars.len() && (chars[j] == ' ' || chars[j] == '\t') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    tokens.push(Token::NonTerminal(format!("{}{}", c, chars[j])));
                    i = j + 1;
                } else {
                    return Err(GrammarError::Lexical { line: line_no, character: c });
                }
            }
            other => return Err(GrammarError::Lexical { line: line_no, character: other }),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_a_simple_rule() {
        let tokens = tokenize_line("S0 : A1S0B1 | C1", 1).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::NonTerminal("S0".to_string()),
                Token::Colon,
                Token::NonTerminal("A1".to_string()),
                Token::NonTerminal("S0".to_string()),
                Token::NonTerminal("B1".to_string()),
                Token::Pipe,
                Token::NonTerminal("C1".to_string()),
            ]
        );
    }

    #[test]
    fn strips_whitespace_inside_nonterminal_token() {
        let tokens = tokenize_line("A  1 : a", 1).unwrap();
        assert_eq!(tokens[0], Token::NonTerminal("A1".to_string()));
    }

    #[test]
    fn rejects_unrecognized_character() {
        let err = tokenize_line("S0 : $", 3).unwrap_err();
        match err {
            GrammarError::Lexical { line, character } => {
                assert_eq!(line, 3);
                assert_eq!(character, '$');
            }
            _ => panic!("expected a lexical error"),
        }
    }

    #[test]
    fn epsilon_token_is_distinct_from_nonterminal() {
        let tokens = tokenize_line("C1 : c | E", 1).unwrap();
        assert_eq!(tokens.last(), Some(&Token::Epsilon));
    }
}
