//! Formatter argument tokenizer
//!
//! Turns the text between a formatter's parentheses into typed literals:
//! - `true` / `false`
//! - optionally signed integers: `12`, `-3`
//! - single- or double-quoted strings: `"a"`, `'b'`, `"say \"hi\""`
//!
//! Tokenizing never fails. A malformed tail ends the argument list and the
//! literals read so far are returned.

use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;

/// A literal formatter argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Int(n) => Value::from(n),
            Literal::Bool(b) => Value::Bool(b),
            Literal::Str(s) => Value::String(s),
        }
    }
}

/// Tokenize a comma-separated argument list
///
/// Examples:
/// - `12, "="` → [Int(12), Str("=")]
/// - `true` → [Bool(true)]
/// - `1, oops, 2` → [Int(1)]
pub fn tokenize(args: &str) -> Vec<Literal> {
    let mut chars = args.chars().peekable();
    let mut literals = Vec::new();

    loop {
        skip_whitespace(&mut chars);
        let Some(literal) = next_literal(&mut chars) else {
            break;
        };
        literals.push(literal);

        skip_whitespace(&mut chars);
        match chars.next() {
            Some(',') => continue,
            _ => break,
        }
    }

    literals
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn next_literal(chars: &mut Peekable<Chars<'_>>) -> Option<Literal> {
    match *chars.peek()? {
        quote @ ('"' | '\'') => {
            chars.next();
            quoted(chars, quote).map(Literal::Str)
        }
        '-' | '+' | '0'..='9' => integer(chars).map(Literal::Int),
        _ => keyword(chars),
    }
}

/// Read a quoted string body; the opening quote is already consumed.
///
/// Only `\"`, `\'` and `\\` are escapes; any other backslash is kept as is.
fn quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Option<String> {
    let mut out = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next_if(|n| matches!(*n, '"' | '\'' | '\\')) {
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            },
            c if c == quote => return Some(out),
            c => out.push(c),
        }
    }
    // Unterminated string
    None
}

fn integer(chars: &mut Peekable<Chars<'_>>) -> Option<i64> {
    let mut text = String::new();
    if let Some(sign) = chars.next_if(|c| matches!(*c, '-' | '+')) {
        text.push(sign);
    }
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        text.push(digit);
    }
    if !at_boundary(chars) {
        return None;
    }
    text.parse().ok()
}

fn keyword(chars: &mut Peekable<Chars<'_>>) -> Option<Literal> {
    let mut word = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_alphanumeric() || *c == '_') {
        word.push(c);
    }
    if !at_boundary(chars) {
        return None;
    }
    match word.as_str() {
        "true" => Some(Literal::Bool(true)),
        "false" => Some(Literal::Bool(false)),
        _ => None,
    }
}

fn at_boundary(chars: &mut Peekable<Chars<'_>>) -> bool {
    match chars.peek().copied() {
        None | Some(',') => true,
        Some(c) => c.is_whitespace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Literal {
        Literal::Str(text.to_string())
    }

    #[test]
    fn empty_list() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn numbers_and_booleans() {
        assert_eq!(
            tokenize("12, -3, +4, true,false"),
            vec![
                Literal::Int(12),
                Literal::Int(-3),
                Literal::Int(4),
                Literal::Bool(true),
                Literal::Bool(false),
            ]
        );
    }

    #[test]
    fn strings_with_either_quote() {
        assert_eq!(tokenize(r#""(", ')'"#), vec![s("("), s(")")]);
        assert_eq!(tokenize(r#""a,b""#), vec![s("a,b")]);
    }

    #[test]
    fn opposite_quote_needs_no_escape() {
        assert_eq!(tokenize(r#"12, "'=""#), vec![Literal::Int(12), s("'=")]);
        assert_eq!(tokenize(r#"'"'"#), vec![s("\"")]);
    }

    #[test]
    fn own_quote_and_backslash_escapes() {
        assert_eq!(tokenize(r#"12, "\"=""#), vec![Literal::Int(12), s("\"=")]);
        assert_eq!(tokenize(r"'it\'s'"), vec![s("it's")]);
        assert_eq!(tokenize(r#""a\\b""#), vec![s("a\\b")]);
    }

    #[test]
    fn unknown_escape_keeps_backslash() {
        assert_eq!(tokenize(r#""a\nb""#), vec![s("a\\nb")]);
    }

    #[test]
    fn malformed_tail_stops_tokenizing() {
        assert_eq!(tokenize("1, oops, 2"), vec![Literal::Int(1)]);
        assert_eq!(tokenize("1, 2abc"), vec![Literal::Int(1)]);
        assert_eq!(tokenize(r#"1, "open"#), vec![Literal::Int(1)]);
        assert_eq!(tokenize("1 2"), vec![Literal::Int(1)]);
        assert!(tokenize("trueish").is_empty());
    }

    #[test]
    fn bare_sign_is_malformed() {
        assert!(tokenize("-").is_empty());
    }

    #[test]
    fn literal_into_value() {
        assert_eq!(Value::from(Literal::Int(3)), serde_json::json!(3));
        assert_eq!(Value::from(s("x")), serde_json::json!("x"));
        assert_eq!(Value::from(Literal::Bool(true)), serde_json::json!(true));
    }
}
