//! Placeholder body parsing and formatter chains
//!
//! A body is an accessor path followed by zero or more formatter calls:
//! `name[0]:upper:pad(12, "=")`. Calls apply left to right, each receiving
//! the previous result as its value.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::CharIndices;

use serde_json::Value;
use tracing::debug;

use crate::error::FormatError;
use crate::literal::{self, Literal};
use crate::registry::Registry;

/// One `:name(args)` suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<Literal>,
}

/// A parsed placeholder body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Accessor path: empty, an index, a key or a chain
    pub path: String,
    /// Formatter calls in source order
    pub chain: Vec<Invocation>,
}

/// Split a placeholder body into accessor path and formatter chain
///
/// A suffix that does not parse leaves the whole body as the path.
pub fn parse(body: &str) -> Placeholder {
    let split = path_end(body);
    let (path, suffix) = body.split_at(split);

    match parse_suffixes(suffix) {
        Some(chain) => Placeholder {
            path: path.to_string(),
            chain,
        },
        None => {
            debug!(body = %body, "malformed formatter suffix, treating body as accessor path");
            Placeholder {
                path: body.to_string(),
                chain: Vec::new(),
            }
        }
    }
}

/// Byte offset of the first `:` outside brackets, or the body length
fn path_end(body: &str) -> usize {
    let mut chars = body.char_indices();
    let mut depth = 0usize;

    while let Some((i, c)) = chars.next() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '"' | '\'' if depth > 0 => skip_quoted(&mut chars, c),
            ':' if depth == 0 => return i,
            _ => {}
        }
    }
    body.len()
}

/// Advance past a quoted run; the opening quote is already consumed.
fn skip_quoted<I: Iterator<Item = (usize, char)>>(chars: &mut I, quote: char) {
    let mut escaped = false;
    for (_, c) in chars {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            c if c == quote => return,
            _ => {}
        }
    }
}

fn parse_suffixes(suffix: &str) -> Option<Vec<Invocation>> {
    let mut chars = suffix.char_indices().peekable();
    let mut chain = Vec::new();

    while let Some((_, c)) = chars.next() {
        if c != ':' {
            return None;
        }
        let name = formatter_name(suffix, &mut chars)?;
        let args = match chars.peek() {
            Some((_, '(')) => {
                chars.next();
                literal::tokenize(arguments(suffix, &mut chars)?)
            }
            _ => Vec::new(),
        };
        chain.push(Invocation { name, args });
    }

    Some(chain)
}

fn formatter_name(suffix: &str, chars: &mut Peekable<CharIndices<'_>>) -> Option<String> {
    let &(start, first) = chars.peek()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    let mut end = start;
    while let Some((i, c)) = chars.next_if(|(_, c)| c.is_ascii_alphanumeric() || *c == '_') {
        end = i + c.len_utf8();
    }
    Some(suffix[start..end].to_string())
}

/// Raw text up to the matching `)`, skipping quoted strings
fn arguments<'s>(suffix: &'s str, chars: &mut Peekable<CharIndices<'_>>) -> Option<&'s str> {
    let start = chars.peek().map_or(suffix.len(), |&(i, _)| i);
    while let Some((i, c)) = chars.next() {
        match c {
            ')' => return Some(&suffix[start..i]),
            '"' | '\'' => skip_quoted(&mut *chars, c),
            _ => {}
        }
    }
    // Unclosed argument list
    None
}

/// Run a formatter chain over a value
pub fn apply<'v>(
    value: Cow<'v, Value>,
    chain: &[Invocation],
    registry: &Registry,
) -> Result<Cow<'v, Value>, FormatError> {
    let mut value = value;
    for invocation in chain {
        let args: Vec<Value> = invocation.args.iter().cloned().map(Value::from).collect();
        value = Cow::Owned(registry.call(&invocation.name, &value, &args)?);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(name: &str, args: Vec<Literal>) -> Invocation {
        Invocation {
            name: name.to_string(),
            args,
        }
    }

    #[test]
    fn bare_path() {
        assert_eq!(
            parse("name"),
            Placeholder {
                path: "name".to_string(),
                chain: vec![]
            }
        );
        assert_eq!(parse("").path, "");
    }

    #[test]
    fn chain_in_source_order() {
        let parsed = parse(r#":upper:lpad(12, " ")"#);
        assert_eq!(parsed.path, "");
        assert_eq!(
            parsed.chain,
            vec![
                call("upper", vec![]),
                call("lpad", vec![Literal::Int(12), Literal::Str(" ".into())]),
            ]
        );
    }

    #[test]
    fn path_with_colon_inside_brackets() {
        let parsed = parse(r#"map["a:b"]:upper"#);
        assert_eq!(parsed.path, r#"map["a:b"]"#);
        assert_eq!(parsed.chain, vec![call("upper", vec![])]);
    }

    #[test]
    fn parens_inside_string_arguments() {
        let parsed = parse(r#":surround("(", ")")"#);
        assert_eq!(
            parsed.chain,
            vec![call(
                "surround",
                vec![Literal::Str("(".into()), Literal::Str(")".into())]
            )]
        );
    }

    #[test]
    fn escaped_quote_inside_arguments() {
        let parsed = parse(r#":pad(12, "\")=")"#);
        assert_eq!(
            parsed.chain,
            vec![call("pad", vec![Literal::Int(12), Literal::Str("\")=".into())])]
        );
    }

    #[test]
    fn malformed_suffix_keeps_whole_body() {
        for body in ["name:", "x:up(", "x:9lives", "x:upper junk"] {
            let parsed = parse(body);
            assert_eq!(parsed.path, body);
            assert!(parsed.chain.is_empty());
        }
    }

    #[test]
    fn apply_left_to_right() {
        let registry = Registry::builtin();
        let chain = parse(r#":surround("i", "i"):upper"#).chain;
        let value = apply(Cow::Owned(json!("Lancelot")), &chain, &registry).unwrap();
        assert_eq!(value.as_ref(), &json!("ILANCELOTI"));
    }

    #[test]
    fn empty_chain_keeps_borrow() {
        let registry = Registry::builtin();
        let original = json!("x");
        let value = apply(Cow::Borrowed(&original), &[], &registry).unwrap();
        assert!(matches!(value, Cow::Borrowed(_)));
    }

    #[test]
    fn unknown_formatter() {
        let registry = Registry::builtin();
        let chain = parse(":unicornify").chain;
        let err = apply(Cow::Owned(json!("x")), &chain, &registry).unwrap_err();
        assert_eq!(err.to_string(), "Undefined formatter \"unicornify\".");
    }

    #[test]
    fn unknown_formatter_stops_the_chain() {
        let registry = Registry::builtin();
        let chain = parse(":upper:nope:lower").chain;
        let err = apply(Cow::Owned(json!("x")), &chain, &registry).unwrap_err();
        assert_eq!(
            err,
            FormatError::UndefinedFormatter {
                name: "nope".to_string()
            }
        );
    }

    #[test]
    fn chain_passes_literal_arguments() {
        let registry = Registry::builtin();
        let chain = parse(r#":repeat(2):surround("<", ">")"#).chain;
        let value = apply(Cow::Owned(json!("ab")), &chain, &registry).unwrap();
        assert_eq!(value.as_ref(), &json!("<abab>"));
    }
}
