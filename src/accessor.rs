//! Accessor path parser
//!
//! Supports:
//! - `a.b.c` (dot notation, optional leading dot)
//! - `a[0].b` (array index)
//! - `a['key']`, `a["key"]` (quoted keys; the opposite quote needs no
//!   escape, the same quote is escaped with `\`)
//!
//! Does NOT support:
//! - Negative or computed indices: `a[-1]`, `a[b]`
//! - Wildcards or slices

use std::iter::Peekable;
use std::str::CharIndices;

use serde_json::Value;

use crate::error::FormatError;
use crate::value::UNDEFINED;

/// A parsed accessor segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Property access: `name`, `.name`, `['name']`
    Key(String),
    /// Index access: `[0]`
    Index(usize),
}

impl Segment {
    /// Property name as reported in errors
    pub fn name(&self) -> String {
        match self {
            Segment::Key(key) => key.clone(),
            Segment::Index(index) => index.to_string(),
        }
    }
}

/// True when the path needs the chain resolver rather than a single lookup
pub fn is_chain(path: &str) -> bool {
    path.contains(['.', '['])
}

/// Parse an accessor path into segments
///
/// Examples:
/// - `msg.time` → [Key("msg"), Key("time")]
/// - `msg['values'][1]` → [Key("msg"), Key("values"), Index(1)]
pub fn parse(path: &str) -> Result<Vec<Segment>, FormatError> {
    let invalid = || FormatError::InvalidPath {
        path: path.to_string(),
    };

    let mut chars = path.char_indices().peekable();
    let mut segments = Vec::new();

    // A leading identifier needs no dot
    if !matches!(chars.peek(), None | Some((_, '.' | '['))) {
        segments.push(Segment::Key(identifier(path, &mut chars)));
    }

    while let Some((_, c)) = chars.next() {
        match c {
            '.' => {
                let key = identifier(path, &mut chars);
                if key.is_empty() {
                    return Err(invalid());
                }
                segments.push(Segment::Key(key));
            }
            '[' => {
                let segment = bracketed(&mut chars).ok_or_else(invalid)?;
                segments.push(segment);
            }
            _ => return Err(invalid()),
        }
    }

    if segments.is_empty() {
        return Err(invalid());
    }
    Ok(segments)
}

/// Read up to the next `.` or `[`
fn identifier(path: &str, chars: &mut Peekable<CharIndices<'_>>) -> String {
    let Some(&(start, _)) = chars.peek() else {
        return String::new();
    };
    let mut end = path.len();
    while let Some(&(i, c)) = chars.peek() {
        if c == '.' || c == '[' {
            end = i;
            break;
        }
        chars.next();
    }
    path[start..end].to_string()
}

/// Read the inside of `[...]`; the opening bracket is already consumed.
fn bracketed(chars: &mut Peekable<CharIndices<'_>>) -> Option<Segment> {
    let segment = match chars.peek()?.1 {
        quote @ ('"' | '\'') => {
            chars.next();
            Segment::Key(quoted_key(chars, quote)?)
        }
        '0'..='9' => {
            let mut digits = String::new();
            while let Some((_, d)) = chars.next_if(|(_, c)| c.is_ascii_digit()) {
                digits.push(d);
            }
            Segment::Index(digits.parse().ok()?)
        }
        _ => return None,
    };
    chars.next_if(|(_, c)| *c == ']').map(|_| segment)
}

fn quoted_key(chars: &mut Peekable<CharIndices<'_>>, quote: char) -> Option<String> {
    let mut key = String::new();
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => match chars.next_if(|(_, n)| *n == quote || *n == '\\') {
                Some((_, escaped)) => key.push(escaped),
                None => key.push('\\'),
            },
            c if c == quote => return Some(key),
            c => key.push(c),
        }
    }
    None
}

/// Apply segments to a root value
///
/// Missing keys and out-of-range indices yield undefined (`Null`); only
/// stepping *through* undefined fails, naming the segment that could not be
/// read.
pub fn apply<'a>(root: &'a Value, segments: &[Segment]) -> Result<&'a Value, FormatError> {
    let mut current = root;

    for segment in segments {
        current = match (current, segment) {
            (Value::Null, _) => {
                return Err(FormatError::PropertyAccess {
                    property: segment.name(),
                })
            }
            (Value::Object(map), Segment::Key(key)) => map.get(key).unwrap_or(&UNDEFINED),
            (Value::Object(map), Segment::Index(index)) => {
                map.get(&index.to_string()).unwrap_or(&UNDEFINED)
            }
            (Value::Array(items), Segment::Index(index)) => items.get(*index).unwrap_or(&UNDEFINED),
            (Value::Array(items), Segment::Key(key)) => key
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index))
                .unwrap_or(&UNDEFINED),
            // Primitives carry no properties
            _ => &UNDEFINED,
        };
    }

    Ok(current)
}

/// Parse and apply an accessor path in one step
pub fn resolve<'a>(root: &'a Value, path: &str) -> Result<&'a Value, FormatError> {
    let segments = parse(path)?;
    apply(root, &segments)
}
