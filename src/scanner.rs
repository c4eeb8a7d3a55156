//! Placeholder scanner
//!
//! Splits a template into literal runs, escaped braces and `{...}`
//! placeholders. The scanner is a lazy iterator: cloning it, or calling
//! [`scan`] again, restarts from the same position.
//!
//! Rules:
//! - `\{` and `\}` outside a placeholder are escaped braces
//! - `{` opens a placeholder closed by the next `}` that is not escaped
//! - `\{` / `\}` inside a placeholder stay in the body as plain braces
//! - a `{` that is never closed is literal text

use std::borrow::Cow;
use std::ops::Range;

/// Token representing a scanned template fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text (stores range in original string)
    Literal(Range<usize>),
    /// Escaped `{` or `}` outside any placeholder
    Brace(char),
    /// `{ body }`; `span` covers both braces, `body` has inner escapes resolved
    Placeholder { span: Range<usize>, body: Cow<'a, str> },
}

/// Lazy scanner over a template
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    template: &'a str,
    pos: usize,
    /// Set once a search for `}` failed: no later `{` can close either
    exhausted: bool,
}

/// Start scanning a template
pub fn scan(template: &str) -> Scanner<'_> {
    Scanner {
        template,
        pos: 0,
        exhausted: false,
    }
}

fn escaped_brace(bytes: &[u8], i: usize) -> Option<char> {
    match (bytes[i], bytes.get(i + 1)) {
        (b'\\', Some(b'{')) => Some('{'),
        (b'\\', Some(b'}')) => Some('}'),
        _ => None,
    }
}

impl<'a> Scanner<'a> {
    /// Position of the `}` closing a placeholder whose body starts at `from`
    fn find_close(&self, from: usize) -> Option<usize> {
        let bytes = self.template.as_bytes();
        let mut i = from;
        while i < bytes.len() {
            if escaped_brace(bytes, i).is_some() {
                i += 2;
            } else if bytes[i] == b'}' {
                return Some(i);
            } else {
                i += 1;
            }
        }
        None
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let bytes = self.template.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        let mut i = start;
        while i < bytes.len() {
            if let Some(brace) = escaped_brace(bytes, i) {
                if i > start {
                    self.pos = i;
                    return Some(Token::Literal(start..i));
                }
                self.pos = i + 2;
                return Some(Token::Brace(brace));
            }

            if bytes[i] == b'{' && !self.exhausted {
                match self.find_close(i + 1) {
                    Some(_) if i > start => {
                        self.pos = i;
                        return Some(Token::Literal(start..i));
                    }
                    Some(close) => {
                        self.pos = close + 1;
                        return Some(Token::Placeholder {
                            span: i..close + 1,
                            body: unescape_body(&self.template[i + 1..close]),
                        });
                    }
                    None => self.exhausted = true,
                }
            }
            i += 1;
        }

        self.pos = bytes.len();
        Some(Token::Literal(start..bytes.len()))
    }
}

/// Resolve `\{` and `\}` inside a placeholder body
fn unescape_body(body: &str) -> Cow<'_, str> {
    if !body.contains("\\{") && !body.contains("\\}") {
        return Cow::Borrowed(body);
    }
    Cow::Owned(body.replace("\\{", "{").replace("\\}", "}"))
}
