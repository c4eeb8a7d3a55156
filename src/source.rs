//! Value sources and placeholder value resolution
//!
//! The call's arguments are classified once per `format` call and every
//! placeholder resolves against that classification. The auto-index counter
//! advances once per placeholder seen, whichever rule resolved it.

use serde_json::{Map, Value};
use tracing::debug;

use crate::accessor;
use crate::error::FormatError;
use crate::options::{BlankBody, MissingKey, Options};
use crate::value::UNDEFINED;

/// Classification of a call's arguments
#[derive(Debug, Clone, Copy)]
pub enum ValueSource<'a> {
    /// First argument is a JSON object
    Object {
        root: &'a Value,
        map: &'a Map<String, Value>,
    },
    /// First argument is a JSON array
    ArrayLike { root: &'a Value, items: &'a [Value] },
    /// Anything else: the argument list itself is indexed
    Positional,
}

impl<'a> ValueSource<'a> {
    pub fn classify(args: &'a [Value]) -> Self {
        match args.first() {
            Some(root @ Value::Object(map)) => ValueSource::Object { root, map },
            Some(root @ Value::Array(items)) => ValueSource::ArrayLike { root, items },
            _ => ValueSource::Positional,
        }
    }
}

/// Parse `-?[0-9]+` into an index
pub fn index_literal(path: &str) -> Option<i64> {
    let digits = path.strip_prefix('-').unwrap_or(path);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    path.parse().ok()
}

/// Index with negative values counting from the end; misses are undefined
fn index_from_end(items: &[Value], index: i64) -> &Value {
    let position = if index < 0 {
        (items.len() as i64).checked_add(index)
    } else {
        Some(index)
    };
    position
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| items.get(p))
        .unwrap_or(&UNDEFINED)
}

/// Per-call resolution state
#[derive(Debug)]
pub struct Resolver<'a> {
    args: &'a [Value],
    source: ValueSource<'a>,
    auto_index: usize,
    options: &'a Options,
}

impl<'a> Resolver<'a> {
    pub fn new(args: &'a [Value], options: &'a Options) -> Self {
        Self {
            args,
            source: ValueSource::classify(args),
            auto_index: 0,
            options,
        }
    }

    pub fn source(&self) -> ValueSource<'a> {
        self.source
    }

    /// Placeholders resolved so far
    pub fn auto_index(&self) -> usize {
        self.auto_index
    }

    /// Resolve one placeholder's accessor path
    ///
    /// Rules, first match wins:
    /// 1. array source + integer path → index the array
    /// 2. object source + non-empty path → key lookup or accessor chain
    /// 3. integer path → index the argument list
    /// 4. otherwise → the auto-index slot of the argument list
    pub fn resolve(&mut self, path: &str) -> Result<&'a Value, FormatError> {
        let path = match self.options.blank_body {
            BlankBody::Auto if path.trim().is_empty() => "",
            _ => path,
        };
        let auto = self.auto_index;
        self.auto_index += 1;

        let index = index_literal(path);
        let value = match self.source {
            ValueSource::ArrayLike { items, .. } if index.is_some() => {
                index_from_end(items, index.unwrap_or_default())
            }
            ValueSource::ArrayLike { root, .. } if accessor::is_chain(path) => {
                accessor::resolve(root, path)?
            }
            ValueSource::Object { root, map } if !path.is_empty() => {
                if accessor::is_chain(path) {
                    accessor::resolve(root, path)?
                } else {
                    match map.get(path) {
                        Some(value) => value,
                        None => self.missing_key(path, auto),
                    }
                }
            }
            _ => match index {
                Some(index) => index_from_end(self.args, index),
                None => self.positional(auto),
            },
        };
        Ok(value)
    }

    fn positional(&self, auto: usize) -> &'a Value {
        self.args.get(auto).unwrap_or(&UNDEFINED)
    }

    fn missing_key(&self, key: &str, auto: usize) -> &'a Value {
        match self.options.missing_key {
            MissingKey::AutoIndex => {
                debug!(key = %key, auto = auto, "key missing from object, using auto-index value");
                self.positional(auto)
            }
            MissingKey::Undefined => &UNDEFINED,
        }
    }
}
