//! Formatter registry
//!
//! Built once per `Formatter` (built-ins, then custom entries on top) and
//! never mutated afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::builtins::BUILTINS;
use crate::error::FormatError;

/// A named formatter: `(value, args) -> value`
pub type FormatterFn = dyn Fn(&Value, &[Value]) -> Result<Value, FormatError> + Send + Sync;

/// Immutable name → formatter map
#[derive(Clone)]
pub struct Registry {
    formatters: HashMap<String, Arc<FormatterFn>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("formatters", &self.names())
            .finish()
    }
}

impl Registry {
    /// Registry holding only the built-in formatters
    pub fn builtin() -> Self {
        let formatters = BUILTINS
            .iter()
            .map(|&(name, f)| (name.to_string(), Arc::new(f) as Arc<FormatterFn>))
            .collect();
        Self { formatters }
    }

    /// Built-ins overridden and extended by `custom`
    pub fn with_overrides<I>(custom: I) -> Self
    where
        I: IntoIterator<Item = (String, Arc<FormatterFn>)>,
    {
        let mut registry = Self::builtin();
        registry.formatters.extend(custom);
        registry
    }

    pub fn get(&self, name: &str) -> Option<&FormatterFn> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Invoke a formatter by name
    pub fn call(&self, name: &str, value: &Value, args: &[Value]) -> Result<Value, FormatError> {
        let formatter = self.get(name).ok_or_else(|| FormatError::UndefinedFormatter {
            name: name.to_string(),
        })?;
        formatter(value, args)
    }
}
