//! Template formatting
//!
//! A `Formatter` binds an immutable formatter registry and options. Every
//! `format` call scans the template afresh, resolves each placeholder against
//! the call's arguments and splices the rendered value into the output.
//!
//! Performance:
//! - Templates without `{` are returned borrowed (zero allocation)
//! - Resolved values are borrowed from the arguments until a formatter runs
//! - Registry and options sit behind `Arc`, so clones are cheap and shareable
//!   across threads

use std::borrow::Cow;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::{instrument, trace};

use crate::accessor;
use crate::chain::{self, Placeholder};
use crate::error::FormatError;
use crate::options::Options;
use crate::registry::{FormatterFn, Registry};
use crate::scanner::{self, Token};
use crate::source::Resolver;
use crate::value;

/// Template formatter bound to a formatter registry
#[derive(Debug, Clone)]
pub struct Formatter {
    registry: Arc<Registry>,
    options: Arc<Options>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    /// Formatter with the built-in formatters and default options
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> FormatterBuilder {
        FormatterBuilder::new()
    }

    /// Built-ins overridden and extended by `custom`
    pub fn with_formatters<I>(custom: I) -> Self
    where
        I: IntoIterator<Item = (String, Arc<FormatterFn>)>,
    {
        Self::builder().formatters(custom).build()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn has_formatter(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Registered formatter names, sorted
    pub fn formatter_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Format a template against the call's arguments
    ///
    /// Returns `Cow::Borrowed` when the template has no `{`.
    /// Any error aborts the whole call.
    ///
    /// Example: `"Good {time} Sir {name}."` with `{"time": "evening", "name":
    /// "Lancelot"}` → `"Good evening Sir Lancelot."`
    #[instrument(level = "trace", skip(self, template, args), fields(len = template.len(), args = args.len()))]
    pub fn format<'t>(&self, template: &'t str, args: &[Value]) -> Result<Cow<'t, str>, FormatError> {
        // Early return with borrowed string (zero alloc)
        if !template.contains('{') {
            return Ok(Cow::Borrowed(template));
        }

        let mut resolver = Resolver::new(args, &self.options);
        let mut result = String::with_capacity(template.len() + 64);

        for token in scanner::scan(template) {
            match token {
                Token::Literal(range) => result.push_str(&template[range]),
                Token::Brace(brace) => result.push(brace),
                Token::Placeholder { body, .. } => {
                    let placeholder = chain::parse(&body);
                    let resolved = resolver.resolve(&placeholder.path)?;
                    let formatted =
                        chain::apply(Cow::Borrowed(resolved), &placeholder.chain, &self.registry)?;
                    trace!(
                        path = %placeholder.path,
                        formatters = placeholder.chain.len(),
                        "resolved placeholder"
                    );
                    result.push_str(&value::display(&formatted, &self.options.undefined_text));
                }
            }
        }

        Ok(Cow::Owned(result))
    }

    /// Check a template without argument values
    ///
    /// Every formatter must be registered and every accessor chain must
    /// parse. Returns the first problem found.
    pub fn validate(&self, template: &str) -> Result<(), FormatError> {
        for placeholder in placeholders(template) {
            if accessor::is_chain(&placeholder.path) {
                accessor::parse(&placeholder.path)?;
            }
            if let Some(unknown) = placeholder
                .chain
                .iter()
                .find(|invocation| !self.registry.contains(&invocation.name))
            {
                return Err(FormatError::UndefinedFormatter {
                    name: unknown.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Builder for formatters with custom formatter functions
#[derive(Default)]
pub struct FormatterBuilder {
    custom: Vec<(String, Arc<FormatterFn>)>,
    options: Options,
}

impl FormatterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a formatter; a built-in with the same name is replaced
    pub fn formatter<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, FormatError> + Send + Sync + 'static,
    {
        let f: Arc<FormatterFn> = Arc::new(f);
        self.custom.push((name.into(), f));
        self
    }

    /// Register several formatters at once
    pub fn formatters<I>(mut self, formatters: I) -> Self
    where
        I: IntoIterator<Item = (String, Arc<FormatterFn>)>,
    {
        self.custom.extend(formatters);
        self
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Formatter {
        Formatter {
            registry: Arc::new(Registry::with_overrides(self.custom)),
            options: Arc::new(self.options),
        }
    }
}

/// Parsed placeholders of a template, in source order
///
/// Escaped braces and literal text are skipped.
/// Example: `"{name:upper} and {}"` → paths `name` and `` (auto).
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    scanner::scan(template)
        .filter_map(|token| match token {
            Token::Placeholder { body, .. } => Some(chain::parse(&body)),
            _ => None,
        })
        .collect()
}

/// Global formatter instance with only the built-in formatters
pub static DEFAULT_FORMATTER: Lazy<Formatter> = Lazy::new(Formatter::new);

/// Convenience function for formatting with the built-in formatters
pub fn format<'t>(template: &'t str, args: &[Value]) -> Result<Cow<'t, str>, FormatError> {
    DEFAULT_FORMATTER.format(template, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_braces_is_borrowed() {
        let result = format("No templates here", &[]).unwrap();
        assert_eq!(result, "No templates here");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn with_placeholders_is_owned() {
        let result = format("Has {} template", &[json!("a")]).unwrap();
        assert_eq!(result, "Has a template");
        assert!(matches!(result, Cow::Owned(_)));
    }

    #[test]
    fn empty_template() {
        assert_eq!(format("", &[json!("x")]).unwrap(), "");
    }

    #[test]
    fn error_aborts_whole_call() {
        let result = format("ok {} then {:nope}", &[json!("a"), json!("b")]);
        assert_eq!(
            result.unwrap_err(),
            FormatError::UndefinedFormatter {
                name: "nope".to_string()
            }
        );
    }

    #[test]
    fn builder_registers_custom_formatter() {
        let formatter = Formatter::builder()
            .formatter("unicorns", |value, _args| {
                Ok(json!(format!("{} unicorns!", value::text(value))))
            })
            .build();
        assert!(formatter.has_formatter("unicorns"));
        assert!(formatter.has_formatter("upper"));
        assert_eq!(
            formatter.format("Here come the {:unicorns}", &[json!("five")]).unwrap(),
            "Here come the five unicorns!"
        );
        // default instance is unaffected
        assert!(!DEFAULT_FORMATTER.has_formatter("unicorns"));
    }

    #[test]
    fn options_control_undefined_text() {
        let formatter = Formatter::builder().options(Options::lenient()).build();
        assert_eq!(formatter.format("[{5}]", &[json!("a")]).unwrap(), "[]");
        assert_eq!(format("[{5}]", &[json!("a")]).unwrap(), "[undefined]");
    }

    #[test]
    fn validate_reports_unknown_formatter() {
        let formatter = Formatter::new();
        assert!(formatter.validate("{name:upper:pad(3)}").is_ok());
        assert_eq!(
            formatter.validate("{a} {b:shout}").unwrap_err(),
            FormatError::UndefinedFormatter {
                name: "shout".to_string()
            }
        );
        assert!(matches!(
            formatter.validate("{a..b}"),
            Err(FormatError::InvalidPath { .. })
        ));
    }

    #[test]
    fn placeholders_in_order() {
        let found = placeholders(r"{name:upper} \{skip\} {}");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].path, "name");
        assert_eq!(found[0].chain[0].name, "upper");
        assert_eq!(found[1].path, "");
    }

    #[test]
    fn formatter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Formatter>();
    }
}
