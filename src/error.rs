//! Error types with fix suggestions
//!
//! Every error aborts the whole `format` call: there is no partial output.

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A `:name` suffix names a formatter missing from the registry.
    #[error("Undefined formatter \"{name}\".")]
    UndefinedFormatter { name: String },

    /// An accessor chain dereferenced null/undefined. `property` is the
    /// failing segment, not the whole path.
    #[error("Cannot access property \"{property}\" of undefined.")]
    PropertyAccess { property: String },

    #[error("Invalid accessor path \"{path}\".")]
    InvalidPath { path: String },

    /// A formatter rejected its input.
    #[error("Formatter \"{name}\" failed: {details}")]
    Formatter { name: String, details: String },
}

impl FormatError {
    /// Shorthand for formatter implementations rejecting a value.
    pub fn formatter(name: impl Into<String>, details: impl Into<String>) -> Self {
        FormatError::Formatter {
            name: name.into(),
            details: details.into(),
        }
    }
}

impl FixSuggestion for FormatError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            FormatError::UndefinedFormatter { .. } => {
                Some("Register the formatter with Formatter::builder().formatter(name, f)")
            }
            FormatError::PropertyAccess { .. } => {
                Some("Check that every segment before the failing property exists in the value")
            }
            FormatError::InvalidPath { .. } => {
                Some("Use a.b, a[0], a['key'] or a[\"key\"] segments")
            }
            FormatError::Formatter { .. } => Some("Check the value type the formatter expects"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = FormatError::UndefinedFormatter {
            name: "unicornify".to_string(),
        };
        assert_eq!(err.to_string(), "Undefined formatter \"unicornify\".");

        let err = FormatError::PropertyAccess {
            property: "color".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot access property \"color\" of undefined.");
    }

    #[test]
    fn every_variant_has_a_suggestion() {
        let errors = [
            FormatError::UndefinedFormatter { name: "x".into() },
            FormatError::PropertyAccess { property: "x".into() },
            FormatError::InvalidPath { path: "a..b".into() },
            FormatError::formatter("hex", "expected an integer"),
        ];
        for err in &errors {
            assert!(err.fix_suggestion().is_some(), "{err:?}");
        }
    }
}
