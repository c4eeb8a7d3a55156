//! Formatting policies
//!
//! Provides configurable behavior for:
//! - Simple keys missing from an object source
//! - Placeholders whose body is only whitespace
//! - The text written for undefined values

use serde::{Deserialize, Serialize};

use crate::value::UNDEFINED_TEXT;

/// What a simple key missing from an object source resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKey {
    /// Fall back to the auto-index slot, so `{knight}` can render the
    /// object itself
    #[default]
    AutoIndex,
    /// Resolve to undefined
    Undefined,
}

/// How a whitespace-only body such as `{ }` is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankBody {
    /// As a key made of whitespace
    #[default]
    Literal,
    /// Exactly like `{}`
    Auto,
}

/// Formatting policies for a `Formatter`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Missing simple key on an object source
    pub missing_key: MissingKey,

    /// Whitespace-only placeholder bodies
    pub blank_body: BlankBody,

    /// Text written for an undefined final value
    ///
    /// Applies only when the value is spliced into the output. Formatters
    /// still see an undefined input as `"undefined"`, so `{5:upper}` renders
    /// `UNDEFINED` whatever this is set to.
    pub undefined_text: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            missing_key: MissingKey::AutoIndex,
            blank_body: BlankBody::Literal,
            undefined_text: UNDEFINED_TEXT.to_string(),
        }
    }
}

impl Options {
    /// Missing keys stay undefined; no fallback to positional values
    pub fn strict() -> Self {
        Self {
            missing_key: MissingKey::Undefined,
            ..Self::default()
        }
    }

    /// Blank bodies auto-index and undefined renders as nothing
    pub fn lenient() -> Self {
        Self {
            missing_key: MissingKey::AutoIndex,
            blank_body: BlankBody::Auto,
            undefined_text: String::new(),
        }
    }

    pub fn with_missing_key(mut self, missing_key: MissingKey) -> Self {
        self.missing_key = missing_key;
        self
    }

    pub fn with_blank_body(mut self, blank_body: BlankBody) -> Self {
        self.blank_body = blank_body;
        self
    }

    pub fn with_undefined_text(mut self, text: impl Into<String>) -> Self {
        self.undefined_text = text.into();
        self
    }
}
