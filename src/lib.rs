//! bracefmt - brace-placeholder string formatting
//!
//! ```
//! use bracefmt::format;
//! use serde_json::json;
//!
//! let out = format("Good {time} Sir {name:upper}.", &[json!({"time": "evening", "name": "Lancelot"})]).unwrap();
//! assert_eq!(out, "Good evening Sir LANCELOT.");
//!
//! let out = format("{:hex(true)} {:pad(7, '=')}", &[json!(32768), json!("abc")]).unwrap();
//! assert_eq!(out, "0x8000 ==abc==");
//! ```

pub mod accessor;
pub mod builtins;
pub mod chain;
pub mod error;
pub mod formatter;
pub mod literal;
pub mod options;
pub mod registry;
pub mod scanner;
pub mod source;
pub mod value;

pub use chain::{Invocation, Placeholder};
pub use error::{FixSuggestion, FormatError};
pub use formatter::{format, placeholders, Formatter, FormatterBuilder, DEFAULT_FORMATTER};
pub use literal::Literal;
pub use options::{BlankBody, MissingKey, Options};
pub use registry::{FormatterFn, Registry};
pub use source::ValueSource;
