//! Value stringification and argument coercion
//!
//! `Null` plays the role of "undefined": index misses, missing keys and
//! explicit nulls all end up here and render as the configured undefined text.

use std::borrow::Cow;

use serde_json::{Number, Value};

/// Shared undefined value, borrowed by resolvers on a miss
pub(crate) static UNDEFINED: Value = Value::Null;

/// Default text for an undefined value
pub const UNDEFINED_TEXT: &str = "undefined";

/// Render a value the way it is spliced into the output
///
/// - strings verbatim
/// - integral numbers without a fraction (`2.0` → `2`)
/// - arrays comma-joined, null elements empty
/// - objects as compact JSON
/// - null as `undefined_text`
pub fn display<'a>(value: &'a Value, undefined_text: &'a str) -> Cow<'a, str> {
    match value {
        Value::Null => Cow::Borrowed(undefined_text),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Number(n) => Cow::Owned(number_text(n)),
        Value::Array(items) => Cow::Owned(join(items, ",")),
        Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// Render with the default undefined text
///
/// This is the text formatters work on; `Options::undefined_text` is not
/// consulted here.
pub fn text(value: &Value) -> Cow<'_, str> {
    display(value, UNDEFINED_TEXT)
}

/// Join array elements; null elements render empty
pub fn join(items: &[Value], separator: &str) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        if !item.is_null() {
            out.push_str(&text(item));
        }
    }
    out
}

fn number_text(n: &Number) -> String {
    if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
        if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
            return format!("{}", f as i64);
        }
    }
    n.to_string()
}

/// Integer view of a value, if it has one
///
/// Accepts integral numbers and strings that parse as integers.
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Truthiness: false, 0, "" and null are false
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_scalars() {
        assert_eq!(text(&json!("Lancelot")), "Lancelot");
        assert_eq!(text(&json!(42)), "42");
        assert_eq!(text(&json!(-7)), "-7");
        assert_eq!(text(&json!(2.0)), "2");
        assert_eq!(text(&json!(2.5)), "2.5");
        assert_eq!(text(&json!(true)), "true");
        assert_eq!(text(&Value::Null), "undefined");
        assert_eq!(display(&Value::Null, ""), "");
    }

    #[test]
    fn display_arrays_comma_joined() {
        assert_eq!(text(&json!(["Sir", "Lancelot"])), "Sir,Lancelot");
        assert_eq!(text(&json!([1, null, [2, 3]])), "1,,2,3");
        assert_eq!(text(&json!([])), "");
    }

    #[test]
    fn display_object_as_json() {
        assert_eq!(text(&json!({"name": "Lancelot"})), r#"{"name":"Lancelot"}"#);
    }

    #[test]
    fn int_coercion() {
        assert_eq!(as_int(&json!(32768)), Some(32768));
        assert_eq!(as_int(&json!(12.0)), Some(12));
        assert_eq!(as_int(&json!(12.5)), None);
        assert_eq!(as_int(&json!(" 12 ")), Some(12));
        assert_eq!(as_int(&json!("twelve")), None);
        assert_eq!(as_int(&Value::Null), None);
    }

    #[test]
    fn truthiness() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("x")));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&Value::Null));
    }
}
