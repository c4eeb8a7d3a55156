//! Built-in formatters
//!
//! Each takes the running value plus the literal arguments of its call and
//! returns the next value. Missing trailing arguments fall back to defaults,
//! so `{:lpad(12)}` and `{:lpad(12, " ")}` are the same call.
//!
//! Values are read through [`text`], so an undefined input is the text
//! `"undefined"` regardless of the formatter's configured undefined text.

use serde_json::Value;

use crate::error::FormatError;
use crate::value::{self, as_int, text, truthy};

/// Plain function signature shared by all built-ins
pub type BuiltinFn = fn(&Value, &[Value]) -> Result<Value, FormatError>;

/// Name → function table for the default registry
pub const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("upper", upper),
    ("lower", lower),
    ("repeat", repeat),
    ("join", join),
    ("pad", pad),
    ("lpad", lpad),
    ("rpad", rpad),
    ("surround", surround),
    ("hex", hex),
    ("bin", bin),
];

pub fn upper(value: &Value, _args: &[Value]) -> Result<Value, FormatError> {
    Ok(Value::String(text(value).to_uppercase()))
}

pub fn lower(value: &Value, _args: &[Value]) -> Result<Value, FormatError> {
    Ok(Value::String(text(value).to_lowercase()))
}

/// Largest string, in bytes, that `repeat` and the pad family will build
pub const MAX_REPEAT_BYTES: usize = 16 * 1024 * 1024;

/// `piece` repeated `count` times, refusing results past [`MAX_REPEAT_BYTES`]
fn repeated(name: &str, piece: &str, count: usize) -> Result<String, FormatError> {
    match piece.len().checked_mul(count) {
        Some(len) if len <= MAX_REPEAT_BYTES => Ok(piece.repeat(count)),
        _ => Err(FormatError::formatter(
            name,
            format!("result too large ({count} x {} bytes)", piece.len()),
        )),
    }
}

/// Non-negative count argument; `None` when it does not fit in `usize`
fn count_arg(args: &[Value]) -> Option<usize> {
    let count = args.first().and_then(as_int).unwrap_or(0).max(0);
    usize::try_from(count).ok()
}

/// `repeat(count)`: the value repeated `count` times; undefined repeats as ""
pub fn repeat(value: &Value, args: &[Value]) -> Result<Value, FormatError> {
    if value.is_null() {
        return Ok(Value::String(String::new()));
    }
    let content = text(value);
    let count =
        count_arg(args).ok_or_else(|| FormatError::formatter("repeat", "count out of range"))?;
    Ok(Value::String(repeated("repeat", &content, count)?))
}

/// `join(sep = ", ")`: array elements joined by `sep`
pub fn join(value: &Value, args: &[Value]) -> Result<Value, FormatError> {
    let separator = args.first().map(text);
    let separator = separator.as_deref().unwrap_or(", ");
    match value {
        Value::Array(items) => Ok(Value::String(value::join(items, separator))),
        other => Ok(Value::String(text(other).into_owned())),
    }
}

/// Text, number of fill repetitions and fill string for the pad family.
///
/// `Ok(None)` when the value is already at least `width` characters wide.
fn padding(
    name: &str,
    value: &Value,
    args: &[Value],
) -> Result<Option<(String, usize, String)>, FormatError> {
    let content = text(value).into_owned();
    let width = args.first().and_then(as_int).unwrap_or(0);
    let len = content.chars().count() as i64;
    if width <= len {
        return Ok(None);
    }
    let n = usize::try_from(width - len)
        .map_err(|_| FormatError::formatter(name, "width out of range"))?;
    let fill = args.get(1).map(|f| text(f).into_owned());
    let fill = fill.unwrap_or_else(|| " ".to_string());
    Ok(Some((content, n, fill)))
}

/// `lpad(width, fill = " ")`
pub fn lpad(value: &Value, args: &[Value]) -> Result<Value, FormatError> {
    Ok(match padding("lpad", value, args)? {
        Some((content, n, fill)) => Value::String(repeated("lpad", &fill, n)? + &content),
        None => value.clone(),
    })
}

/// `rpad(width, fill = " ")`
pub fn rpad(value: &Value, args: &[Value]) -> Result<Value, FormatError> {
    Ok(match padding("rpad", value, args)? {
        Some((content, n, fill)) => Value::String(content + &repeated("rpad", &fill, n)?),
        None => value.clone(),
    })
}

/// `pad(width, fill = " ")`: centered, an odd remainder puts the extra fill
/// on the left
pub fn pad(value: &Value, args: &[Value]) -> Result<Value, FormatError> {
    Ok(match padding("pad", value, args)? {
        Some((content, n, fill)) => {
            let right = n / 2;
            let left = n - right;
            Value::String(format!(
                "{}{}{}",
                repeated("pad", &fill, left)?,
                content,
                repeated("pad", &fill, right)?
            ))
        }
        None => value.clone(),
    })
}

/// `surround(left, right = left)`
pub fn surround(value: &Value, args: &[Value]) -> Result<Value, FormatError> {
    let left = args.first().map(text).unwrap_or_default();
    let right = args.get(1).map(text).unwrap_or_else(|| left.clone());
    Ok(Value::String(format!("{}{}{}", left, text(value), right)))
}

/// `hex(prefix = false)`
pub fn hex(value: &Value, args: &[Value]) -> Result<Value, FormatError> {
    radix("hex", value, args)
}

/// `bin(prefix = false)`
pub fn bin(value: &Value, args: &[Value]) -> Result<Value, FormatError> {
    radix("bin", value, args)
}

fn radix(name: &str, value: &Value, args: &[Value]) -> Result<Value, FormatError> {
    let n = as_int(value).ok_or_else(|| {
        FormatError::formatter(name, format!("expected an integer, got {}", text(value)))
    })?;
    let with_prefix = args.first().is_some_and(truthy);

    let digits = match name {
        "hex" => format!("{:x}", n.unsigned_abs()),
        _ => format!("{:b}", n.unsigned_abs()),
    };
    let prefix = match (with_prefix, name) {
        (false, _) => "",
        (true, "hex") => "0x",
        (true, _) => "0b",
    };
    let sign = if n < 0 { "-" } else { "" };
    Ok(Value::String(format!("{sign}{prefix}{digits}")))
}
