//! Type coercion
//!
//! Converts raw (typically string) values into their target primitive type.
//! Only `string`, `number`, `boolean`, and `port` coerce; the other types
//! hand the raw string straight to their built-in validator. Absent values
//! are handled upstream in the engine; `null` passes through unchanged.
//!
//! Numeric coercion deliberately uses leading-prefix parsing: `"12.34.56"`
//! coerces to `12.34`, matching leading-float semantics rather than strict
//! full-string parsing.

use crate::engine::ErrorKind;
use crate::schema::FieldType;
use serde_json::{Number, Value};
use std::fmt;

/// Values a string may take to coerce to boolean `true`
pub const TRUTHY_WORDS: [&str; 4] = ["true", "1", "yes", "on"];
/// Values a string may take to coerce to boolean `false`
pub const FALSY_WORDS: [&str; 4] = ["false", "0", "no", "off"];

/// A coercion failure, classified for the error report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoerceError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CoerceError {
    /// Right shape, bad content
    fn format(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Format,
            message: message.into(),
        }
    }

    /// Wrong shape entirely
    fn type_mismatch(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Type,
            message: message.into(),
        }
    }
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CoerceError {}

/// Coerce a raw value to its target type.
///
/// `null` passes through unchanged; objects and arrays are refused for
/// every target to prevent accidental stringified-object values.
pub fn coerce(value: &Value, target: FieldType) -> Result<Value, CoerceError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    if value.is_object() || value.is_array() {
        return Err(CoerceError::type_mismatch(format!(
            "cannot coerce {} to {}",
            value_kind(value),
            target
        )));
    }

    match target {
        FieldType::String => Ok(coerce_string(value)),
        FieldType::Number | FieldType::Port => coerce_number(value, target),
        FieldType::Boolean => coerce_boolean(value),
        // Non-coercible types receive the raw value unmodified
        _ => Ok(value.clone()),
    }
}

fn coerce_string(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Number(n) => Value::String(n.to_string()),
        other => Value::String(other.to_string()),
    }
}

fn coerce_number(value: &Value, target: FieldType) -> Result<Value, CoerceError> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::Bool(_) => Err(CoerceError::type_mismatch(format!(
            "cannot coerce boolean to {}",
            target
        ))),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(CoerceError::format(format!(
                    "empty string cannot be coerced to {}",
                    target
                )));
            }
            match leading_numeric_prefix(trimmed) {
                Some(n) => number_value(n),
                None => Err(CoerceError::format(format!(
                    "'{}' is not a number",
                    trimmed
                ))),
            }
        }
        other => Err(CoerceError::type_mismatch(format!(
            "cannot coerce {} to {}",
            value_kind(other),
            target
        ))),
    }
}

fn coerce_boolean(value: &Value) -> Result<Value, CoerceError> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::String(s) => {
            let word = s.trim().to_lowercase();
            if TRUTHY_WORDS.contains(&word.as_str()) {
                Ok(Value::Bool(true))
            } else if FALSY_WORDS.contains(&word.as_str()) {
                Ok(Value::Bool(false))
            } else {
                Err(CoerceError::format(format!(
                    "'{}' is not a boolean (expected one of: true, 1, yes, on, false, 0, no, off)",
                    s.trim()
                )))
            }
        }
        Value::Number(n) => {
            let word = n.to_string();
            if TRUTHY_WORDS.contains(&word.as_str()) {
                Ok(Value::Bool(true))
            } else if FALSY_WORDS.contains(&word.as_str()) {
                Ok(Value::Bool(false))
            } else {
                Err(CoerceError::type_mismatch(format!(
                    "cannot coerce number {} to boolean",
                    word
                )))
            }
        }
        other => Err(CoerceError::type_mismatch(format!(
            "cannot coerce {} to boolean",
            value_kind(other)
        ))),
    }
}

/// Parse the longest numeric prefix of `s`: optional sign, digits, optional
/// fraction, optional exponent. Returns `None` when no prefix parses.
fn leading_numeric_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut end = if i > int_start { i } else { 0 };

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > frac_start {
            end = j;
        }
    }

    if end == 0 {
        return None;
    }

    i = end;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let digit_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > digit_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Store integral results as integer JSON numbers so `8080` round-trips
/// as an integer, not `8080.0`
fn number_value(n: f64) -> Result<Value, CoerceError> {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        return Ok(Value::Number(Number::from(n as i64)));
    }
    Number::from_f64(n)
        .map(Value::Number)
        .ok_or_else(|| CoerceError::format(format!("{} is not a representable number", n)))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
