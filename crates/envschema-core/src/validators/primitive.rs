//! String, number, and boolean checks
//!
//! Coercion has already happened upstream, so these are strict shape checks
//! plus optional bounds.

use serde_json::Value;

pub fn check_string(
    value: &Value,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Result<(), String> {
    if !value.is_string() {
        return Err("must be a string".to_string());
    }
    check_length(value, min_length, max_length)
}

/// Length bounds only; non-string values are left to the type check
pub fn check_length(
    value: &Value,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Result<(), String> {
    let Some(s) = value.as_str() else {
        return Ok(());
    };
    let len = s.chars().count();
    if let Some(min) = min_length {
        if len < min {
            return Err(format!("must be at least {} characters long", min));
        }
    }
    if let Some(max) = max_length {
        if len > max {
            return Err(format!("must be at most {} characters long", max));
        }
    }
    Ok(())
}

pub fn check_number(value: &Value, min: Option<f64>, max: Option<f64>) -> Result<(), String> {
    if !value.is_number() {
        return Err("must be a number".to_string());
    }
    check_bounds(value, min, max)
}

/// Numeric bounds only; non-number values are left to the type check
pub fn check_bounds(value: &Value, min: Option<f64>, max: Option<f64>) -> Result<(), String> {
    let Some(n) = value.as_f64() else {
        return Ok(());
    };
    if let Some(min) = min {
        if n < min {
            return Err(format!("must be at least {}", min));
        }
    }
    if let Some(max) = max {
        if n > max {
            return Err(format!("must be at most {}", max));
        }
    }
    Ok(())
}

pub fn check_boolean(value: &Value) -> Result<(), String> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err("must be a boolean".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_bounds() {
        assert!(check_string(&json!("hello"), Some(3), Some(10)).is_ok());
        assert!(check_string(&json!("hi"), Some(3), None).is_err());
        assert!(check_string(&json!("hello world"), None, Some(5)).is_err());
        assert!(check_string(&json!(42), None, None).is_err());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        assert!(check_length(&json!("héllo"), Some(5), Some(5)).is_ok());
    }

    #[test]
    fn test_number_bounds() {
        assert!(check_number(&json!(5), Some(1.0), Some(10.0)).is_ok());
        assert!(check_number(&json!(0), Some(1.0), None).is_err());
        assert!(check_number(&json!(11), None, Some(10.0)).is_err());
        assert!(check_number(&json!("5"), None, None).is_err());
    }

    #[test]
    fn test_boolean_is_strict() {
        assert!(check_boolean(&json!(true)).is_ok());
        assert!(check_boolean(&json!(false)).is_ok());
        assert!(check_boolean(&json!("true")).is_err());
        assert!(check_boolean(&json!(1)).is_err());
    }
}
