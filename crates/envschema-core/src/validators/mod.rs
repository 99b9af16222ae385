//! Built-in type validators
//!
//! One pure function per type family, each taking the current value (and the
//! field's type options) and returning `Ok(())` or a human-readable failure
//! reason. [`type_check`] dispatches on the options variant; it is the
//! engine's BUILTIN_VALIDATE stage. [`constraint_check`] covers only the
//! option-derived constraints and runs as a later check stage, so defaulted
//! values (which skip the builtin stage) still honor their bounds.
//!
//! Copyright (c) 2025 Envschema Team
//! Licensed under the Apache-2.0 license

mod email;
mod ip;
mod json;
mod pattern;
mod port;
mod primitive;
mod url;

use crate::schema::TypeOptions;
use serde_json::Value;

/// The built-in validator for a field's type
pub fn type_check(value: &Value, options: &TypeOptions) -> Result<(), String> {
    match options {
        TypeOptions::String {
            min_length,
            max_length,
        } => primitive::check_string(value, *min_length, *max_length),
        TypeOptions::Number { min, max } => primitive::check_number(value, *min, *max),
        TypeOptions::Boolean => primitive::check_boolean(value),
        TypeOptions::Port { .. } => port::check(value),
        TypeOptions::Url { protocols, .. } => url::check(value, protocols),
        TypeOptions::Email { .. } => email::check(value),
        TypeOptions::Ip { version } => ip::check(value, *version),
        TypeOptions::Json => json::check(value),
        TypeOptions::Regex { pattern } => pattern::check(value, pattern),
    }
}

/// Only the option-derived constraints (bounds, pattern); type correctness
/// is not this stage's concern
pub fn constraint_check(value: &Value, options: &TypeOptions) -> Result<(), String> {
    match options {
        TypeOptions::String {
            min_length,
            max_length,
        } => primitive::check_length(value, *min_length, *max_length),
        TypeOptions::Number { min, max } => primitive::check_bounds(value, *min, *max),
        TypeOptions::Regex { pattern } => pattern::check(value, pattern),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_check_dispatch() {
        assert!(type_check(&json!("hello"), &TypeOptions::string()).is_ok());
        assert!(type_check(&json!(3.5), &TypeOptions::number()).is_ok());
        assert!(type_check(&json!(true), &TypeOptions::boolean()).is_ok());
        assert!(type_check(&json!(8080), &TypeOptions::port()).is_ok());
        assert!(type_check(&json!("https://example.com"), &TypeOptions::url()).is_ok());
        assert!(type_check(&json!("a@example.com"), &TypeOptions::email()).is_ok());
        assert!(type_check(&json!("127.0.0.1"), &TypeOptions::ip()).is_ok());
        assert!(type_check(&json!("{\"a\": 1}"), &TypeOptions::json()).is_ok());
        assert!(type_check(&json!("ab12"), &TypeOptions::regex("[a-z0-9]+").unwrap()).is_ok());
    }

    #[test]
    fn test_constraint_check_covers_bounds_and_pattern() {
        let short = TypeOptions::String {
            min_length: Some(5),
            max_length: None,
        };
        assert!(constraint_check(&json!("ab"), &short).is_err());

        let bounded = TypeOptions::Number {
            min: Some(10.0),
            max: None,
        };
        assert!(constraint_check(&json!(5), &bounded).is_err());

        let pattern = TypeOptions::regex("[0-9]+").unwrap();
        assert!(constraint_check(&json!("12x"), &pattern).is_err());
    }

    #[test]
    fn test_constraint_check_ignores_unconstrained_types() {
        assert!(constraint_check(&json!("anything"), &TypeOptions::json()).is_ok());
        assert!(constraint_check(&json!("anything"), &TypeOptions::url()).is_ok());
    }
}
