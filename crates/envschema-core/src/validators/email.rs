//! Email check: single '@', no whitespace, RFC-5322-style character rules

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Local part allows the usual RFC 5322 atext characters plus dots; domain
/// labels must start and end alphanumeric, which also rejects leading and
/// consecutive dots.
fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?x)
            ^[A-Za-z0-9!\#$%&'*+/=?^_`{|}~.\-]+
            @
            [A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?
            (?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)+$
            ",
        )
        .expect("email pattern is valid")
    })
}

pub fn check(value: &Value) -> Result<(), String> {
    let Some(s) = value.as_str() else {
        return Err("must be a string".to_string());
    };
    if s.chars().any(char::is_whitespace) {
        return Err("email must not contain whitespace".to_string());
    }
    if s.matches('@').count() != 1 {
        return Err("email must contain exactly one '@'".to_string());
    }
    if !email_pattern().is_match(s) {
        return Err(format!("'{}' is not a valid email address", s));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_addresses() {
        for email in [
            "user@example.com",
            "first.last@example.co.uk",
            "user+tag@example.com",
            "u_n-d.er@sub.example.org",
        ] {
            assert!(check(&json!(email)).is_ok(), "email: {}", email);
        }
    }

    #[test]
    fn test_rejects_whitespace() {
        assert!(check(&json!("user name@example.com")).is_err());
        assert!(check(&json!("user@example.com ")).is_err());
    }

    #[test]
    fn test_rejects_at_sign_count() {
        assert!(check(&json!("userexample.com")).is_err());
        assert!(check(&json!("a@b@example.com")).is_err());
    }

    #[test]
    fn test_rejects_bad_domains() {
        assert!(check(&json!("user@example")).is_err());
        assert!(check(&json!("user@.example.com")).is_err());
        assert!(check(&json!("user@example..com")).is_err());
        assert!(check(&json!("user@-example.com")).is_err());
    }
}
