//! Pattern check for `regex`-typed fields.
//!
//! The pattern is compiled with full-match anchoring at schema compile
//! time; absence of a pattern is a compile-time concern, never seen here.

use regex::Regex;
use serde_json::Value;

pub fn check(value: &Value, pattern: &Regex) -> Result<(), String> {
    let Some(s) = value.as_str() else {
        return Err("must be a string".to_string());
    };
    if pattern.is_match(s) {
        Ok(())
    } else {
        Err(format!("'{}' does not match the required pattern", s))
    }
}
