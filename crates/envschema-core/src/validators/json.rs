//! JSON check: the value must parse; the parse result is discarded.
//!
//! The raw string stays in the report data unless a transform re-parses it.

use serde_json::Value;

pub fn check(value: &Value) -> Result<(), String> {
    let Some(s) = value.as_str() else {
        return Err("must be a string".to_string());
    };
    match serde_json::from_str::<Value>(s) {
        Ok(_) => Ok(()),
        Err(e) => Err(format!("is not valid JSON: {}", e)),
    }
}
