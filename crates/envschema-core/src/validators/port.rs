//! Port number check: an integer in `[1, 65535]`

use serde_json::Value;

pub fn check(value: &Value) -> Result<(), String> {
    let Some(n) = value.as_f64() else {
        return Err("port must be a number".to_string());
    };
    if n.fract() != 0.0 {
        return Err(format!("port must be an integer, got {}", n));
    }
    let port = n as i64;
    if !(1..=65535).contains(&port) {
        return Err(format!("port must be between 1 and 65535, got {}", port));
    }
    Ok(())
}
