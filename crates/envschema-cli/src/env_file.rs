//! Environment sources: .env-style files and the process environment

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Load variables from a .env-style file.
///
/// Blank lines and `#` comments are skipped; each remaining line must be
/// `KEY=VALUE`. Keys and values are trimmed; the value may contain `=`.
pub fn load(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse(&content))
}

/// Snapshot the process environment
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

fn parse(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match trimmed.split_once('=') {
            Some((key, value)) => {
                vars.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                warn!(line = line_no + 1, "skipping malformed line without '='");
            }
        }
    }
    vars
}
