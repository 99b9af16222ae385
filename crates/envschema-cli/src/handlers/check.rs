//! Check command handler
//!
//! Loads a schema file (JSON or YAML), compiles it, gathers environment
//! variables from a .env file or the process environment, and validates.

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::env_file;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use envschema_core::CompiledSchema;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Handle the check command
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    info!(schema = %args.schema.display(), "validating environment");

    let schema = load_schema(&args.schema)?;
    let env = gather_env(&args, config)?;
    debug!(
        fields = schema.len(),
        vars = env.len(),
        strict = args.strict,
        "schema compiled"
    );

    let report = schema.validate_in(&env, args.environment.as_deref());
    output.report(&report, args.detailed)?;

    if report.has_errors() {
        return Err(Error::ValidationFailed {
            count: report.errors.len(),
        });
    }
    Ok(())
}

/// Load and compile a schema file, choosing the parser by extension
pub fn load_schema(path: &Path) -> Result<CompiledSchema> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;

    let raw: Value = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content).map_err(|e| {
            if content.trim_start().starts_with(['{', '[']) {
                Error::Json(e)
            } else {
                Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "JSON or YAML".to_string(),
                }
            }
        })?,
    };

    Ok(CompiledSchema::compile(&raw)?)
}

fn gather_env(args: &CheckArgs, config: &Config) -> Result<HashMap<String, String>> {
    if let Some(path) = &args.env_file {
        debug!(path = %path.display(), "reading variables from file");
        return env_file::load(path);
    }
    if let Some(path) = &config.paths.env_file {
        if path.exists() {
            debug!(path = %path.display(), "reading variables from configured file");
            return env_file::load(path);
        }
    }
    Ok(env_file::process_env())
}
