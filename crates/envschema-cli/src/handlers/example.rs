//! Example command handler
//!
//! Renders a .env example file from a schema: one entry per field with its
//! description, required marker, and either the declared default or a
//! type-appropriate sample value.

use crate::cli::ExampleArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use chrono::Utc;
use envschema_core::{example_value, CompiledField, CompiledSchema};
use serde_json::Value;
use tracing::info;

use super::check::load_schema;

/// Handle the example command
pub fn handle_example(args: ExampleArgs, output: &mut OutputWriter) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    let rendered = render_example(&schema);

    match &args.output_file {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            info!(path = %path.display(), "example file written");
            output.success(&format!("Example written to {}", path.display()))?;
        }
        None => {
            output.write(&rendered)?;
        }
    }
    Ok(())
}

/// Render the example file content for a compiled schema
pub fn render_example(schema: &CompiledSchema) -> String {
    let mut out = String::new();
    out.push_str("# Environment variables\n");
    out.push_str(&format!(
        "# Generated by envschema on {}\n\n",
        Utc::now().format("%Y-%m-%d")
    ));

    for field in schema.fields() {
        if let Some(description) = &field.description {
            out.push_str(&format!("# {}\n", description));
        }
        if field.required {
            out.push_str("# required\n");
        }
        out.push_str(&format!("{}={}\n\n", field.env_var, example_for(field)));
    }

    out
}

fn example_for(field: &CompiledField) -> String {
    match &field.default {
        Some(default) => match default.resolve() {
            Value::String(s) => s,
            other => other.to_string(),
        },
        None => example_value(field.field_type).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_example() {
        let schema = CompiledSchema::compile(&json!({
            "port": { "type": "port", "default": 3000, "description": "HTTP listen port" },
            "database_url": { "type": "url", "required": true },
            "debug": { "type": "boolean" },
        }))
        .unwrap();

        let rendered = render_example(&schema);
        assert!(rendered.contains("# HTTP listen port\nPORT=3000\n"));
        assert!(rendered.contains("# required\nDATABASE_URL=https://example.com\n"));
        assert!(rendered.contains("DEBUG=true\n"));
    }

    #[test]
    fn test_render_preserves_declaration_order() {
        let schema = CompiledSchema::compile(&json!({
            "zed": { "type": "string" },
            "abc": { "type": "string" },
        }))
        .unwrap();
        let rendered = render_example(&schema);
        let zed = rendered.find("ZED=").unwrap();
        let abc = rendered.find("ABC=").unwrap();
        assert!(zed < abc);
    }

    #[test]
    fn test_string_default_is_not_quoted() {
        let schema = CompiledSchema::compile(&json!({
            "mode": { "type": "string", "default": "debug" },
        }))
        .unwrap();
        let rendered = render_example(&schema);
        assert!(rendered.contains("MODE=debug\n"));
        assert!(!rendered.contains("MODE=\"debug\""));
    }
}
