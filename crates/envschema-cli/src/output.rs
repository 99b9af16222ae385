//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in human-readable and machine formats, with specialized rendering
//! for validation reports.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use envschema_core::{ValidationError, ValidationReport};
use serde_json::Value;
use std::io::{self, Write};

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer targeting stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[allow(dead_code)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write a validation report with specialized formatting
    pub fn report(&mut self, report: &ValidationReport, detailed: bool) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.writeln(&serde_json::to_string(report)?),
            OutputFormat::JsonPretty => self.writeln(&serde_json::to_string_pretty(report)?),
            OutputFormat::Human => self.report_human(report, detailed),
        }
    }

    fn report_human(&mut self, report: &ValidationReport, detailed: bool) -> Result<()> {
        if report.success {
            self.success("✅ All environment variables are valid")?;
            if detailed {
                if let Some(data) = &report.data {
                    self.section("Resolved values")?;
                    for (field, value) in data {
                        self.writeln(&format!("  {} = {}", field, format_value_compact(value)))?;
                    }
                }
            }
            return Ok(());
        }

        self.error(&format!(
            "❌ Validation failed - {} error(s)",
            report.errors.len()
        ))?;
        self.writeln("")?;
        for (i, error) in report.errors.iter().enumerate() {
            self.writeln(&format!(
                "{}. {}",
                i + 1,
                format_validation_error_human(error, detailed)
            ))?;
        }
        Ok(())
    }
}

/// Format a single validation error for human reading
pub fn format_validation_error_human(error: &ValidationError, detailed: bool) -> String {
    let mut output = format!(
        "{} ({}): {} [{}]",
        error.field, error.env_var, error.message, error.kind
    );

    if detailed {
        if let Some(value) = &error.value {
            output.push_str(&format!("\n   received: {}", format_value_compact(value)));
        }
        if let Some(expected) = &error.expected {
            output.push_str(&format!("\n   expected: {}", expected));
        }
    }

    output
}

/// Format a JSON value in a compact, human-readable way
fn format_value_compact(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envschema_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_format_error_plain() {
        let error = ValidationError::new("port", "PORT", ErrorKind::Format, "must be a number");
        assert_eq!(
            format_validation_error_human(&error, false),
            "port (PORT): must be a number [format]"
        );
    }

    #[test]
    fn test_format_error_detailed() {
        let error = ValidationError::new("port", "PORT", ErrorKind::Format, "must be a number")
            .with_value(json!("abc"))
            .with_expected("port");
        let rendered = format_validation_error_human(&error, true);
        assert!(rendered.contains("received: \"abc\""));
        assert!(rendered.contains("expected: port"));
    }

    #[test]
    fn test_report_json_output() {
        let buffer: Vec<u8> = Vec::new();
        let mut writer =
            OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(buffer));
        let report = envschema_core::SchemaBuilder::new()
            .build()
            .validate(&std::collections::HashMap::new());
        writer.report(&report, false).unwrap();
    }

    #[test]
    fn test_value_compact() {
        assert_eq!(format_value_compact(&json!("x")), "\"x\"");
        assert_eq!(format_value_compact(&json!(8080)), "8080");
        assert_eq!(format_value_compact(&json!(null)), "null");
    }
}
