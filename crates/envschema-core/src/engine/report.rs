//! Validation error records and the aggregate report
//!
//! Copyright (c) 2025 Envschema Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The closed error taxonomy carried on every validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Field is mandatory and absent
    Required,
    /// Value present but fails a type/range/enum/custom check
    Format,
    /// The field's transform failed
    Transform,
    /// Coercion-level type mismatch
    Type,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Required => write!(f, "required"),
            ErrorKind::Format => write!(f, "format"),
            ErrorKind::Transform => write!(f, "transform"),
            ErrorKind::Type => write!(f, "type"),
        }
    }
}

/// One field's validation failure, with the context a caller needs to
/// render or act on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Canonical (schema) field name
    pub field: String,
    /// The environment variable that was looked up: the upper-cased name
    pub env_var: String,
    pub kind: ErrorKind,
    pub message: String,
    /// The offending value, when there was one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        env_var: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            env_var: env_var.into(),
            kind,
            message: message.into(),
            value: None,
            expected: None,
            received: None,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_received(mut self, received: impl Into<String>) -> Self {
        self.received = Some(received.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} [{}]",
            self.field, self.env_var, self.message, self.kind
        )
    }
}

impl std::error::Error for ValidationError {}

/// The aggregate outcome of one validation call.
///
/// `data` is present iff no field errored: on any failure the whole map is
/// withheld, even though other fields were individually valid. Optional
/// absent fields without defaults are simply omitted from `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub(crate) fn from_parts(data: Map<String, Value>, errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            Self {
                success: true,
                data: Some(data),
                errors,
            }
        } else {
            Self {
                success: false,
                data: None,
                errors,
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Convenience lookup into the coerced data
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.as_ref()?.get(field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            return write!(f, "validation succeeded");
        }
        write!(f, "validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}
