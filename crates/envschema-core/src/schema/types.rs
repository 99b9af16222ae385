//! Core types for the field model
//!
//! Field definitions are a closed tagged union: each field type carries only
//! the options that are legal for it, so "does this option apply here" is
//! settled at construction time rather than checked during validation.
//!
//! Copyright (c) 2025 Envschema Team
//! Licensed under the Apache-2.0 license

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Url,
    Port,
    Email,
    Ip,
    Json,
    Regex,
}

impl FieldType {
    /// Parse a type name as it appears in a schema file
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "boolean" => Some(FieldType::Boolean),
            "url" => Some(FieldType::Url),
            "port" => Some(FieldType::Port),
            "email" => Some(FieldType::Email),
            "ip" => Some(FieldType::Ip),
            "json" => Some(FieldType::Json),
            "regex" => Some(FieldType::Regex),
            _ => None,
        }
    }

    /// Whether raw values of this type are coerced before validation.
    ///
    /// The other types receive the raw string unmodified into their
    /// built-in validator.
    pub fn is_coercible(self) -> bool {
        matches!(
            self,
            FieldType::String | FieldType::Number | FieldType::Boolean | FieldType::Port
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Url => "url",
            FieldType::Port => "port",
            FieldType::Email => "email",
            FieldType::Ip => "ip",
            FieldType::Json => "json",
            FieldType::Regex => "regex",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// IP version restriction for `ip`-typed fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    #[serde(rename = "ipv4")]
    V4,
    #[serde(rename = "ipv6")]
    V6,
    Any,
}

impl IpVersion {
    /// Parse the `version` option value as it appears in a schema file
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ipv4" => Some(IpVersion::V4),
            "ipv6" => Some(IpVersion::V6),
            "any" => Some(IpVersion::Any),
            _ => None,
        }
    }
}

impl Default for IpVersion {
    fn default() -> Self {
        IpVersion::Any
    }
}

/// Protocols accepted by `url`-typed fields when none are configured
pub const DEFAULT_URL_PROTOCOLS: [&str; 3] = ["http", "https", "ftp"];

/// Per-type options, discriminated by the field type
#[derive(Debug, Clone)]
pub enum TypeOptions {
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Boolean,
    Port {
        /// Informational only; carried through but not enforced
        common: bool,
    },
    Url {
        /// Allowed schemes, normalized lower-case without a trailing ':'
        protocols: Vec<String>,
        /// Accepted for compatibility; URLs must parse with a scheme regardless
        require_protocol: bool,
    },
    Email {
        /// Accepted for compatibility; plus-addressing is always allowed
        allow_plus: bool,
    },
    Ip {
        version: IpVersion,
    },
    Json,
    Regex {
        /// Compiled with full-match anchoring at schema compile time
        pattern: Regex,
    },
}

impl TypeOptions {
    /// The field type this option set belongs to
    pub fn field_type(&self) -> FieldType {
        match self {
            TypeOptions::String { .. } => FieldType::String,
            TypeOptions::Number { .. } => FieldType::Number,
            TypeOptions::Boolean => FieldType::Boolean,
            TypeOptions::Port { .. } => FieldType::Port,
            TypeOptions::Url { .. } => FieldType::Url,
            TypeOptions::Email { .. } => FieldType::Email,
            TypeOptions::Ip { .. } => FieldType::Ip,
            TypeOptions::Json => FieldType::Json,
            TypeOptions::Regex { .. } => FieldType::Regex,
        }
    }

    /// Unconstrained string options
    pub fn string() -> Self {
        TypeOptions::String {
            min_length: None,
            max_length: None,
        }
    }

    /// Unconstrained number options
    pub fn number() -> Self {
        TypeOptions::Number {
            min: None,
            max: None,
        }
    }

    pub fn boolean() -> Self {
        TypeOptions::Boolean
    }

    pub fn port() -> Self {
        TypeOptions::Port { common: false }
    }

    /// URL options with the default protocol set
    pub fn url() -> Self {
        TypeOptions::Url {
            protocols: DEFAULT_URL_PROTOCOLS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            require_protocol: false,
        }
    }

    pub fn email() -> Self {
        TypeOptions::Email { allow_plus: true }
    }

    pub fn ip() -> Self {
        TypeOptions::Ip {
            version: IpVersion::Any,
        }
    }

    pub fn json() -> Self {
        TypeOptions::Json
    }

    /// Regex options; the pattern is anchored for full-match semantics
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        let anchored = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(TypeOptions::Regex { pattern: anchored })
    }
}

/// A custom per-field predicate, run after the built-in checks
pub type ValidateFn = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// A per-field transform, applied after coercion and before validation
pub type TransformFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// A field default: a literal value or a zero-argument producer
#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    Producer(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    /// Resolve the default into a concrete value, invoking the producer
    /// if there is one
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Value(v) => v.clone(),
            DefaultValue::Producer(f) => f(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(v) => f.debug_tuple("Value").field(v).finish(),
            DefaultValue::Producer(_) => f.write_str("Producer(<fn>)"),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Value(value)
    }
}

/// An author-supplied field definition, used with
/// [`SchemaBuilder`](crate::SchemaBuilder) for programmatic schemas
#[derive(Clone)]
pub struct FieldSpec {
    pub options: TypeOptions,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub enum_values: Option<Vec<Value>>,
    pub validate: Option<ValidateFn>,
    pub transform: Option<TransformFn>,
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn new(options: TypeOptions) -> Self {
        Self {
            options,
            required: false,
            default: None,
            enum_values: None,
            validate: None,
            transform: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    /// Attach a producer default, invoked at validation time
    pub fn default_with<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Producer(Arc::new(producer)));
        self
    }

    pub fn enum_values(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Attach a custom predicate, run after the enum and constraint checks
    pub fn validate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(predicate));
        self
    }

    /// Attach a transform, applied after coercion and before validation.
    /// At most one transform applies per field; a second call replaces
    /// the first.
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("options", &self.options)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("enum_values", &self.enum_values)
            .field("validate", &self.validate.as_ref().map(|_| "<fn>"))
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .field("description", &self.description)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_parse() {
        assert_eq!(FieldType::parse("port"), Some(FieldType::Port));
        assert_eq!(FieldType::parse("json"), Some(FieldType::Json));
        assert_eq!(FieldType::parse("uuid"), None);
        assert_eq!(FieldType::parse("String"), None);
    }

    #[test]
    fn test_coercible_types() {
        assert!(FieldType::String.is_coercible());
        assert!(FieldType::Number.is_coercible());
        assert!(FieldType::Boolean.is_coercible());
        assert!(FieldType::Port.is_coercible());
        assert!(!FieldType::Url.is_coercible());
        assert!(!FieldType::Json.is_coercible());
        assert!(!FieldType::Regex.is_coercible());
    }

    #[test]
    fn test_regex_options_are_anchored() {
        let options = TypeOptions::regex("[a-z]+").unwrap();
        let TypeOptions::Regex { pattern } = options else {
            panic!("expected regex options");
        };
        assert!(pattern.is_match("abc"));
        assert!(!pattern.is_match("abc123"));
        assert!(!pattern.is_match("123abc"));
    }

    #[test]
    fn test_regex_options_invalid_pattern() {
        assert!(TypeOptions::regex("(unclosed").is_err());
    }

    #[test]
    fn test_default_value_resolution() {
        let literal = DefaultValue::Value(json!(8080));
        assert_eq!(literal.resolve(), json!(8080));

        let produced = DefaultValue::Producer(Arc::new(|| json!("generated")));
        assert_eq!(produced.resolve(), json!("generated"));
        assert_eq!(produced.resolve(), json!("generated"));
    }

    #[test]
    fn test_field_spec_builder() {
        let spec = FieldSpec::new(TypeOptions::number())
            .required()
            .default_value(42)
            .description("a number");
        assert!(spec.required);
        assert_eq!(spec.default.unwrap().resolve(), json!(42));
        assert_eq!(spec.description.as_deref(), Some("a number"));
    }
}
