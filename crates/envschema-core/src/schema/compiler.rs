//! Schema compilation
//!
//! Turns a raw schema description (a JSON/YAML-derived mapping of field name
//! to field definition, plus an optional `_environments` override block) into
//! an immutable [`CompiledSchema`]. Compilation fails fast: the result is
//! either fully usable or not produced at all.
//!
//! Copyright (c) 2025 Envschema Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::schema::overrides::{EnvironmentOverrides, FieldOverride};
use crate::schema::types::{
    DefaultValue, FieldSpec, FieldType, IpVersion, TransformFn, TypeOptions, ValidateFn,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// The key under which environment overrides live in a raw schema
const ENVIRONMENTS_KEY: &str = "_environments";

/// Definition keys every field type accepts
const COMMON_KEYS: [&str; 7] = [
    "type",
    "required",
    "default",
    "enum",
    "validate",
    "transform",
    "description",
];

/// An immutable, compiled field
#[derive(Clone)]
pub struct CompiledField {
    /// Canonical field name, the key under which the value appears in
    /// report data
    pub name: String,
    /// Lookup key against the raw environment map: the upper-cased name
    pub env_var: String,
    pub field_type: FieldType,
    pub options: TypeOptions,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub enum_values: Option<Vec<Value>>,
    pub validate: Option<ValidateFn>,
    pub transform: Option<TransformFn>,
    pub description: Option<String>,
}

impl CompiledField {
    fn from_spec(name: String, spec: FieldSpec) -> Self {
        Self {
            env_var: name.to_uppercase(),
            field_type: spec.options.field_type(),
            options: spec.options,
            required: spec.required,
            default: spec.default,
            enum_values: spec.enum_values,
            validate: spec.validate,
            transform: spec.transform,
            description: spec.description,
            name,
        }
    }
}

impl fmt::Debug for CompiledField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledField")
            .field("name", &self.name)
            .field("env_var", &self.env_var)
            .field("field_type", &self.field_type)
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

/// A compiled schema: ordered fields plus raw environment overrides.
///
/// Never mutated after compilation, so it is safe to share across threads
/// and reuse for any number of validation calls.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    fields: Vec<CompiledField>,
    index: HashMap<String, usize>,
    overrides: EnvironmentOverrides,
}

impl CompiledSchema {
    /// Compile a raw schema description.
    ///
    /// Fails when the root is not an object, a field definition is not an
    /// object or lacks a `type`, a type or option is malformed, or the
    /// `_environments` block is ill-formed. Unrecognized definition keys
    /// are ignored with a warning.
    pub fn compile(raw: &Value) -> Result<Self> {
        let obj = raw.as_object().ok_or(Error::RootNotObject)?;

        let mut fields = Vec::with_capacity(obj.len());
        let mut overrides = EnvironmentOverrides::default();

        for (name, definition) in obj {
            if name == ENVIRONMENTS_KEY {
                overrides = parse_overrides(definition)?;
                continue;
            }
            let spec = parse_field(name, definition)?;
            fields.push(CompiledField::from_spec(name.clone(), spec));
        }

        Ok(Self::from_parts(fields, overrides))
    }

    pub(crate) fn from_parts(fields: Vec<CompiledField>, overrides: EnvironmentOverrides) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        Self {
            fields,
            index,
            overrides,
        }
    }

    /// Look up a compiled field by name
    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Fields in schema declaration order
    pub fn fields(&self) -> impl Iterator<Item = &CompiledField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The raw environment overrides, resolved lazily at validation time
    pub fn overrides(&self) -> &EnvironmentOverrides {
        &self.overrides
    }
}

/// Programmatic schema construction.
///
/// Unlike [`CompiledSchema::compile`], a builder-made schema can carry
/// custom validators, transforms, and producer defaults.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<(String, FieldSpec)>,
    overrides: EnvironmentOverrides,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; declaration order is preserved in reports
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }

    /// Add an environment override patch for one field
    pub fn environment_override(
        mut self,
        environment: impl Into<String>,
        field: impl Into<String>,
        patch: FieldOverride,
    ) -> Self {
        self.overrides.insert(environment, field, patch);
        self
    }

    pub fn build(self) -> CompiledSchema {
        let fields = self
            .fields
            .into_iter()
            .map(|(name, spec)| CompiledField::from_spec(name, spec))
            .collect();
        CompiledSchema::from_parts(fields, self.overrides)
    }
}

fn parse_field(name: &str, definition: &Value) -> Result<FieldSpec> {
    let obj = definition.as_object().ok_or_else(|| Error::FieldNotObject {
        field: name.to_string(),
    })?;

    let type_value = obj.get("type").ok_or_else(|| Error::MissingType {
        field: name.to_string(),
    })?;
    let type_name = type_value
        .as_str()
        .ok_or_else(|| Error::invalid_option(name, "type", "a string"))?;
    let field_type = FieldType::parse(type_name).ok_or_else(|| Error::UnknownType {
        field: name.to_string(),
        type_name: type_name.to_string(),
    })?;

    let options = parse_options(name, field_type, obj)?;
    warn_unknown_keys(name, field_type, obj);

    let mut spec = FieldSpec::new(options);

    if let Some(required) = obj.get("required") {
        spec.required = required
            .as_bool()
            .ok_or_else(|| Error::invalid_option(name, "required", "a boolean"))?;
    }
    if let Some(default) = obj.get("default") {
        // Defaults are trusted as already being in target-type form
        spec.default = Some(DefaultValue::Value(default.clone()));
    }
    if let Some(allowed) = obj.get("enum") {
        let values = allowed
            .as_array()
            .ok_or_else(|| Error::invalid_option(name, "enum", "an array"))?;
        spec.enum_values = Some(values.clone());
    }
    if let Some(description) = obj.get("description") {
        spec.description = Some(
            description
                .as_str()
                .ok_or_else(|| Error::invalid_option(name, "description", "a string"))?
                .to_string(),
        );
    }
    for key in ["validate", "transform"] {
        if obj.contains_key(key) {
            // Closures cannot be expressed in a schema file; they are
            // attached through SchemaBuilder
            warn!(field = %name, option = %key, "option is only available via SchemaBuilder; ignoring");
        }
    }

    Ok(spec)
}

fn parse_options(
    name: &str,
    field_type: FieldType,
    obj: &Map<String, Value>,
) -> Result<TypeOptions> {
    let options = match field_type {
        FieldType::String => TypeOptions::String {
            min_length: opt_usize(name, obj, "minLength")?,
            max_length: opt_usize(name, obj, "maxLength")?,
        },
        FieldType::Number => TypeOptions::Number {
            min: opt_f64(name, obj, "min")?,
            max: opt_f64(name, obj, "max")?,
        },
        FieldType::Boolean => TypeOptions::Boolean,
        FieldType::Port => TypeOptions::Port {
            common: opt_bool(name, obj, "common")?.unwrap_or(false),
        },
        FieldType::Url => {
            let protocols = match opt_string_vec(name, obj, "protocols")? {
                Some(list) => list
                    .into_iter()
                    .map(|p| p.trim_end_matches(':').to_ascii_lowercase())
                    .collect(),
                None => {
                    let TypeOptions::Url { protocols, .. } = TypeOptions::url() else {
                        unreachable!()
                    };
                    protocols
                }
            };
            TypeOptions::Url {
                protocols,
                require_protocol: opt_bool(name, obj, "requireProtocol")?.unwrap_or(false),
            }
        }
        FieldType::Email => TypeOptions::Email {
            allow_plus: opt_bool(name, obj, "allowPlus")?.unwrap_or(true),
        },
        FieldType::Ip => {
            let version = match opt_str(name, obj, "version")? {
                Some(v) => IpVersion::parse(&v).ok_or_else(|| {
                    Error::invalid_option(name, "version", "one of \"ipv4\", \"ipv6\", \"any\"")
                })?,
                None => IpVersion::Any,
            };
            TypeOptions::Ip { version }
        }
        FieldType::Json => TypeOptions::Json,
        FieldType::Regex => {
            let pattern = opt_str(name, obj, "pattern")?.ok_or_else(|| Error::MissingPattern {
                field: name.to_string(),
            })?;
            TypeOptions::regex(&pattern).map_err(|source| Error::InvalidPattern {
                field: name.to_string(),
                source: Box::new(source),
            })?
        }
    };
    Ok(options)
}

fn opt_usize(field: &str, obj: &Map<String, Value>, key: &str) -> Result<Option<usize>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| Error::invalid_option(field, key, "a non-negative integer")),
    }
}

fn opt_f64(field: &str, obj: &Map<String, Value>, key: &str) -> Result<Option<f64>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| Error::invalid_option(field, key, "a number")),
    }
}

fn opt_bool(field: &str, obj: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_bool()
            .map(Some)
            .ok_or_else(|| Error::invalid_option(field, key, "a boolean")),
    }
}

fn opt_str(field: &str, obj: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| Error::invalid_option(field, key, "a string")),
    }
}

fn opt_string_vec(field: &str, obj: &Map<String, Value>, key: &str) -> Result<Option<Vec<String>>> {
    let Some(v) = obj.get(key) else {
        return Ok(None);
    };
    let items = v
        .as_array()
        .ok_or_else(|| Error::invalid_option(field, key, "an array of strings"))?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(
            item.as_str()
                .ok_or_else(|| Error::invalid_option(field, key, "an array of strings"))?
                .to_string(),
        );
    }
    Ok(Some(out))
}

fn type_specific_keys(field_type: FieldType) -> &'static [&'static str] {
    match field_type {
        FieldType::String => &["minLength", "maxLength"],
        FieldType::Number => &["min", "max"],
        FieldType::Boolean => &[],
        FieldType::Port => &["common"],
        FieldType::Url => &["protocols", "requireProtocol"],
        FieldType::Email => &["allowPlus"],
        FieldType::Ip => &["version"],
        FieldType::Json => &[],
        FieldType::Regex => &["pattern"],
    }
}

fn warn_unknown_keys(name: &str, field_type: FieldType, obj: &Map<String, Value>) {
    let specific = type_specific_keys(field_type);
    for key in obj.keys() {
        if !COMMON_KEYS.contains(&key.as_str()) && !specific.contains(&key.as_str()) {
            warn!(field = %name, option = %key, "ignoring unrecognized field option");
        }
    }
}

fn parse_overrides(raw: &Value) -> Result<EnvironmentOverrides> {
    let environments = raw
        .as_object()
        .ok_or_else(|| Error::invalid_override("_environments", "*", "block must be an object"))?;

    let mut overrides = EnvironmentOverrides::default();
    for (environment, fields) in environments {
        let fields = fields.as_object().ok_or_else(|| {
            Error::invalid_override(environment, "*", "environment block must be an object")
        })?;
        for (field, patch) in fields {
            overrides.insert(environment, field, parse_override(environment, field, patch)?);
        }
    }
    Ok(overrides)
}

fn parse_override(environment: &str, field: &str, raw: &Value) -> Result<FieldOverride> {
    let obj = raw
        .as_object()
        .ok_or_else(|| Error::invalid_override(environment, field, "patch must be an object"))?;

    let mut patch = FieldOverride::default();
    for (key, value) in obj {
        match key.as_str() {
            "required" => {
                patch.required = Some(value.as_bool().ok_or_else(|| {
                    Error::invalid_override(environment, field, "'required' must be a boolean")
                })?);
            }
            "default" => {
                patch.default = Some(DefaultValue::Value(value.clone()));
            }
            "description" => {
                patch.description = Some(
                    value
                        .as_str()
                        .ok_or_else(|| {
                            Error::invalid_override(
                                environment,
                                field,
                                "'description' must be a string",
                            )
                        })?
                        .to_string(),
                );
            }
            "enum" => {
                let values = value.as_array().ok_or_else(|| {
                    Error::invalid_override(environment, field, "'enum' must be an array")
                })?;
                patch.enum_values = Some(values.clone());
            }
            "type" => {
                return Err(Error::invalid_override(
                    environment,
                    field,
                    "an override cannot change a field's type",
                ));
            }
            other => {
                return Err(Error::invalid_override(
                    environment,
                    field,
                    format!("unsupported override key '{}'", other),
                ));
            }
        }
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compile_basic_schema() {
        let schema = CompiledSchema::compile(&json!({
            "port": { "type": "port", "default": 8080 },
            "database_url": { "type": "url", "required": true, "description": "primary DB" },
        }))
        .unwrap();

        assert_eq!(schema.len(), 2);
        let port = schema.field("port").unwrap();
        assert_eq!(port.env_var, "PORT");
        assert_eq!(port.field_type, FieldType::Port);
        assert!(!port.required);
        assert_eq!(port.default.as_ref().unwrap().resolve(), json!(8080));

        let url = schema.field("database_url").unwrap();
        assert_eq!(url.env_var, "DATABASE_URL");
        assert!(url.required);
        assert_eq!(url.description.as_deref(), Some("primary DB"));
    }

    #[test]
    fn test_compile_preserves_declaration_order() {
        let schema = CompiledSchema::compile(&json!({
            "zeta": { "type": "string" },
            "alpha": { "type": "string" },
            "mid": { "type": "string" },
        }))
        .unwrap();
        let names: Vec<&str> = schema.fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_compile_rejects_non_object_root() {
        let err = CompiledSchema::compile(&json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, Error::RootNotObject));
    }

    #[test]
    fn test_compile_rejects_non_object_field() {
        let err = CompiledSchema::compile(&json!({ "port": "port" })).unwrap_err();
        assert!(matches!(err, Error::FieldNotObject { field } if field == "port"));
    }

    #[test]
    fn test_compile_rejects_missing_type() {
        let err = CompiledSchema::compile(&json!({ "port": { "required": true } })).unwrap_err();
        assert!(matches!(err, Error::MissingType { field } if field == "port"));
    }

    #[test]
    fn test_compile_rejects_unknown_type() {
        let err = CompiledSchema::compile(&json!({ "id": { "type": "uuid" } })).unwrap_err();
        assert!(matches!(err, Error::UnknownType { type_name, .. } if type_name == "uuid"));
    }

    #[test]
    fn test_compile_rejects_wrongly_typed_option() {
        let err = CompiledSchema::compile(&json!({
            "name": { "type": "string", "minLength": "three" }
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidOption { option, .. } if option == "minLength"));
    }

    #[test]
    fn test_regex_requires_pattern() {
        let err = CompiledSchema::compile(&json!({ "code": { "type": "regex" } })).unwrap_err();
        assert!(matches!(err, Error::MissingPattern { field } if field == "code"));

        let err = CompiledSchema::compile(&json!({
            "code": { "type": "regex", "pattern": "(unclosed" }
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_url_protocols_are_normalized() {
        let schema = CompiledSchema::compile(&json!({
            "endpoint": { "type": "url", "protocols": ["HTTPS:", "wss"] }
        }))
        .unwrap();
        let TypeOptions::Url { protocols, .. } = &schema.field("endpoint").unwrap().options else {
            panic!("expected url options");
        };
        assert_eq!(protocols, &["https", "wss"]);
    }

    #[test]
    fn test_environments_block_is_extracted() {
        let schema = CompiledSchema::compile(&json!({
            "database_url": { "type": "url" },
            "_environments": {
                "production": {
                    "database_url": { "required": true }
                }
            }
        }))
        .unwrap();
        // Not compiled as a field
        assert_eq!(schema.len(), 1);
        let patch = schema
            .overrides()
            .field_patch("production", "database_url")
            .unwrap();
        assert_eq!(patch.required, Some(true));
    }

    #[test]
    fn test_override_rejects_type_change() {
        let err = CompiledSchema::compile(&json!({
            "port": { "type": "port" },
            "_environments": { "test": { "port": { "type": "string" } } }
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidOverride { .. }));
    }

    #[test]
    fn test_override_rejects_unknown_key() {
        let err = CompiledSchema::compile(&json!({
            "name": { "type": "string" },
            "_environments": { "test": { "name": { "minLength": 3 } } }
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidOverride { .. }));
    }

    #[test]
    fn test_builder_schema() {
        let schema = SchemaBuilder::new()
            .field("api_key", FieldSpec::new(TypeOptions::string()).required())
            .field(
                "retries",
                FieldSpec::new(TypeOptions::number()).default_value(3),
            )
            .build();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.field("api_key").unwrap().env_var, "API_KEY");
    }
}
