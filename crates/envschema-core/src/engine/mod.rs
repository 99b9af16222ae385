//! Validation engine
//!
//! Runs the per-field pipeline against a flat environment map: resolve
//! environment overrides, resolve presence/defaults, coerce, transform,
//! run the built-in validator, then the fixed check stages. The first
//! failing stage wins; no field contributes more than one error per call,
//! and errors accumulate in schema declaration order.
//!
//! Copyright (c) 2025 Envschema Team
//! Licensed under the Apache-2.0 license

mod report;

pub use report::{ErrorKind, ValidationError, ValidationReport};

use crate::coerce::coerce;
use crate::schema::{merge_override, CompiledField, CompiledSchema, EffectiveField};
use crate::validators;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, trace};

/// The fixed check order after the built-in validator. This ordering is a
/// contract: enum failures are reported even when the custom predicate
/// would also fail, and constraint failures precede custom ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckStage {
    Enum,
    Constraints,
    Custom,
}

const CHECK_STAGES: [CheckStage; 3] = [
    CheckStage::Enum,
    CheckStage::Constraints,
    CheckStage::Custom,
];

impl CompiledSchema {
    /// Validate an environment map without environment overrides
    pub fn validate(&self, env: &HashMap<String, String>) -> ValidationReport {
        self.validate_in(env, None)
    }

    /// Validate an environment map, applying the override block for
    /// `environment` if one was given. Unknown environment names simply
    /// yield no overrides.
    ///
    /// Never fails: validation problems are always collected into the
    /// report so the caller gets one complete pass over every field.
    pub fn validate_in(
        &self,
        env: &HashMap<String, String>,
        environment: Option<&str>,
    ) -> ValidationReport {
        let mut data = Map::new();
        let mut errors = Vec::new();

        for field in self.fields() {
            let patch =
                environment.and_then(|name| self.overrides().field_patch(name, &field.name));
            match validate_field(field, merge_override(field, patch), env) {
                Ok(Some(value)) => {
                    data.insert(field.name.clone(), value);
                }
                Ok(None) => {
                    trace!(field = %field.name, "optional field absent, omitted");
                }
                Err(error) => {
                    debug!(field = %field.name, kind = %error.kind, "field failed validation");
                    errors.push(*error);
                }
            }
        }

        ValidationReport::from_parts(data, errors)
    }
}

/// Run one field through the full pipeline. `Ok(None)` means the field is
/// optional, absent, and without a default: omitted from the data entirely.
fn validate_field(
    field: &CompiledField,
    effective: EffectiveField,
    env: &HashMap<String, String>,
) -> Result<Option<Value>, Box<ValidationError>> {
    let fail = |kind: ErrorKind, message: String| {
        Box::new(ValidationError::new(&field.name, &field.env_var, kind, message))
    };

    let raw = env.get(&field.env_var);
    let (mut value, from_default) = match raw {
        Some(s) => (Value::String(s.clone()), false),
        None => {
            if effective.required {
                return Err(fail(
                    ErrorKind::Required,
                    format!("{} is required but not set", field.env_var),
                ));
            }
            match &effective.default {
                Some(default) => {
                    trace!(field = %field.name, "applying default");
                    (default.resolve(), true)
                }
                None => return Ok(None),
            }
        }
    };

    // Defaults are trusted as already being in target-type form: they
    // bypass coercion and the built-in type validator, but still pass
    // through the transform and the check stages below.
    if !from_default && field.field_type.is_coercible() {
        match coerce(&value, field.field_type) {
            Ok(coerced) => value = coerced,
            Err(e) => {
                return Err(fail(e.kind, e.message)
                    .with_value(value)
                    .with_expected(field.field_type.as_str())
                    .into());
            }
        }
    }

    if let Some(transform) = &field.transform {
        let input = value.clone();
        match transform(value) {
            Ok(transformed) => value = transformed,
            Err(message) => {
                return Err(fail(ErrorKind::Transform, message).with_value(input).into());
            }
        }
    }

    if !from_default {
        if let Err(message) = validators::type_check(&value, &field.options) {
            return Err(fail(ErrorKind::Format, message)
                .with_value(value)
                .with_expected(field.field_type.as_str())
                .into());
        }
    }

    for stage in CHECK_STAGES {
        let result = match stage {
            CheckStage::Enum => check_enum(&value, effective.enum_values.as_deref()),
            CheckStage::Constraints => validators::constraint_check(&value, &field.options),
            CheckStage::Custom => match &field.validate {
                Some(predicate) => predicate(&value),
                None => Ok(()),
            },
        };
        if let Err(message) = result {
            return Err(fail(ErrorKind::Format, message).with_value(value).into());
        }
    }

    Ok(Some(value))
}

fn check_enum(value: &Value, allowed: Option<&[Value]>) -> Result<(), String> {
    let Some(allowed) = allowed else {
        return Ok(());
    };
    if allowed.is_empty() || allowed.contains(value) {
        return Ok(());
    }
    let rendered: Vec<String> = allowed
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    Err(format!("must be one of: {}", rendered.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, SchemaBuilder, TypeOptions};
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_optional_absent_field_is_omitted() {
        let schema = SchemaBuilder::new()
            .field("name", FieldSpec::new(TypeOptions::string()))
            .build();
        let report = schema.validate(&env(&[]));
        assert!(report.success);
        assert!(report.data.unwrap().is_empty());
    }

    #[test]
    fn test_transform_failure_is_reported_not_thrown() {
        let schema = SchemaBuilder::new()
            .field(
                "payload",
                FieldSpec::new(TypeOptions::string())
                    .transform(|_| Err("refusing to transform".to_string())),
            )
            .build();
        let report = schema.validate(&env(&[("PAYLOAD", "anything")]));
        assert!(!report.success);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ErrorKind::Transform);
        assert_eq!(report.errors[0].message, "refusing to transform");
    }

    #[test]
    fn test_transform_applies_to_defaults() {
        let schema = SchemaBuilder::new()
            .field(
                "mode",
                FieldSpec::new(TypeOptions::string())
                    .default_value("debug")
                    .transform(|v| {
                        let s = v.as_str().unwrap_or_default().to_uppercase();
                        Ok(Value::String(s))
                    }),
            )
            .build();
        let report = schema.validate(&env(&[]));
        assert!(report.success);
        assert_eq!(report.get("mode"), Some(&json!("DEBUG")));
    }

    #[test]
    fn test_default_still_honors_constraints() {
        let schema = SchemaBuilder::new()
            .field(
                "token",
                FieldSpec::new(TypeOptions::String {
                    min_length: Some(8),
                    max_length: None,
                })
                .default_value("short"),
            )
            .build();
        let report = schema.validate(&env(&[]));
        assert!(!report.success);
        assert!(report.errors[0].message.contains("at least 8"));
    }

    #[test]
    fn test_custom_validator_runs_last() {
        let schema = SchemaBuilder::new()
            .field(
                "level",
                FieldSpec::new(TypeOptions::String {
                    min_length: Some(3),
                    max_length: None,
                })
                .validate(|_| Err("custom says no".to_string())),
            )
            .build();
        // Constraint failure wins over the custom predicate
        let report = schema.validate(&env(&[("LEVEL", "ab")]));
        assert!(report.errors[0].message.contains("at least 3"));
        // With constraints satisfied, the custom predicate is reached
        let report = schema.validate(&env(&[("LEVEL", "abc")]));
        assert_eq!(report.errors[0].message, "custom says no");
    }

    #[test]
    fn test_regex_field_chains_custom_validator() {
        let schema = SchemaBuilder::new()
            .field(
                "code",
                FieldSpec::new(TypeOptions::regex("[a-z]+").unwrap())
                    .validate(|v| match v.as_str() {
                        Some("forbidden") => Err("reserved word".to_string()),
                        _ => Ok(()),
                    }),
            )
            .build();
        let report = schema.validate(&env(&[("CODE", "forbidden")]));
        assert!(!report.success);
        assert_eq!(report.errors[0].message, "reserved word");
    }

    #[test]
    fn test_producer_default() {
        let schema = SchemaBuilder::new()
            .field(
                "generated",
                FieldSpec::new(TypeOptions::string()).default_with(|| json!("made-up")),
            )
            .build();
        let report = schema.validate(&env(&[]));
        assert_eq!(report.get("generated"), Some(&json!("made-up")));
    }

    #[test]
    fn test_enum_message_lists_values() {
        let err = check_enum(&json!("purple"), Some(&[json!("red"), json!("green")])).unwrap_err();
        assert_eq!(err, "must be one of: red, green");
    }
}
