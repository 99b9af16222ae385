//! Environment overrides
//!
//! Overrides are stored raw on the compiled schema and resolved lazily, once
//! per field per validation call, through the pure [`merge_override`]
//! function. The compiled schema itself is never touched, so the same
//! schema serves every environment.
//!
//! Copyright (c) 2025 Envschema Team
//! Licensed under the Apache-2.0 license

use crate::schema::compiler::CompiledField;
use crate::schema::types::DefaultValue;
use serde_json::Value;
use std::collections::HashMap;

/// A partial patch to one field's definition, applied only when validating
/// under the environment it belongs to. Unset keys retain compiled values.
#[derive(Debug, Clone, Default)]
pub struct FieldOverride {
    pub required: Option<bool>,
    pub default: Option<DefaultValue>,
    pub description: Option<String>,
    pub enum_values: Option<Vec<Value>>,
}

impl FieldOverride {
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn enum_values(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }
}

/// Override patches keyed by environment name, then field name
#[derive(Debug, Clone, Default)]
pub struct EnvironmentOverrides {
    by_environment: HashMap<String, HashMap<String, FieldOverride>>,
}

impl EnvironmentOverrides {
    pub fn is_empty(&self) -> bool {
        self.by_environment.is_empty()
    }

    pub fn insert(
        &mut self,
        environment: impl Into<String>,
        field: impl Into<String>,
        patch: FieldOverride,
    ) {
        self.by_environment
            .entry(environment.into())
            .or_default()
            .insert(field.into(), patch);
    }

    /// The patch for `{environment, field}`, if any. Unknown environment
    /// names simply yield no patch.
    pub fn field_patch(&self, environment: &str, field: &str) -> Option<&FieldOverride> {
        self.by_environment.get(environment)?.get(field)
    }
}

/// The per-call view of a field after override resolution. Carries only
/// the keys the validation pipeline reads; `description` stays a
/// compile-time concern.
#[derive(Debug, Clone)]
pub struct EffectiveField {
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub enum_values: Option<Vec<Value>>,
}

/// Merge an override patch onto a compiled field. Pure: allocates a fresh
/// effective view and leaves the compiled field untouched.
pub fn merge_override(base: &CompiledField, patch: Option<&FieldOverride>) -> EffectiveField {
    let mut effective = EffectiveField {
        required: base.required,
        default: base.default.clone(),
        enum_values: base.enum_values.clone(),
    };
    if let Some(patch) = patch {
        if let Some(required) = patch.required {
            effective.required = required;
        }
        if let Some(default) = &patch.default {
            effective.default = Some(default.clone());
        }
        if let Some(enum_values) = &patch.enum_values {
            effective.enum_values = Some(enum_values.clone());
        }
    }
    effective
}
