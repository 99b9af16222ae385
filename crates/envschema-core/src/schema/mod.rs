//! Schema model and compiler
//!
//! A schema maps field names to field definitions. [`CompiledSchema::compile`]
//! turns the raw form into an immutable, reusable structure; [`SchemaBuilder`]
//! does the same for programmatic construction (where custom validators,
//! transforms, and producer defaults can be attached).
//!
//! Copyright (c) 2025 Envschema Team
//! Licensed under the Apache-2.0 license

mod compiler;
mod overrides;
mod types;

pub use compiler::{CompiledField, CompiledSchema, SchemaBuilder};
pub use overrides::{merge_override, EffectiveField, EnvironmentOverrides, FieldOverride};
pub use types::{
    DefaultValue, FieldSpec, FieldType, IpVersion, TransformFn, TypeOptions, ValidateFn,
    DEFAULT_URL_PROTOCOLS,
};
