//! Envschema Core - Schema-driven validation for environment variable maps
//!
//! This crate provides the validation/coercion engine behind the `envschema`
//! tool: a declarative field schema (type, constraints, defaults, custom
//! validation, transforms) is compiled once into an immutable
//! [`CompiledSchema`], then validated against any number of flat
//! string-keyed environment maps.
//!
//! # Main Components
//!
//! - **Schema Compiler**: turn a raw schema description into a reusable
//!   [`CompiledSchema`], failing fast on structural problems
//! - **Type Coercion**: convert raw string values into their target
//!   primitive types ([`coerce`])
//! - **Built-in Validators**: per-type correctness checks (url, port,
//!   email, ip, json, regex, string, number, boolean)
//! - **Validation Engine**: the per-field pipeline producing a
//!   [`ValidationReport`]
//!
//! # Example
//!
//! ```
//! use envschema_core::{CompiledSchema, Result};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! fn example() -> Result<()> {
//!     let schema = CompiledSchema::compile(&json!({
//!         "port": { "type": "port", "default": 8080 },
//!         "database_url": { "type": "url", "required": true },
//!     }))?;
//!
//!     let mut env = HashMap::new();
//!     env.insert("DATABASE_URL".to_string(), "https://db.example.com".to_string());
//!
//!     let report = schema.validate(&env);
//!     assert!(report.success);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod coerce;
pub mod engine;
pub mod error;
pub mod sample;
pub mod schema;
pub mod validators;

// Re-export the main types for convenience
pub use coerce::{coerce, CoerceError};
pub use engine::{ErrorKind, ValidationError, ValidationReport};
pub use error::{Error, Result};
pub use sample::example_value;
pub use schema::{
    // Field model
    DefaultValue, FieldSpec, FieldType, IpVersion, TypeOptions,
    // Compiled form
    CompiledField, CompiledSchema, SchemaBuilder,
    // Environment overrides
    EnvironmentOverrides, FieldOverride,
    // Function-valued options
    TransformFn, ValidateFn,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
