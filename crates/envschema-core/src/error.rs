//! Error types for the envschema core library
//!
//! Schema compilation is the only fallible surface of the library: a schema
//! is either fully compiled or not usable at all. Validation-time problems
//! are never raised as errors; they are collected into the
//! [`ValidationReport`](crate::ValidationReport) instead.

use thiserror::Error;

/// Schema compilation error, carrying the offending field name
#[derive(Error, Debug)]
pub enum Error {
    /// The raw schema value was not an object
    #[error("schema root must be an object")]
    RootNotObject,

    /// A field definition was not an object
    #[error("field '{field}': definition must be an object")]
    FieldNotObject { field: String },

    /// A field definition lacks the mandatory 'type' option
    #[error("field '{field}': missing required option 'type'")]
    MissingType { field: String },

    /// The 'type' option names an unsupported type
    #[error("field '{field}': unknown type '{type_name}'")]
    UnknownType { field: String, type_name: String },

    /// A present option has the wrong shape for its type
    #[error("field '{field}': option '{option}' must be {expected}")]
    InvalidOption {
        field: String,
        option: String,
        expected: String,
    },

    /// A regex-typed field is missing its pattern
    #[error("field '{field}': type 'regex' requires a 'pattern' option")]
    MissingPattern { field: String },

    /// A regex-typed field carries a pattern that does not compile
    #[error("field '{field}': invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// An `_environments` override block is ill-formed
    #[error("environment '{environment}', field '{field}': {message}")]
    InvalidOverride {
        environment: String,
        field: String,
        message: String,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid-option error
    pub fn invalid_option(
        field: impl Into<String>,
        option: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Error::InvalidOption {
            field: field.into(),
            option: option.into(),
            expected: expected.into(),
        }
    }

    /// Create an invalid-override error
    pub fn invalid_override(
        environment: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::InvalidOverride {
            environment: environment.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingType {
            field: "PORT".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "field 'PORT': missing required option 'type'"
        );
    }

    #[test]
    fn test_invalid_option_display() {
        let err = Error::invalid_option("NAME", "minLength", "a non-negative integer");
        assert_eq!(
            err.to_string(),
            "field 'NAME': option 'minLength' must be a non-negative integer"
        );
    }
}
